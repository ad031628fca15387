pub use clap::Parser;

use url::Url;

#[derive(Parser, Debug)]
#[command(name = "pinrelay")]
#[command(about = "Upload relay for pinning frontend content to Pinata")]
pub struct Args {
    /// Base URL of a running relay (used by client commands)
    #[arg(long, global = true, default_value = "http://localhost:3001")]
    pub remote: Url,

    #[command(subcommand)]
    pub command: crate::Command,
}
