use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Health check failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut lines = Vec::new();

        let base = ctx.client.base_url();
        let client = ctx.client.http_client();

        lines.push(format!("Relay ({}):", base));

        let livez_url = format!("{}/_status/livez", base.as_str().trim_end_matches('/'));
        match client.get(&livez_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                lines.push("  livez:  OK".to_string());
            }
            Ok(resp) => {
                lines.push(format!("  livez:  UNHEALTHY ({})", resp.status()));
            }
            Err(_) => {
                lines.push("  livez:  NOT REACHABLE".to_string());
            }
        }

        let readyz_url = format!("{}/_status/readyz", base.as_str().trim_end_matches('/'));
        match client.get(&readyz_url).send().await {
            Ok(resp) if resp.status().is_success() => {
                lines.push("  readyz: OK".to_string());
            }
            Ok(resp) => {
                lines.push(format!("  readyz: UNHEALTHY ({})", resp.status()));
            }
            Err(_) => {
                lines.push("  readyz: NOT REACHABLE".to_string());
            }
        }

        Ok(lines.join("\n"))
    }
}
