use anyhow::Context;
use hire_relay::{App, AppContext, ConfigBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();

    let config = ConfigBuilder::new()
        .from_env()
        .build()
        .context("invalid configuration")?;
    hire_relay::init_tracing_with_config(&config);

    if config.mail.credentials().is_none() {
        tracing::warn!("EMAIL_USER/EMAIL_PASS not set; submissions will be rejected");
    }
    if config.mail.recipient().is_none() {
        tracing::warn!("RECIPIENT_EMAIL not set; submissions will be rejected");
    }

    let ctx = AppContext::builder().with_config(config).build();
    App::new(ctx).serve().await.context("server error")?;

    Ok(())
}
