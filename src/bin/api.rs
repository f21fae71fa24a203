use linksum::core::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    linksum::setup_logging();

    let config = AppConfig::from_env()?;
    linksum::api::serve(config).await?;
    Ok(())
}
