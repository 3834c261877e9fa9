use noteshare_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    noteshare_api::telemetry::init_telemetry();

    let config = Config::from_env()?;
    config.validate()?;

    let state = noteshare_api::setup::build_state(&config).await?;
    let router = noteshare_api::setup::routes(&config, state);

    noteshare_api::setup::start_server(&config, router).await
}
