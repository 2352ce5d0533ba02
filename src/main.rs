use daily_motivations::configuration::get_configuration;
use daily_motivations::startup::Application;
use daily_motivations::telemetry::get_subscriber;
use daily_motivations::telemetry::init_subscriber;

/// Initialise telemetry, load config, and start the server
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // only logs at the specified level and higher are emitted; RUST_LOG wins
    let subscriber = get_subscriber("daily-motivations", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let cfg = get_configuration()?;
    let app = Application::build(cfg).await?;

    tracing::info!(port = app.get_port(), "listening");

    match app.run_until_stopped().await {
        Ok(()) => tracing::info!("API exited gracefully"),
        Err(e) => {
            tracing::error!(
                error.cause_chain=?e,
                error.message=%e,
                "API failed"
            );
            return Err(e.into());
        }
    }

    Ok(())
}
