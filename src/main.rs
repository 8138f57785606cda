use std::process::ExitCode;

use tokio::net::TcpListener;

use washbay_status::{config, db, observability, AppConfig, HttpServer};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = config::load_from_env();
    observability::logging::init(config.as_ref().map(|c| c.dev).unwrap_or(false));

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(err = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.port,
        dev = config.dev,
        "washbay status api starting"
    );

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(err = %err, "fatal");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pool = db::open_pool(&config.database_url).await?;

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;

    let server = HttpServer::new(config, pool);
    server.run(listener).await?;

    Ok(())
}
