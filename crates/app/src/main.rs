//! Order composer entry point.
//!
//! Reads one request as JSON from stdin (an order attempt or a customer
//! registration) and prints the result or the rejection as JSON on stdout.

use std::io::Read;
use std::process::ExitCode;

use app::config::Config;
use app::error::AppError;

async fn run(config: &Config) -> Result<ExitCode, AppError> {
    let catalog = app::load_catalog(config)?;
    let state = app::create_state(config, catalog);

    let mut request = String::new();
    std::io::stdin()
        .read_to_string(&mut request)
        .map_err(|source| AppError::Io {
            path: "<stdin>".into(),
            source,
        })?;

    let outcome = app::handle_request(&state, &request).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(ExitCode::from(outcome.exit_status()))
}

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    // 2. Initialize tracing
    app::init_tracing(&config);
    tracing::info!(policy = %config.stock_policy, "starting order composer");

    // 3. Install Prometheus metrics recorder
    let metrics_handle = match app::install_metrics() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(error = %err, "metrics disabled");
            None
        }
    };

    // 4. Handle the request
    let code = match run(&config).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "order composer failed");
            let body = serde_json::json!({ "error": err.to_string() });
            println!("{body}");
            ExitCode::FAILURE
        }
    };

    // 5. Flush metrics
    if let (Some(handle), Some(path)) = (&metrics_handle, &config.metrics_path) {
        if let Err(err) = app::write_metrics(handle, path) {
            tracing::warn!(error = %err, "failed to write metrics");
        }
    }

    code
}
