use stockdesk::app::{events, App};
use stockdesk::core::ClientConfig;
use stockdesk::debug::{init_logger, LogConfig};

#[tokio::main]
async fn main() {
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let _log_guard = match init_logger(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = events::spawn_stdin_reader(app.event_sender()) {
        tracing::error!(error = %e, "Could not start the input reader");
        eprintln!("Could not read input: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = app.run().await {
        tracing::error!(error = %e, "Terminal exited with an error");
        eprintln!("{}", e);
    }
}
