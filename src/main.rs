use std::process::ExitCode;

use tracing::{error, info};

use quillpost::db::seed_demo_users;
use quillpost::{Config, Database, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let mut config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = quillpost::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        quillpost::logging::init_console_only(&config.logging.level);
    }

    info!("Quillpost starting");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> quillpost::Result<()> {
    let db = Database::open(&config.database.path).await?;

    if config.database.seed_demo_users {
        let created = seed_demo_users(&db, &config.auth.work_factor()).await?;
        info!("Seeded {} demo users", created);
    }

    let server = WebServer::new(&config, db)?;
    info!("Server configured on {}", server.addr());

    server.run().await?;
    Ok(())
}
