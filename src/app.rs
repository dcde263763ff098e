use std::io::{stdin, stdout};

use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment},
    errors::AppError,
    form::Form,
    logging::LogClient,
    services,
};

// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> Result<(), AppError> {
    // Configure log level based on environment and config
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,reqwest=info".to_string(),
        Environment::Production => "info,reqwest=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

pub async fn run() -> AppResult<()> {
    // Load application configuration
    let config = Config::load()?;

    // Setup enhanced logging based on configuration
    setup_logging(&config)?;

    // Log startup information
    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Session limits: {} rows per batch, {}-char generated codes, {} min default validity",
        config.shortener.max_batch_rows,
        config.shortener.code_length,
        config.shortener.default_validity_minutes
    );

    if config.app.environment == Environment::Development {
        debug!("Debug logging enabled");
        debug!("Full configuration: {:?}", config);
    }

    // Wire up the in-memory session, shortener service, and log client
    let service = services::build(&config.shortener);
    let logger = LogClient::new(&config.log_api);
    if logger.is_enabled() {
        info!("Remote log endpoint configured");
    }
    let form = Form::new(&service, &logger, &config.shortener);

    // Run the interactive form over stdin/stdout; the session is discarded
    // when the loop ends
    let stdin = stdin();
    let mut input = stdin.lock();
    let mut out = stdout();

    form.run(&mut input, &mut out).await?;

    info!("Session ended");
    Ok(())
}
