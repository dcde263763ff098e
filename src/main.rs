use std::process;

use log::error;

mod app;
mod config;
mod errors;
mod form;
mod logging;
mod models;
mod services;
mod session;
mod types;
mod utils;
mod validations;

use errors::AppError;

#[tokio::main]
async fn main() {
    // Run the form tool with error handling for critical failures
    if let Err(err) = app::run().await {
        match err {
            AppError::Io(e) => {
                error!("Critical I/O error: {}", e);
                process::exit(1);
            }
            AppError::Config(e) => {
                error!("Critical configuration error: {}", e);
                process::exit(2);
            }
            AppError::Logger(e) => {
                error!("Critical logger error: {}", e);
                process::exit(3);
            }
            _ => {
                // Log unexpected errors, but don't exit
                error!("Unexpected error: {}", err);
            }
        }
    }
}
