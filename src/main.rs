//! Scanwatch - Main application entry point
//!
//! All functionality is reached through CLI subcommands; `scanwatch serve`
//! runs the dashboard proxy server.

use scanwatch::cli::{CliApp, exit_codes};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        // Only warn if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let exit_code = match CliApp::new().await {
        Ok(app) => match app.run().await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {e:#}");
                exit_codes::INTERNAL_ERROR
            }
        },
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::INPUT_ERROR
        }
    };

    std::process::exit(exit_code);
}
