//! CLI Commands Module
//!
//! This module contains all CLI subcommand implementations.

pub mod findings;
pub mod list;
pub mod remove;
pub mod scan;
pub mod serve;
pub mod watch;

use crate::application::errors::BackendError;
use crate::cli::exit_codes;

/// Exit code a command reports for a backend error
pub(crate) fn backend_exit_code(error: &BackendError) -> i32 {
    if error.is_network() {
        exit_codes::NETWORK_ERROR
    } else {
        exit_codes::BACKEND_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_map_to_backend_exit_code() {
        let api = BackendError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(backend_exit_code(&api), exit_codes::BACKEND_ERROR);
    }
}
