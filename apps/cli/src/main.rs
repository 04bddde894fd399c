//! # Tally Entry Point
//!
//! ```text
//! $ tally [--config tally.toml]
//!
//! === Tally: order calculator ===
//! 1) Set order name
//! 2) Add item
//! ...
//! ```
//!
//! All setup lives in `tally_cli::run` for testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match tally_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code, e);
            ExitCode::FAILURE
        }
    }
}
