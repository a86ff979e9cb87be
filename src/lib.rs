//! # pollpad
//!
//! A terminal client for live polls: browse a poll's questions, check
//! answers within the allowed bounds, and watch the results refresh.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pollpad::{run_live, LiveConfig, PollError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PollError> {
//!     let config = LiveConfig {
//!         base_url: "https://rockin.example/api".to_string(),
//!         moderator: "7".to_string(),
//!         poll: "3".to_string(),
//!         token: "secret".to_string(),
//!     };
//!
//!     run_live(config).await
//! }
//! ```

mod client;
pub mod data;
pub mod datamodel;
pub mod logging;
pub mod network;
pub mod terminal;

use thiserror::Error;

pub use client::{run_live, run_local, LiveConfig};
pub use data::{load_poll_file, LoadError, PollFixture};
pub use datamodel::{Answer, Poll, Question};
pub use network::{NetworkError, PollApi};

/// Error type for poll client operations.
#[derive(Debug, Error)]
pub enum PollError {
    /// Error loading a fixture file.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Error talking to the backend.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// IO error during TUI execution.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
