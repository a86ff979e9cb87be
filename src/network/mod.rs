//! HTTP access to the poll backend.

mod api;
mod error;

pub use api::PollApi;
pub use error::NetworkError;
