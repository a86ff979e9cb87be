//! Poll client: session state, background refresh, and the TUI.

mod client;
mod refresh;
mod session;
mod ui;

pub use client::{run_live, run_local, LiveConfig};
