//! pullpane: responsive layout container with pull-to-refresh.
//!
//! Pure Core / Impure Shell: `model`, `state` and `view_state` are pure and
//! testable without a terminal; `view` is the ratatui shell that maps
//! terminal input onto the container.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
