//! Acceptance tests driven through the TUI event handlers.
