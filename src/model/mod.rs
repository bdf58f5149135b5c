//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod feed;
pub mod key_action;
pub mod layout_mode;
pub mod viewport;

// Re-export for convenience
pub use error::{FeedError, RefreshError};
pub use feed::{FeedItem, load_feed, sample_feed};
pub use key_action::KeyAction;
pub use layout_mode::{Breakpoints, DeviceFacets, InvalidBreakpoints, LayoutMode, resolve};
pub use viewport::{Orientation, StaticViewport, ViewportProvider, ViewportState};
