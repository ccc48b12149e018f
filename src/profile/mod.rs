//! Accessors over a single remote profile.
//!
//! The filter only sees [`ProfileAttributes`]. [`ScreenProfile`] adapts a UI
//! automation surface and an external counter parser to it, while
//! [`ProfileSnapshot`] serves a profile captured ahead of time.

mod attributes;
mod screen;
mod snapshot;

pub use attributes::{Attribute, AttributeError, FollowCounts, ProfileAttributes};
pub use screen::{CountParser, ProfileScreen, ScreenElement, ScreenProfile, Selector};
pub use snapshot::{ProfileSnapshot, SnapshotError};
