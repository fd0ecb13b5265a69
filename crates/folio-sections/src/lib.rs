//! Section descriptors and active section tracking.
//!
//! A page declares an ordered list of [`SectionDescriptor`]s. They drive both
//! the "On this page" sidebar and the [`SectionTracker`], which decides which
//! section is currently in view from region geometry reported by the host.
//!
//! # Example
//!
//! ```
//! use folio_sections::{RegionRect, SectionTracker};
//!
//! let mut tracker = SectionTracker::new(["intro", "install"]);
//! assert_eq!(tracker.active_id(), Some("intro"));
//!
//! // Viewport 1000 high: the band spans [80, 300).
//! tracker.observe(
//!     &[RegionRect::new("intro", -400.0, -10.0), RegionRect::new("install", 120.0, 900.0)],
//!     1000.0,
//! );
//! assert_eq!(tracker.active_id(), Some("install"));
//! ```

mod address;
mod tracker;

pub use address::{Address, SectionDescriptor};
pub use tracker::{RegionRect, SectionTracker, TieBreak, Transition, ViewportBand};
