//! A spinning vinyl-disc widget for druid.
//!
//! [`DiscWidget`] paints the record and runs the ambient spin; interaction
//! is layered on with druid controllers: [`DragController`] for DJ-style
//! manual rotation with an inertial settle, [`BoostController`] for a
//! temporary speed-up driven by the host (mint progress). Hosts plug in by
//! implementing the small data-access traits ([`SpinData`], [`BoostData`],
//! [`CelebrationData`]) on their app state.

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Modules
///
///////////////////////////////////////////////////////////////////////////////////////////////////
pub mod boost;
pub mod confetti;
pub mod disc;
pub mod dragging;
pub mod easing;
pub mod geometry;
pub mod onchain;
pub mod spinning;

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Re-exports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
pub use boost::{BoostController, BoostData, BoostProfile, AMBIENT_DISC, PREVIEW_SPINNER};
pub use confetti::{CelebrationData, ConfettiBurst};
pub use disc::DiscWidget;
pub use dragging::DragController;
pub use easing::{SpinEasing, EASING_FACTOR, SETTLE_EPSILON};
pub use geometry::{pointer_angle, wrap_degrees};
pub use spinning::{SpinData, SpinState, RESTING_PERIOD};
