//! Scroll triggered reveal animations, independent of the DOM.
//!
//! Components feed element positions and timestamps in, and render the
//! style snapshots and text frames that come out.

pub mod config;
pub mod context;
pub mod counter;
pub mod decrypt;
pub mod easing;
pub mod reveal;
pub mod split;
pub mod stagger;
pub mod viewport;

pub use config::{
    ActionParseError, AnimationConfig, CrossingAction, CrossingTimings, Direction,
    MarginParseError, PhaseTiming, ToggleActions, TriggerMargin, TriggerMode,
};
pub use context::AnimationContext;
pub use counter::{CountUp, CountUpError};
pub use decrypt::{DecryptOptions, DecryptionSession, RevealDirection};
pub use easing::Easing;
pub use reveal::{RevealMachine, RevealState, StyleSnapshot};
pub use split::{SplitError, SplitMode, SplitText};
pub use stagger::{stagger_offsets, StaggerGroup};
pub use viewport::{Crossing, ElementBounds, ObserverRegistry, Subscription, VisibilityDetector};
