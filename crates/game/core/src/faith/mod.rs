//! Deity affinity engine.
//!
//! Three deities are offered at run start. Each holds `0..=max_faith_points`
//! affinity points; the non-hostile deity with the most points is the focus,
//! and the focus becomes the patron once it reaches the patron threshold.
//! Temptations transfer single points between deities; the madness branch is
//! a one-shot state machine that ends in a betrayal or a bane.

mod behavior;
mod madness;
mod state;

pub use behavior::DeityBehavior;
pub use madness::{MadnessBane, MadnessBoon, MadnessOutcome, MadnessResolution, MadnessTrack};
pub use state::{FaithError, FaithState, HostileOutcome};
