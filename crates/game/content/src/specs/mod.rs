//! Content specs implementing the core capability traits.

mod deity;
mod effects;
mod relic;

pub use deity::DeitySpec;
pub use effects::{CardTrigger, EffectList};
pub use relic::RelicSpec;
