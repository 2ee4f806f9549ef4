//! Modal decision surface.
//!
//! At most one [`Choice`] is open at a time. Two composition mechanisms sit
//! around the open slot and never mix:
//!
//! - a FIFO **queue** of independent offers shown one after another
//! - a LIFO **return stack** of parents waiting for a child dialog to finish
//!
//! Every choice travels with its typed [`ChoiceContext`] inside a
//! [`ChoiceFrame`]; the context variant decides which handler interprets the
//! selected key, so a frame restored from the stack can never be paired with
//! the wrong handler.

mod context;
pub mod keys;
mod stack;
mod types;

pub use context::{ChoiceContext, PickOrigin, PickPurpose, Pile, ShopOffer, ShopStock};
pub use stack::{
    ChoiceError, ChoiceFrame, ChoiceResolver, ChoiceStack, CloseOutcome, Dispatched, Resolution,
};
pub use types::{Choice, ChoiceKind, ChoiceOption};
