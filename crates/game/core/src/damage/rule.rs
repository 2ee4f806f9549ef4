//! Data-driven damage modifier.

use super::{DamageContext, DamageModifier, DamagePhase, DamageSource, DamageTarget};

/// Arithmetic applied to `current` when a [`DamageRule`] fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOp {
    /// `current + amount`
    Add(i32),
    /// `current * num / den` (integer division). A zero `den` never fires.
    Scale { num: i32, den: i32 },
    /// Replaces `current` outright.
    Set(i32),
}

impl DamageOp {
    pub fn apply(self, current: i32) -> Option<i32> {
        match self {
            DamageOp::Add(amount) => Some(current.saturating_add(amount)),
            DamageOp::Scale { num, den } => current.saturating_mul(num).checked_div(den),
            DamageOp::Set(value) => Some(value),
        }
    }
}

/// A single phase-scoped modifier with optional target/source/reason filters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRule {
    pub phase: DamagePhase,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<DamageTarget>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<DamageSource>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reason: Option<String>,
    pub op: DamageOp,
}

impl DamageRule {
    pub const fn new(phase: DamagePhase, op: DamageOp) -> Self {
        Self {
            phase,
            target: None,
            source: None,
            reason: None,
            op,
        }
    }

    #[must_use]
    pub const fn for_target(mut self, target: DamageTarget) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub const fn for_source(mut self, source: DamageSource) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn for_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns true if every filter accepts `ctx`.
    pub fn matches(&self, ctx: &DamageContext) -> bool {
        self.phase == ctx.phase()
            && self.target.is_none_or(|target| target == ctx.target())
            && self.source.is_none_or(|source| source == ctx.source())
            && self
                .reason
                .as_deref()
                .is_none_or(|reason| ctx.reason() == Some(reason))
    }
}

impl DamageModifier for DamageRule {
    fn modify_damage(&self, ctx: &DamageContext) -> Option<i32> {
        if !self.matches(ctx) {
            return None;
        }
        self.op.apply(ctx.current())
    }
}

impl DamageModifier for Vec<DamageRule> {
    fn modify_damage(&self, ctx: &DamageContext) -> Option<i32> {
        let mut fired = false;
        let mut current = ctx.current();
        for rule in self {
            if let Some(next) = rule.modify_damage(&ctx.with_current(current)) {
                current = next.max(0);
                fired = true;
            }
        }
        fired.then_some(current)
    }
}
