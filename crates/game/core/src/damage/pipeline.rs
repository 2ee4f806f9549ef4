//! Modifier fold and staged evaluation.

use super::{DamageContext, DamagePhase};

/// Capability implemented by anything that reshapes damage.
///
/// Implementations must check `ctx.phase()` (and any other filter) on every
/// call and return `None` when they do not apply; callers never pre-filter.
pub trait DamageModifier {
    /// Returns the successor `current` value, or `None` if this modifier does
    /// not fire for `ctx`.
    fn modify_damage(&self, ctx: &DamageContext) -> Option<i32>;
}

/// Combat-engine collaborator invoked after each phase's modifiers.
///
/// This is where status multipliers and block subtraction happen; the
/// pipeline itself knows nothing about them.
pub trait StageResolver {
    /// Returns the `current` value that the next phase should start from.
    fn after_phase(&mut self, ctx: &DamageContext) -> i32 {
        ctx.current()
    }
}

/// Stage resolver that leaves every phase untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStages;

impl StageResolver for NoStages {}

/// Folds `modifiers` over `ctx` in iteration order, clamping after each step.
pub fn fold_modifiers<'a, I>(ctx: DamageContext, modifiers: I) -> DamageContext
where
    I: IntoIterator<Item = &'a dyn DamageModifier>,
{
    modifiers.into_iter().fold(ctx, |ctx, modifier| {
        match modifier.modify_damage(&ctx) {
            Some(next) => ctx.with_current(next),
            None => ctx,
        }
    })
}

/// Ordered list of modifiers evaluated for one damage event.
///
/// The caller decides the order when building the pipeline; the run state
/// registers relics (acquisition order) before faith modifiers.
#[derive(Default)]
pub struct DamagePipeline<'a> {
    modifiers: Vec<&'a dyn DamageModifier>,
}

impl<'a> DamagePipeline<'a> {
    pub fn new() -> Self {
        Self {
            modifiers: Vec::new(),
        }
    }

    /// Appends a modifier to the end of the fold order.
    pub fn push(&mut self, modifier: &'a dyn DamageModifier) {
        self.modifiers.push(modifier);
    }

    /// Appends several modifiers, preserving their order.
    pub fn extend(&mut self, modifiers: impl IntoIterator<Item = &'a dyn DamageModifier>) {
        self.modifiers.extend(modifiers);
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Folds every modifier over `ctx` at its current phase only.
    pub fn apply_phase(&self, ctx: DamageContext) -> DamageContext {
        fold_modifiers(ctx, self.modifiers.iter().copied())
    }

    /// Runs the canonical sequence from `ctx.phase()` through
    /// [`DamagePhase::Final`], handing the context to `stages` after each
    /// phase. Returns the context carrying the value for health subtraction.
    pub fn resolve(&self, ctx: DamageContext, stages: &mut dyn StageResolver) -> DamageContext {
        let start = ctx.phase();
        start.remaining().fold(ctx, |ctx, phase| {
            let ctx = self.apply_phase(ctx.at_phase(phase));
            let staged = stages.after_phase(&ctx);
            ctx.with_current(staged)
        })
    }

    /// Convenience wrapper returning only the final non-negative amount.
    pub fn final_amount(&self, ctx: DamageContext, stages: &mut dyn StageResolver) -> i32 {
        self.resolve(ctx, stages).current()
    }
}

impl core::fmt::Debug for DamagePipeline<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DamagePipeline")
            .field("modifiers", &self.modifiers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{DamageOp, DamageRule, DamageSource, DamageTarget};

    fn attack(raw: i32) -> DamageContext {
        DamageContext::new(
            DamageTarget::Enemy,
            DamageSource::PlayerAttack,
            DamagePhase::PreStatus,
            raw,
        )
    }

    struct SubtractBlock(i32);

    impl StageResolver for SubtractBlock {
        fn after_phase(&mut self, ctx: &DamageContext) -> i32 {
            if ctx.phase() == DamagePhase::PreBlock {
                let absorbed = self.0.min(ctx.current());
                self.0 -= absorbed;
                ctx.current() - absorbed
            } else {
                ctx.current()
            }
        }
    }

    #[test]
    fn empty_pipeline_returns_raw() {
        let pipeline = DamagePipeline::new();
        assert_eq!(pipeline.final_amount(attack(10), &mut NoStages), 10);
    }

    #[test]
    fn modifiers_ignore_other_phases() {
        let late = DamageRule::new(DamagePhase::PostBlock, DamageOp::Add(5));
        let mut pipeline = DamagePipeline::new();
        pipeline.push(&late);

        let only_pre = pipeline.apply_phase(attack(10));
        assert_eq!(only_pre.current(), 10);

        assert_eq!(pipeline.final_amount(attack(10), &mut NoStages), 15);
    }

    #[test]
    fn clamps_after_every_step() {
        let minus = DamageRule::new(DamagePhase::PreStatus, DamageOp::Add(-20));
        let plus = DamageRule::new(DamagePhase::PreStatus, DamageOp::Add(4));
        let mut pipeline = DamagePipeline::new();
        pipeline.extend([&minus as &dyn DamageModifier, &plus]);

        // 10 - 20 clamps to 0 before +4 sees it.
        assert_eq!(pipeline.final_amount(attack(10), &mut NoStages), 4);
    }

    #[test]
    fn stages_run_between_phases() {
        let post_block = DamageRule::new(DamagePhase::PostBlock, DamageOp::Add(1));
        let mut pipeline = DamagePipeline::new();
        pipeline.push(&post_block);

        let mut block = SubtractBlock(6);
        assert_eq!(pipeline.final_amount(attack(10), &mut block), 5);
        assert_eq!(block.0, 0);
    }

    #[test]
    fn starts_from_declared_phase() {
        let early = DamageRule::new(DamagePhase::PreStatus, DamageOp::Add(100));
        let mut pipeline = DamagePipeline::new();
        pipeline.push(&early);

        let ctx = attack(10).at_phase(DamagePhase::PostBlock);
        assert_eq!(pipeline.final_amount(ctx, &mut NoStages), 10);
    }
}
