//! One-shot madness branch.

use crate::damage::{
    DamageContext, DamageModifier, DamageOp, DamagePhase, DamageRule, DamageSource, DamageTarget,
};
use crate::effect::HookEffect;
use crate::ids::DeityId;

/// Reward for accepting the madness offer.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MadnessBoon {
    /// Player attacks deal half again as much.
    Fury,
    /// Enemy attacks lose 2 damage before block.
    Bulwark,
    /// +10 max hp immediately.
    Vigor,
}

impl MadnessBoon {
    pub const ALL: [Self; 3] = [Self::Fury, Self::Bulwark, Self::Vigor];
    pub const VIGOR_MAX_HP: u32 = 10;

    /// Permanent damage rule, if this boon has one.
    pub const fn rule(self) -> Option<DamageRule> {
        match self {
            Self::Fury => Some(
                DamageRule::new(DamagePhase::PreStatus, DamageOp::Scale { num: 3, den: 2 })
                    .for_target(DamageTarget::Enemy)
                    .for_source(DamageSource::PlayerAttack),
            ),
            Self::Bulwark => Some(
                DamageRule::new(DamagePhase::PreBlock, DamageOp::Add(-2))
                    .for_target(DamageTarget::Player)
                    .for_source(DamageSource::EnemyAttack),
            ),
            Self::Vigor => None,
        }
    }

    pub fn immediate_effects(self) -> Vec<HookEffect> {
        match self {
            Self::Vigor => vec![HookEffect::GainMaxHp(Self::VIGOR_MAX_HP)],
            Self::Fury | Self::Bulwark => Vec::new(),
        }
    }
}

impl DamageModifier for MadnessBoon {
    fn modify_damage(&self, ctx: &DamageContext) -> Option<i32> {
        self.rule()?.modify_damage(ctx)
    }
}

/// Penalty for rejecting the madness offer.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MadnessBane {
    /// Enemy attacks deal 2 more damage.
    Frailty,
    /// Fatigue damage is doubled.
    Dread,
    /// Half of the current gold is lost immediately.
    Poverty,
}

impl MadnessBane {
    pub const ALL: [Self; 3] = [Self::Frailty, Self::Dread, Self::Poverty];

    pub const fn rule(self) -> Option<DamageRule> {
        match self {
            Self::Frailty => Some(
                DamageRule::new(DamagePhase::PreStatus, DamageOp::Add(2))
                    .for_target(DamageTarget::Player)
                    .for_source(DamageSource::EnemyAttack),
            ),
            Self::Dread => Some(
                DamageRule::new(DamagePhase::PreStatus, DamageOp::Scale { num: 2, den: 1 })
                    .for_target(DamageTarget::Player)
                    .for_source(DamageSource::Fatigue),
            ),
            Self::Poverty => None,
        }
    }

    pub fn immediate_effects(self, gold: u32) -> Vec<HookEffect> {
        match self {
            Self::Poverty if gold > 1 => vec![HookEffect::LoseGold(gold / 2)],
            _ => Vec::new(),
        }
    }
}

impl DamageModifier for MadnessBane {
    fn modify_damage(&self, ctx: &DamageContext) -> Option<i32> {
        self.rule()?.modify_damage(ctx)
    }
}

/// How the madness offer was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MadnessOutcome {
    Accepted(MadnessBoon),
    Rejected(MadnessBane),
}

/// One-shot madness state machine.
///
/// `Dormant → Awakened → Offered → Consumed`. `Consumed` is terminal, so the
/// offer can never recur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MadnessTrack {
    #[default]
    Dormant,
    /// The trigger fired; the offer has not been shown yet.
    Awakened,
    Offered {
        boon: MadnessBoon,
        bane: MadnessBane,
    },
    Consumed(MadnessOutcome),
}

impl MadnessTrack {
    /// Fires the external trigger. Returns false if it already fired.
    pub fn awaken(&mut self) -> bool {
        if *self != Self::Dormant {
            return false;
        }
        *self = Self::Awakened;
        true
    }

    pub fn should_offer(&self) -> bool {
        *self == Self::Awakened
    }

    /// Marks the offer as shown. Returns false unless the track is awakened.
    pub fn take_offer(&mut self, boon: MadnessBoon, bane: MadnessBane) -> bool {
        if !self.should_offer() {
            return false;
        }
        *self = Self::Offered { boon, bane };
        true
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed(_))
    }

    /// True once the offer was rejected: the track itself is hostile.
    pub fn is_hostile(&self) -> bool {
        matches!(self, Self::Consumed(MadnessOutcome::Rejected(_)))
    }

    pub fn outcome(&self) -> Option<MadnessOutcome> {
        match self {
            Self::Consumed(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// The boon or bane modifier in effect after consumption.
    pub fn modifier(&self) -> Option<&dyn DamageModifier> {
        match self {
            Self::Consumed(MadnessOutcome::Accepted(boon)) => Some(boon),
            Self::Consumed(MadnessOutcome::Rejected(bane)) => Some(bane),
            _ => None,
        }
    }

    pub(super) fn consume(&mut self, outcome: MadnessOutcome) -> bool {
        if !matches!(self, Self::Awakened | Self::Offered { .. }) {
            return false;
        }
        *self = Self::Consumed(outcome);
        true
    }
}

/// Result of accepting or rejecting the madness offer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MadnessResolution {
    pub outcome: MadnessOutcome,
    /// Immediate effects (fatigue cost, boon or bane side effects).
    pub effects: Vec<HookEffect>,
    /// Deity that turned hostile because of the betrayal, if it was not
    /// hostile before. Its one-time hostility effects are still owed.
    pub betrayed: Option<DeityId>,
}
