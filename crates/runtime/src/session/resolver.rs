//! Per-kind choice handlers.
//!
//! [`SessionResolver`] binds the run state and content to
//! [`ChoiceStack::dispatch`](game_core::ChoiceStack::dispatch). Each handler
//! validates everything it needs before its first mutation, so a rejected key
//! leaves the run exactly as it was.

use game_core::choice::keys;
use game_core::{
    CardId, CardTag, ChoiceContext, ChoiceFrame, ChoiceKind, ChoiceResolver, DeckError, DeityId,
    EventFollowUp, EventId, GameEnv, GrantOutcome, HookEffect, MadnessBane, MadnessBoon, NodeId,
    PickOrigin, PickPurpose, ProgressCounter, RelicError, RelicId, RelicSource, Resolution,
    ResourceError, RunState, ShopStock,
};
use tracing::{debug, info};

use super::frames;
use crate::api::{Result, RuntimeError};

pub(crate) struct SessionResolver<'s, 'e> {
    state: &'s mut RunState,
    env: &'s GameEnv<'e>,
}

impl<'s, 'e> SessionResolver<'s, 'e> {
    pub(crate) fn new(state: &'s mut RunState, env: &'s GameEnv<'e>) -> Self {
        Self { state, env }
    }

    fn ensure_affordable(&self, price: u32) -> Result<()> {
        let available = self.state.resources.gold;
        if self.state.resources.can_afford(price) {
            Ok(())
        } else {
            Err(ResourceError::InsufficientGold {
                required: price,
                available,
            }
            .into())
        }
    }

    fn apply(&mut self, effects: Vec<HookEffect>) -> Result<()> {
        let deferred = self.state.apply_effects(effects, self.env)?;
        if !deferred.is_empty() {
            debug!(
                target: "runtime::choice",
                ?deferred,
                "combat effects outside combat were dropped"
            );
        }
        Ok(())
    }

    fn grant(&mut self, relic: &RelicId, source: RelicSource) -> Result<()> {
        match self.state.grant_relic(relic, source, self.env)? {
            GrantOutcome::Activated(_) => {
                info!(target: "runtime::relic", relic = %relic, %source, "relic granted and active");
            }
            GrantOutcome::Dormant => {
                info!(target: "runtime::relic", relic = %relic, %source, "relic granted, waiting to unlock");
            }
            GrantOutcome::AlreadyOwned => {
                debug!(target: "runtime::relic", relic = %relic, "relic already owned");
            }
        }
        Ok(())
    }

    fn invalid(kind: ChoiceKind, key: &str) -> RuntimeError {
        RuntimeError::InvalidSelection {
            kind,
            key: key.to_owned(),
        }
    }

    // ===== handlers =====

    fn god_choice(&mut self, offered: &[DeityId], key: &str) -> Result<Resolution> {
        let Some(id) = keys::value(key, keys::DEITY) else {
            return Ok(Resolution::Unhandled);
        };
        let deity = DeityId::new(id);
        if !offered.contains(&deity) {
            return Err(Self::invalid(ChoiceKind::GodChoice, key));
        }
        self.state.faith.choose(&deity, self.env.config())?;
        info!(target: "runtime::faith", deity = %deity, "patron chosen");
        Ok(Resolution::Close)
    }

    fn rest(&mut self, high_fatigue: bool, key: &str) -> Result<Resolution> {
        let config = self.env.config();
        match key {
            keys::HEAL => {
                let healed = self
                    .state
                    .resources
                    .heal_percent(config.rest_heal_percent);
                self.state.record(ProgressCounter::RestsTaken);
                debug!(target: "runtime::choice", healed, "rested");
                Ok(Resolution::Close)
            }
            keys::UPGRADE => Ok(Resolution::Open(frames::upgrade_pick(
                PickOrigin::Rest,
                self.state,
                self.env,
            )?)),
            keys::RECOVER if high_fatigue => {
                self.state
                    .resources
                    .reduce_fatigue(config.rest_fatigue_recovery);
                self.state.record(ProgressCounter::RestsTaken);
                Ok(Resolution::Close)
            }
            keys::LEAVE => Ok(Resolution::Close),
            _ => Ok(Resolution::Unhandled),
        }
    }

    fn event(&mut self, event: &EventId, key: &str) -> Result<Resolution> {
        let definition = self
            .env
            .events()?
            .event(event)
            .ok_or_else(|| RuntimeError::UnknownEvent(event.clone()))?;
        let Some(option) = definition.option(key) else {
            return Ok(Resolution::Unhandled);
        };

        if let Some(relic) = &option.grant_relic {
            if self.env.relics()?.relic(relic).is_none() {
                return Err(RelicError::UnknownRelic(relic.clone()).into());
            }
            // An owned relic cannot be granted twice.
            if self.state.relics.owns(relic) {
                return Err(Self::invalid(ChoiceKind::Event, key));
            }
        }
        let follow_up = match option.follow_up {
            Some(EventFollowUp::UpgradeCard) => Some(frames::upgrade_pick(
                PickOrigin::Event,
                self.state,
                self.env,
            )?),
            Some(EventFollowUp::RemoveCard) => Some(frames::remove_pick(
                PickOrigin::Event,
                self.state,
                self.env,
            )?),
            Some(EventFollowUp::DuplicateCard) => Some(frames::pick_card(
                PickPurpose::Duplicate,
                self.state,
                self.env,
            )?),
            None => None,
        };
        if option.cost_gold > 0 {
            self.state.resources.spend_gold(option.cost_gold)?;
        }

        self.apply(option.effects.clone())?;
        if let Some(relic) = &option.grant_relic {
            self.grant(relic, RelicSource::Event)?;
        }
        if key != keys::LEAVE {
            self.state.record(ProgressCounter::EventPicks);
        }
        info!(target: "runtime::choice", event = %event, option = key, "event option taken");

        Ok(match follow_up {
            Some(frame) => Resolution::Replace(frame),
            None => Resolution::Close,
        })
    }

    fn shop(&mut self, node: NodeId, stock: &ShopStock, key: &str) -> Result<Resolution> {
        if let Some(index) = keys::index(key, keys::BUY) {
            let offer = stock
                .offers
                .get(index)
                .filter(|offer| !offer.sold)
                .ok_or_else(|| Self::invalid(ChoiceKind::Shop, key))?;
            if self.env.cards()?.card(&offer.card).is_none() {
                return Err(DeckError::UnknownCard(offer.card.clone()).into());
            }

            self.state.resources.spend_gold(offer.price)?;
            self.state.add_card(&offer.card, self.env)?;
            self.state.record(ProgressCounter::ShopPurchases);
            info!(target: "runtime::choice", card = %offer.card, price = offer.price, "card bought");

            let mut stock = stock.clone();
            stock.offers[index].sold = true;
            return Ok(Resolution::Replace(frames::shop(node, stock, self.env)?));
        }

        match key {
            keys::UPGRADE => {
                self.ensure_affordable(stock.upgrade_price)?;
                let origin = PickOrigin::Shop {
                    price: stock.upgrade_price,
                };
                Ok(Resolution::Open(frames::upgrade_pick(
                    origin, self.state, self.env,
                )?))
            }
            keys::REMOVE => {
                self.ensure_affordable(stock.remove_price)?;
                let origin = PickOrigin::Shop {
                    price: stock.remove_price,
                };
                Ok(Resolution::Open(frames::remove_pick(
                    origin, self.state, self.env,
                )?))
            }
            keys::LEAVE => Ok(Resolution::Close),
            _ => Ok(Resolution::Unhandled),
        }
    }

    fn reward(&mut self, cards: &[CardId], key: &str) -> Result<Resolution> {
        if key == keys::SKIP {
            return Ok(Resolution::Close);
        }
        let Some(index) = keys::index(key, keys::CARD) else {
            return Ok(Resolution::Unhandled);
        };
        let card = cards
            .get(index)
            .ok_or_else(|| Self::invalid(ChoiceKind::Reward, key))?;
        self.state.add_card(card, self.env)?;
        info!(target: "runtime::choice", card = %card, "reward card taken");
        Ok(Resolution::Close)
    }

    fn relic_offer(
        &mut self,
        relics: &[RelicId],
        source: RelicSource,
        key: &str,
    ) -> Result<Resolution> {
        if key == keys::SKIP {
            return Ok(Resolution::Close);
        }
        let Some(index) = keys::index(key, keys::RELIC) else {
            return Ok(Resolution::Unhandled);
        };
        let relic = relics
            .get(index)
            .ok_or_else(|| Self::invalid(ChoiceKind::RelicOffer, key))?;
        self.grant(relic, source)?;
        Ok(Resolution::Close)
    }

    fn upgrade_pick(&mut self, origin: PickOrigin, key: &str) -> Result<Resolution> {
        if key == keys::CANCEL {
            return Ok(Resolution::Close);
        }
        let Some(index) = keys::index(key, keys::CARD) else {
            return Ok(Resolution::Unhandled);
        };
        if !self.state.can_upgrade(index, self.env)? {
            return Err(DeckError::NotUpgradeable(index).into());
        }

        let resolution = match origin {
            PickOrigin::Shop { price } => {
                self.state.resources.spend_gold(price)?;
                self.state.record(ProgressCounter::ShopPurchases);
                Resolution::Close
            }
            PickOrigin::Rest => {
                self.state.record(ProgressCounter::RestsTaken);
                // The pick completes the rest site as well.
                Resolution::Unwind(2)
            }
            PickOrigin::Event => Resolution::Close,
        };
        self.state.upgrade_card(index, self.env)?;
        info!(target: "runtime::choice", index, ?origin, "card upgraded");
        Ok(resolution)
    }

    fn remove_pick(&mut self, origin: PickOrigin, key: &str) -> Result<Resolution> {
        if key == keys::CANCEL {
            return Ok(Resolution::Close);
        }
        let Some(index) = keys::index(key, keys::CARD) else {
            return Ok(Resolution::Unhandled);
        };
        self.state.card(index)?;

        if let PickOrigin::Shop { price } = origin {
            self.state.resources.spend_gold(price)?;
            self.state.record(ProgressCounter::ShopPurchases);
        }
        let removed = self.state.remove_card(index)?;
        info!(target: "runtime::choice", card = %removed.card, ?origin, "card removed");
        Ok(Resolution::Close)
    }

    fn god_tempt(&mut self, tempter: &DeityId, key: &str) -> Result<Resolution> {
        match key {
            keys::ACCEPT => {
                let moved = self
                    .state
                    .faith
                    .accept_temptation(tempter, self.env.config());
                info!(
                    target: "runtime::faith",
                    tempter = %tempter,
                    moved,
                    focus = ?self.state.faith.focus(),
                    "temptation accepted"
                );
                Ok(Resolution::Close)
            }
            keys::REFUSE => Ok(Resolution::Close),
            _ => Ok(Resolution::Unhandled),
        }
    }

    fn madness(&mut self, boon: MadnessBoon, bane: MadnessBane, key: &str) -> Result<Resolution> {
        let resolution = match key {
            keys::ACCEPT => self.state.accept_madness(boon, self.env)?,
            keys::REJECT => self.state.reject_madness(bane, self.env)?,
            _ => return Ok(Resolution::Unhandled),
        };
        info!(
            target: "runtime::faith",
            outcome = ?resolution.outcome,
            betrayed = ?resolution.betrayed,
            "madness resolved"
        );
        Ok(Resolution::Close)
    }

    fn synth_pick(&mut self, first: Option<usize>, key: &str) -> Result<Resolution> {
        if key == keys::CANCEL {
            return Ok(Resolution::Close);
        }
        let Some(index) = keys::index(key, keys::CARD) else {
            return Ok(Resolution::Unhandled);
        };
        self.state.card(index)?;

        let next = match first {
            None => frames::synth_pick(Some(index), self.state, self.env)?,
            Some(first) if first == index => return Err(DeckError::SameCard(index).into()),
            Some(first) => frames::synth_tag(first, index, self.state)?,
        };
        Ok(Resolution::Open(next))
    }

    fn synth_tag(
        &mut self,
        first: usize,
        second: usize,
        tags: &[CardTag],
        key: &str,
    ) -> Result<Resolution> {
        if key == keys::CANCEL {
            return Ok(Resolution::Close);
        }
        let Some(name) = keys::value(key, keys::TAG) else {
            return Ok(Resolution::Unhandled);
        };
        let tag: CardTag = name
            .parse()
            .map_err(|_| Self::invalid(ChoiceKind::SynthTag, key))?;
        if !tags.contains(&tag) || !self.state.card(first)?.synthesis_candidates().contains(&tag)
        {
            return Err(DeckError::InvalidSynthesisTag(tag).into());
        }
        self.state.card(second)?;

        self.state.resources.spend_gold(self.env.config().synth_price)?;
        let survivor = self.state.synthesize(first, second, tag)?;
        self.state.record(ProgressCounter::Synthesized);
        info!(target: "runtime::choice", survivor, %tag, "cards synthesized");
        // Closes the tag pick and both card picks.
        Ok(Resolution::Unwind(3))
    }

    fn pick_card(&mut self, purpose: PickPurpose, key: &str) -> Result<Resolution> {
        let Some(index) = keys::index(key, keys::CARD) else {
            return Ok(Resolution::Unhandled);
        };
        match purpose {
            PickPurpose::Duplicate => self.state.duplicate_card(index)?,
        }
        Ok(Resolution::Close)
    }
}

impl ChoiceResolver for SessionResolver<'_, '_> {
    type Error = RuntimeError;

    fn resolve(&mut self, frame: &ChoiceFrame, key: &str) -> Result<Resolution> {
        match &frame.context {
            ChoiceContext::GodChoice { offered } => self.god_choice(offered, key),
            ChoiceContext::Rest { high_fatigue } => self.rest(*high_fatigue, key),
            ChoiceContext::Event { event } => self.event(event, key),
            ChoiceContext::Shop { node, stock } => self.shop(*node, stock, key),
            ChoiceContext::Reward { cards } => self.reward(cards, key),
            ChoiceContext::RelicOffer { relics, source } => {
                self.relic_offer(relics, *source, key)
            }
            ChoiceContext::UpgradePick { origin } => self.upgrade_pick(*origin, key),
            ChoiceContext::RemovePick { origin } => self.remove_pick(*origin, key),
            ChoiceContext::GodTempt { tempter } => self.god_tempt(tempter, key),
            ChoiceContext::MadnessTempt { boon, bane } => self.madness(*boon, *bane, key),
            ChoiceContext::SynthPick { first } => self.synth_pick(*first, key),
            ChoiceContext::SynthTag {
                first,
                second,
                tags,
            } => self.synth_tag(*first, *second, tags, key),
            ChoiceContext::PickCard { purpose } => self.pick_card(*purpose, key),
            ChoiceContext::ViewPile { .. } if key == keys::CLOSE => Ok(Resolution::Close),
            ChoiceContext::ViewPile { .. } => Ok(Resolution::Unhandled),
        }
    }
}
