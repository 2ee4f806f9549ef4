//! Builders for the choice frames a session opens.
//!
//! Every builder validates what it shows: a pick with nothing to pick from is
//! reported as [`RuntimeError::Unavailable`] instead of opening an empty
//! choice.

use game_core::choice::keys;
use game_core::{
    CardId, CardInstance, ChoiceContext, ChoiceFrame, ChoiceOption, DeityId, EventDefinition,
    GameEnv, MadnessBane, MadnessBoon, NodeId, PickOrigin, PickPurpose, Pile, RelicError, RelicId,
    RelicSource, RunState, ShopStock,
};

use crate::api::{Result, RuntimeError};

fn card_name(id: &CardId, env: &GameEnv<'_>) -> Result<String> {
    Ok(env
        .cards()?
        .card(id)
        .map(|definition| definition.name)
        .unwrap_or_else(|| id.to_string()))
}

fn card_option(index: usize, card: &CardInstance, env: &GameEnv<'_>) -> Result<ChoiceOption> {
    let mut label = card_name(&card.card, env)?;
    if card.upgraded {
        label.push('+');
    }
    let mut option = ChoiceOption::new(keys::keyed(keys::CARD, index), label)
        .with_entity(card.card.as_str());
    if !card.tags.is_empty() {
        let tags: Vec<&str> = card.tags.iter().map(AsRef::as_ref).collect();
        option = option.with_detail(tags.join(", "));
    }
    Ok(option)
}

fn deck_options(
    state: &RunState,
    env: &GameEnv<'_>,
    include: impl Fn(usize) -> bool,
) -> Result<Vec<ChoiceOption>> {
    state
        .deck
        .iter()
        .enumerate()
        .filter(|(index, _)| include(*index))
        .map(|(index, card)| card_option(index, card, env))
        .collect()
}

fn deity_name(id: &DeityId, env: &GameEnv<'_>) -> Result<String> {
    env.deities()?
        .deity(id)
        .map(|deity| deity.name().to_owned())
        .ok_or_else(|| RuntimeError::UnknownDeity(id.clone()))
}

pub(crate) fn god_choice(offered: &[DeityId], env: &GameEnv<'_>) -> Result<ChoiceFrame> {
    let options = offered
        .iter()
        .map(|id| {
            Ok(ChoiceOption::new(keys::keyed(keys::DEITY, id), deity_name(id, env)?)
                .with_entity(id.as_str()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ChoiceFrame::new(
        ChoiceContext::GodChoice {
            offered: offered.to_vec(),
        },
        "Choose Your Patron",
        "Three gods watch your descent. One will walk with you.",
        options,
    ))
}

pub(crate) fn rest(state: &RunState, env: &GameEnv<'_>) -> ChoiceFrame {
    let config = env.config();
    let high_fatigue = state.resources.is_high_fatigue(config);

    let mut options = vec![
        ChoiceOption::new(keys::HEAL, "Rest")
            .with_detail(format!("Heal {}% of max hp.", config.rest_heal_percent)),
        ChoiceOption::new(keys::UPGRADE, "Smith").with_detail("Upgrade a card."),
    ];
    if high_fatigue {
        options.push(
            ChoiceOption::new(keys::RECOVER, "Recover")
                .with_detail(format!("Remove {} fatigue.", config.rest_fatigue_recovery)),
        );
    }
    options.push(ChoiceOption::new(keys::LEAVE, "Leave"));

    ChoiceFrame::new(
        ChoiceContext::Rest { high_fatigue },
        "Campfire",
        "The fire crackles. You have time for one thing.",
        options,
    )
}

pub(crate) fn event(definition: &EventDefinition) -> ChoiceFrame {
    let options = definition.options.iter().map(|option| {
        let choice = ChoiceOption::new(option.key.as_str(), option.label.as_str());
        match &option.detail {
            Some(detail) => choice.with_detail(detail.as_str()),
            None => choice,
        }
    });

    ChoiceFrame::new(
        ChoiceContext::Event {
            event: definition.id.clone(),
        },
        definition.title.as_str(),
        definition.prompt.as_str(),
        options,
    )
}

pub(crate) fn shop(node: NodeId, stock: ShopStock, env: &GameEnv<'_>) -> Result<ChoiceFrame> {
    let mut options = Vec::new();
    for (index, offer) in stock.offers.iter().enumerate() {
        if offer.sold {
            continue;
        }
        options.push(
            ChoiceOption::new(keys::keyed(keys::BUY, index), card_name(&offer.card, env)?)
                .with_detail(format!("{} gold", offer.price))
                .with_entity(offer.card.as_str()),
        );
    }
    options.push(
        ChoiceOption::new(keys::UPGRADE, "Upgrade a card")
            .with_detail(format!("{} gold", stock.upgrade_price)),
    );
    options.push(
        ChoiceOption::new(keys::REMOVE, "Remove a card")
            .with_detail(format!("{} gold", stock.remove_price)),
    );
    options.push(ChoiceOption::new(keys::LEAVE, "Leave"));

    Ok(ChoiceFrame::new(
        ChoiceContext::Shop { node, stock },
        "Merchant",
        "Cards and services, for a price.",
        options,
    ))
}

pub(crate) fn reward(cards: Vec<CardId>, env: &GameEnv<'_>) -> Result<ChoiceFrame> {
    let mut options = Vec::with_capacity(cards.len() + 1);
    for (index, card) in cards.iter().enumerate() {
        options.push(
            ChoiceOption::new(keys::keyed(keys::CARD, index), card_name(card, env)?)
                .with_entity(card.as_str()),
        );
    }
    options.push(ChoiceOption::new(keys::SKIP, "Skip"));

    Ok(ChoiceFrame::new(
        ChoiceContext::Reward { cards },
        "Spoils",
        "Add a card to your deck.",
        options,
    ))
}

pub(crate) fn relic_offer(
    relics: Vec<RelicId>,
    source: RelicSource,
    env: &GameEnv<'_>,
) -> Result<ChoiceFrame> {
    let oracle = env.relics()?;
    let mut options = Vec::with_capacity(relics.len() + 1);
    for (index, id) in relics.iter().enumerate() {
        let relic = oracle
            .relic(id)
            .ok_or_else(|| RelicError::UnknownRelic(id.clone()))?;
        options.push(
            ChoiceOption::new(keys::keyed(keys::RELIC, index), relic.name())
                .with_entity(id.as_str()),
        );
    }
    options.push(ChoiceOption::new(keys::SKIP, "Skip"));

    Ok(ChoiceFrame::new(
        ChoiceContext::RelicOffer { relics, source },
        "Relic",
        "Something glints among the remains.",
        options,
    ))
}

pub(crate) fn upgrade_pick(
    origin: PickOrigin,
    state: &RunState,
    env: &GameEnv<'_>,
) -> Result<ChoiceFrame> {
    let eligible = state.upgradeable_cards(env)?;
    if eligible.is_empty() {
        return Err(RuntimeError::Unavailable("no card can be upgraded"));
    }
    let mut options = deck_options(state, env, |index| eligible.contains(&index))?;
    if let PickOrigin::Shop { price } = origin {
        for option in &mut options {
            option.detail = Some(format!("{price} gold"));
        }
    }
    if origin != PickOrigin::Event {
        options.push(ChoiceOption::new(keys::CANCEL, "Cancel"));
    }

    Ok(ChoiceFrame::new(
        ChoiceContext::UpgradePick { origin },
        "Upgrade",
        "Choose a card to upgrade.",
        options,
    ))
}

pub(crate) fn remove_pick(
    origin: PickOrigin,
    state: &RunState,
    env: &GameEnv<'_>,
) -> Result<ChoiceFrame> {
    if state.deck.is_empty() {
        return Err(RuntimeError::Unavailable("the deck is empty"));
    }
    let mut options = deck_options(state, env, |_| true)?;
    if origin != PickOrigin::Event {
        options.push(ChoiceOption::new(keys::CANCEL, "Cancel"));
    }

    Ok(ChoiceFrame::new(
        ChoiceContext::RemovePick { origin },
        "Remove",
        "Choose a card to remove from your deck.",
        options,
    ))
}

pub(crate) fn god_tempt(tempter: DeityId, env: &GameEnv<'_>) -> Result<ChoiceFrame> {
    let name = deity_name(&tempter, env)?;
    let options = [
        ChoiceOption::new(keys::ACCEPT, "Listen")
            .with_detail(format!("{name} gains a point of faith; your focus loses one.")),
        ChoiceOption::new(keys::REFUSE, "Turn away"),
    ];

    Ok(ChoiceFrame::new(
        ChoiceContext::GodTempt { tempter },
        "Shrine",
        format!("{name} whispers from the altar."),
        options,
    ))
}

fn boon_detail(boon: MadnessBoon) -> String {
    match boon {
        MadnessBoon::Fury => "Your attacks deal half again as much damage.".to_owned(),
        MadnessBoon::Bulwark => "Enemy attacks deal 2 less damage.".to_owned(),
        MadnessBoon::Vigor => format!("Gain {} max hp.", MadnessBoon::VIGOR_MAX_HP),
    }
}

fn bane_detail(bane: MadnessBane) -> &'static str {
    match bane {
        MadnessBane::Frailty => "Enemy attacks deal 2 more damage.",
        MadnessBane::Dread => "Fatigue damage is doubled.",
        MadnessBane::Poverty => "Lose half of your gold.",
    }
}

pub(crate) fn madness_tempt(
    boon: MadnessBoon,
    bane: MadnessBane,
    env: &GameEnv<'_>,
) -> ChoiceFrame {
    let cost = env.config().madness_fatigue_cost;
    let options = [
        ChoiceOption::new(keys::ACCEPT, "Embrace it").with_detail(format!(
            "{} Costs {cost} fatigue. Your focus turns against you.",
            boon_detail(boon)
        )),
        ChoiceOption::new(keys::REJECT, "Resist").with_detail(bane_detail(bane)),
    ];

    ChoiceFrame::new(
        ChoiceContext::MadnessTempt { boon, bane },
        "Madness",
        "The relic hums in your hand and something answers.",
        options,
    )
}

pub(crate) fn synth_pick(
    first: Option<usize>,
    state: &RunState,
    env: &GameEnv<'_>,
) -> Result<ChoiceFrame> {
    if state.deck.len() < 2 {
        return Err(RuntimeError::Unavailable("synthesis needs two cards"));
    }
    let mut options = deck_options(state, env, |index| Some(index) != first)?;
    options.push(ChoiceOption::new(keys::CANCEL, "Cancel"));

    let prompt = match first {
        None => "Choose the card that will receive a new trait.",
        Some(_) => "Choose the card to melt into it.",
    };
    Ok(ChoiceFrame::new(
        ChoiceContext::SynthPick { first },
        "Forge",
        prompt,
        options,
    ))
}

pub(crate) fn synth_tag(first: usize, second: usize, state: &RunState) -> Result<ChoiceFrame> {
    let tags = state.card(first)?.synthesis_candidates();
    state.card(second)?;
    if tags.is_empty() {
        return Err(RuntimeError::Unavailable("that card cannot take another trait"));
    }

    let mut options: Vec<ChoiceOption> = tags
        .iter()
        .map(|tag| ChoiceOption::new(keys::keyed(keys::TAG, tag), tag.to_string()))
        .collect();
    options.push(ChoiceOption::new(keys::CANCEL, "Cancel"));

    Ok(ChoiceFrame::new(
        ChoiceContext::SynthTag {
            first,
            second,
            tags,
        },
        "Forge",
        "Choose the trait to forge in.",
        options,
    ))
}

pub(crate) fn pick_card(
    purpose: PickPurpose,
    state: &RunState,
    env: &GameEnv<'_>,
) -> Result<ChoiceFrame> {
    if state.deck.is_empty() {
        return Err(RuntimeError::Unavailable("the deck is empty"));
    }
    let prompt = match purpose {
        PickPurpose::Duplicate => "Choose a card to copy.",
    };
    Ok(ChoiceFrame::new(
        ChoiceContext::PickCard { purpose },
        "Choose a Card",
        prompt,
        deck_options(state, env, |_| true)?,
    ))
}

pub(crate) fn view_pile(pile: Pile, state: &RunState, env: &GameEnv<'_>) -> Result<ChoiceFrame> {
    let mut names = Vec::new();
    for card in &state.deck {
        if pile == Pile::Cursed && !card.is_cursed() {
            continue;
        }
        let mut name = card_name(&card.card, env)?;
        if card.upgraded {
            name.push('+');
        }
        names.push(name);
    }
    let (title, empty) = match pile {
        Pile::Deck => ("Deck", "Your deck is empty."),
        Pile::Cursed => ("Cursed Cards", "None of your cards are cursed."),
    };
    let prompt = if names.is_empty() {
        empty.to_owned()
    } else {
        names.join(", ")
    };

    Ok(ChoiceFrame::new(
        ChoiceContext::ViewPile { pile },
        title,
        prompt,
        [ChoiceOption::new(keys::CLOSE, "Close")],
    ))
}

/// Rebuilds the rendered choice for a frame loaded without one.
pub(crate) fn rebuild(
    context: &ChoiceContext,
    state: &RunState,
    env: &GameEnv<'_>,
) -> Result<ChoiceFrame> {
    match context {
        ChoiceContext::GodChoice { offered } => god_choice(offered, env),
        ChoiceContext::Rest { .. } => Ok(rest(state, env)),
        ChoiceContext::Event { event } => env
            .events()?
            .event(event)
            .map(|definition| self::event(&definition))
            .ok_or_else(|| RuntimeError::UnknownEvent(event.clone())),
        ChoiceContext::Shop { node, stock } => shop(*node, stock.clone(), env),
        ChoiceContext::Reward { cards } => reward(cards.clone(), env),
        ChoiceContext::RelicOffer { relics, source } => relic_offer(relics.clone(), *source, env),
        ChoiceContext::UpgradePick { origin } => upgrade_pick(*origin, state, env),
        ChoiceContext::RemovePick { origin } => remove_pick(*origin, state, env),
        ChoiceContext::GodTempt { tempter } => god_tempt(tempter.clone(), env),
        ChoiceContext::MadnessTempt { boon, bane } => Ok(madness_tempt(*boon, *bane, env)),
        ChoiceContext::SynthPick { first } => synth_pick(*first, state, env),
        ChoiceContext::SynthTag { first, second, .. } => synth_tag(*first, *second, state),
        ChoiceContext::PickCard { purpose } => pick_card(*purpose, state, env),
        ChoiceContext::ViewPile { pile } => view_pile(*pile, state, env),
    }
}
