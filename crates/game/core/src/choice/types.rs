/// Closed set of decision kinds.
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
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ChoiceKind {
    GodChoice,
    Rest,
    Event,
    Shop,
    Reward,
    RelicOffer,
    UpgradePick,
    RemovePick,
    GodTempt,
    MadnessTempt,
    SynthPick,
    SynthTag,
    PickCard,
    ViewPile,
}

/// One selectable entry of a [`Choice`]. `key` is opaque to everything but
/// the handler bound to the choice's context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChoiceOption {
    pub key: String,
    pub label: String,
    pub detail: Option<String>,
    pub associated_entity_id: Option<String>,
}

impl ChoiceOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            detail: None,
            associated_entity_id: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.associated_entity_id = Some(entity.into());
        self
    }
}

/// What the rendering layer draws.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    pub kind: ChoiceKind,
    pub title: String,
    pub prompt: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<ChoiceOption>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub art: Option<String>,
}

impl Choice {
    pub fn new(kind: ChoiceKind, title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            prompt: prompt.into(),
            options: Vec::new(),
            art: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        self.options.extend(options);
        self
    }

    #[must_use]
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = Some(art.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.key == key)
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.option(key).is_some()
    }
}
