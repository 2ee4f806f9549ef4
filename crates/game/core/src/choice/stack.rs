use std::collections::VecDeque;

use crate::error::{ErrorSeverity, GameError};

use super::{Choice, ChoiceContext, ChoiceKind, ChoiceOption};

/// A choice together with the context that interprets its keys.
///
/// The choice's kind is derived from the context, so the two cannot disagree.
/// A stored frame without its rendered choice loads as a placeholder (see
/// [`ChoiceFrame::is_placeholder`]) for the owner to rebuild.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StoredFrame"))]
pub struct ChoiceFrame {
    pub choice: Choice,
    pub context: ChoiceContext,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredFrame {
    #[serde(default)]
    choice: Option<Choice>,
    context: ChoiceContext,
}

#[cfg(feature = "serde")]
impl From<StoredFrame> for ChoiceFrame {
    fn from(stored: StoredFrame) -> Self {
        let kind = stored.context.kind();
        let mut choice = stored
            .choice
            .unwrap_or_else(|| Choice::new(kind, kind.as_ref(), ""));
        choice.kind = kind;
        Self {
            choice,
            context: stored.context,
        }
    }
}

impl ChoiceFrame {
    pub fn new(
        context: ChoiceContext,
        title: impl Into<String>,
        prompt: impl Into<String>,
        options: impl IntoIterator<Item = ChoiceOption>,
    ) -> Self {
        Self {
            choice: Choice::new(context.kind(), title, prompt).with_options(options),
            context,
        }
    }

    #[must_use]
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.choice.art = Some(art.into());
        self
    }

    pub fn kind(&self) -> ChoiceKind {
        self.context.kind()
    }

    /// True when the frame offers nothing to select, as a frame loaded
    /// without its rendered choice does.
    pub fn is_placeholder(&self) -> bool {
        self.choice.options.is_empty()
    }
}

/// What a handler wants done with the open choice after a key was resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the open choice as it is (e.g. a rejected purchase).
    Keep,
    /// Open a child; the current frame waits on the return stack.
    Open(ChoiceFrame),
    /// Swap the open frame without touching the return stack.
    Replace(ChoiceFrame),
    Close,
    /// Close the open frame and `n - 1` of its parents.
    Unwind(usize),
    /// The handler does not understand the key.
    Unhandled,
}

/// Outcome of [`ChoiceStack::close`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A parent frame was restored from the return stack.
    Restored,
    /// The next queued offer was opened.
    Dequeued,
    /// Nothing is open any more; exploration flow resumes.
    Idle,
}

/// Outcome of [`ChoiceStack::dispatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    Kept,
    Opened,
    Replaced,
    Closed(CloseOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChoiceError {
    #[error("no choice is open")]
    NothingOpen,

    #[error("{kind} has no option '{key}'")]
    UnknownKey { kind: ChoiceKind, key: String },

    #[error("{kind} handler did not handle '{key}'")]
    Unhandled { kind: ChoiceKind, key: String },
}

impl GameError for ChoiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NothingOpen | Self::UnknownKey { .. } => ErrorSeverity::Validation,
            Self::Unhandled { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingOpen => "CHOICE_NOTHING_OPEN",
            Self::UnknownKey { .. } => "CHOICE_UNKNOWN_KEY",
            Self::Unhandled { .. } => "CHOICE_UNHANDLED",
        }
    }
}

/// Interprets keys of the open frame. Implemented by the orchestration layer,
/// which owns the mutable run state.
pub trait ChoiceResolver {
    type Error: From<ChoiceError>;

    fn resolve(&mut self, frame: &ChoiceFrame, key: &str) -> Result<Resolution, Self::Error>;
}

/// Single open slot with a return stack and an offer queue.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChoiceStack {
    current: Option<ChoiceFrame>,
    return_stack: Vec<ChoiceFrame>,
    queue: VecDeque<ChoiceFrame>,
}

impl ChoiceStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ChoiceFrame> {
        self.current.as_ref()
    }

    /// The only choice the player can see, if any.
    pub fn visible(&self) -> Option<&Choice> {
        self.current.as_ref().map(|frame| &frame.choice)
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Parents waiting on the return stack.
    pub fn depth(&self) -> usize {
        self.return_stack.len()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    /// Opens `frame`, pushing the open frame (if any) onto the return stack.
    pub fn open(&mut self, frame: ChoiceFrame) {
        if let Some(parent) = self.current.replace(frame) {
            self.return_stack.push(parent);
        }
    }

    /// Opens `frame` now if nothing is open, otherwise queues it. Returns
    /// true when it was opened immediately.
    pub fn enqueue(&mut self, frame: ChoiceFrame) -> bool {
        if self.current.is_none() {
            self.current = Some(frame);
            return true;
        }
        self.queue.push_back(frame);
        false
    }

    /// Every held frame: the open one, the return stack, then the queue.
    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut ChoiceFrame> {
        self.current
            .iter_mut()
            .chain(self.return_stack.iter_mut())
            .chain(self.queue.iter_mut())
    }

    /// Swaps the open frame, keeping the return stack intact.
    pub fn replace(&mut self, frame: ChoiceFrame) -> Result<ChoiceFrame, ChoiceError> {
        match self.current.as_mut() {
            Some(current) => Ok(core::mem::replace(current, frame)),
            None => Err(ChoiceError::NothingOpen),
        }
    }

    /// Closes the open frame, restoring its parent or the next queued offer.
    pub fn close(&mut self) -> Result<CloseOutcome, ChoiceError> {
        self.unwind(1)
    }

    /// Closes the open frame and up to `levels - 1` parents.
    pub fn unwind(&mut self, levels: usize) -> Result<CloseOutcome, ChoiceError> {
        if self.current.take().is_none() {
            return Err(ChoiceError::NothingOpen);
        }
        let parents = levels.saturating_sub(1).min(self.return_stack.len());
        self.return_stack.truncate(self.return_stack.len() - parents);

        if let Some(parent) = self.return_stack.pop() {
            self.current = Some(parent);
            return Ok(CloseOutcome::Restored);
        }
        Ok(self.dequeue())
    }

    fn dequeue(&mut self) -> CloseOutcome {
        match self.queue.pop_front() {
            Some(next) => {
                self.current = Some(next);
                CloseOutcome::Dequeued
            }
            None => CloseOutcome::Idle,
        }
    }

    /// Drops every frame.
    pub fn clear(&mut self) {
        self.current = None;
        self.return_stack.clear();
        self.queue.clear();
    }

    /// Routes `key` to `resolver` and applies the returned [`Resolution`].
    ///
    /// Keys missing from the open choice and unhandled keys are errors; the
    /// stack is left untouched whenever an error is returned.
    pub fn dispatch<R>(&mut self, key: &str, resolver: &mut R) -> Result<Dispatched, R::Error>
    where
        R: ChoiceResolver + ?Sized,
    {
        let frame = self.current.as_ref().ok_or(ChoiceError::NothingOpen)?;
        if !frame.choice.has_option(key) {
            return Err(ChoiceError::UnknownKey {
                kind: frame.kind(),
                key: key.to_owned(),
            }
            .into());
        }

        let kind = frame.kind();
        let applied = match resolver.resolve(frame, key)? {
            Resolution::Keep => Dispatched::Kept,
            Resolution::Open(child) => {
                self.open(child);
                Dispatched::Opened
            }
            Resolution::Replace(next) => {
                self.replace(next)?;
                Dispatched::Replaced
            }
            Resolution::Close => Dispatched::Closed(self.close()?),
            Resolution::Unwind(levels) => Dispatched::Closed(self.unwind(levels.max(1))?),
            Resolution::Unhandled => {
                return Err(ChoiceError::Unhandled {
                    kind,
                    key: key.to_owned(),
                }
                .into());
            }
        };
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::choice::{Pile, ShopStock, keys};
    use crate::ids::NodeId;

    fn rest(high_fatigue: bool) -> ChoiceFrame {
        ChoiceFrame::new(
            ChoiceContext::Rest { high_fatigue },
            "Campfire",
            "Rest a while?",
            [
                ChoiceOption::new(keys::HEAL, "Rest"),
                ChoiceOption::new(keys::LEAVE, "Leave"),
            ],
        )
    }

    fn shop(node: u32) -> ChoiceFrame {
        ChoiceFrame::new(
            ChoiceContext::Shop {
                node: NodeId(node),
                stock: ShopStock::default(),
            },
            "Shop",
            "Browse",
            [
                ChoiceOption::new(keys::UPGRADE, "Upgrade"),
                ChoiceOption::new(keys::LEAVE, "Leave"),
            ],
        )
    }

    fn pile(tag: u8) -> ChoiceFrame {
        ChoiceFrame::new(
            ChoiceContext::ViewPile {
                pile: if tag % 2 == 0 { Pile::Deck } else { Pile::Cursed },
            },
            format!("Pile {tag}"),
            "",
            [ChoiceOption::new(keys::CLOSE, "Close")],
        )
    }

    /// Resolver that answers every key with a fixed resolution.
    struct Scripted(Resolution);

    impl ChoiceResolver for Scripted {
        type Error = ChoiceError;

        fn resolve(&mut self, _frame: &ChoiceFrame, _key: &str) -> Result<Resolution, ChoiceError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn child_close_restores_parent_verbatim() {
        let mut stack = ChoiceStack::new();
        let parent = shop(4);
        stack.open(parent.clone());
        stack.open(rest(true));
        assert_eq!(stack.depth(), 1);

        assert_eq!(stack.close(), Ok(CloseOutcome::Restored));
        assert_eq!(stack.current(), Some(&parent));
        assert_eq!(stack.close(), Ok(CloseOutcome::Idle));
        assert!(!stack.is_open());
        assert_eq!(stack.close(), Err(ChoiceError::NothingOpen));
    }

    #[test]
    fn queue_waits_for_stack_to_drain() {
        let mut stack = ChoiceStack::new();
        assert!(stack.enqueue(shop(1)));
        assert!(!stack.enqueue(pile(7)));
        stack.open(rest(false));

        assert_eq!(stack.close(), Ok(CloseOutcome::Restored));
        assert_eq!(stack.current().map(ChoiceFrame::kind), Some(ChoiceKind::Shop));
        assert_eq!(stack.close(), Ok(CloseOutcome::Dequeued));
        assert_eq!(stack.current(), Some(&pile(7)));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn unwind_skips_parents() {
        let mut stack = ChoiceStack::new();
        stack.open(shop(1));
        stack.open(rest(false));
        stack.open(pile(0));
        assert_eq!(stack.unwind(2), Ok(CloseOutcome::Restored));
        assert_eq!(stack.current(), Some(&shop(1)));

        stack.open(pile(0));
        assert_eq!(stack.unwind(10), Ok(CloseOutcome::Idle));
        assert!(stack.is_idle());
    }

    #[test]
    fn dispatch_rejects_keys_not_on_the_choice() {
        let mut stack = ChoiceStack::new();
        let mut resolver = Scripted(Resolution::Close);
        assert_eq!(
            stack.dispatch(keys::LEAVE, &mut resolver),
            Err(ChoiceError::NothingOpen)
        );

        stack.open(rest(false));
        let before = stack.clone();
        assert_eq!(
            stack.dispatch("buy:0", &mut resolver),
            Err(ChoiceError::UnknownKey {
                kind: ChoiceKind::Rest,
                key: "buy:0".into()
            })
        );
        assert_eq!(stack, before);
    }

    #[test]
    fn unhandled_is_an_error_and_changes_nothing() {
        let mut stack = ChoiceStack::new();
        stack.open(rest(false));
        let before = stack.clone();

        let result = stack.dispatch(keys::HEAL, &mut Scripted(Resolution::Unhandled));
        assert!(matches!(result, Err(ChoiceError::Unhandled { .. })));
        assert_eq!(stack, before);
    }

    #[test]
    fn dispatch_applies_resolution() {
        let mut stack = ChoiceStack::new();
        stack.open(shop(2));

        let opened = stack.dispatch(keys::UPGRADE, &mut Scripted(Resolution::Open(rest(false))));
        assert_eq!(opened, Ok(Dispatched::Opened));
        assert_eq!(stack.depth(), 1);

        let closed = stack.dispatch(keys::LEAVE, &mut Scripted(Resolution::Close));
        assert_eq!(closed, Ok(Dispatched::Closed(CloseOutcome::Restored)));
        assert_eq!(stack.current(), Some(&shop(2)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn frame_without_choice_loads_as_placeholder() {
        let frame: ChoiceFrame =
            serde_json::from_str(r#"{ "context": { "Rest": { "high_fatigue": true } } }"#)
                .unwrap();
        assert!(frame.is_placeholder());
        assert_eq!(frame.choice.kind, ChoiceKind::Rest);
        assert_eq!(frame.context, ChoiceContext::Rest { high_fatigue: true });

        let stored = serde_json::to_string(&shop(4)).unwrap();
        let loaded: ChoiceFrame = serde_json::from_str(&stored).unwrap();
        assert_eq!(loaded, shop(4));
        assert!(!loaded.is_placeholder());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Open(u8),
        Enqueue(u8),
        Close,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Open),
            any::<u8>().prop_map(Op::Enqueue),
            Just(Op::Close),
        ]
    }

    proptest! {
        #[test]
        fn stack_matches_reference_model(ops in prop::collection::vec(op(), 0..64)) {
            let mut stack = ChoiceStack::new();
            let mut current: Option<ChoiceFrame> = None;
            let mut parents: Vec<ChoiceFrame> = Vec::new();
            let mut queue: VecDeque<ChoiceFrame> = VecDeque::new();

            for op in ops {
                match op {
                    Op::Open(tag) => {
                        let frame = pile(tag);
                        stack.open(frame.clone());
                        if let Some(parent) = current.replace(frame) {
                            parents.push(parent);
                        }
                    }
                    Op::Enqueue(tag) => {
                        let frame = pile(tag);
                        let opened = stack.enqueue(frame.clone());
                        prop_assert_eq!(opened, current.is_none());
                        if current.is_none() {
                            current = Some(frame);
                        } else {
                            queue.push_back(frame);
                        }
                    }
                    Op::Close => {
                        let result = stack.close();
                        if current.take().is_none() {
                            prop_assert_eq!(result, Err(ChoiceError::NothingOpen));
                        } else if let Some(parent) = parents.pop() {
                            prop_assert_eq!(result, Ok(CloseOutcome::Restored));
                            current = Some(parent);
                        } else {
                            current = queue.pop_front();
                            let expected = if current.is_some() {
                                CloseOutcome::Dequeued
                            } else {
                                CloseOutcome::Idle
                            };
                            prop_assert_eq!(result, Ok(expected));
                        }
                    }
                }

                prop_assert_eq!(stack.current(), current.as_ref());
                prop_assert_eq!(stack.depth(), parents.len());
                prop_assert_eq!(stack.queued(), queue.len());
                // Nothing can be visible without something being open.
                prop_assert_eq!(stack.visible().is_some(), stack.is_open());
            }
        }
    }
}
