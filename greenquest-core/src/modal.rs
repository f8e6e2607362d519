//! Single-slot dialog region.
//!
//! At most one [`Modal`] is displayed. Opening a new one discards the current
//! one together with its actions; nothing attached to a replaced modal is
//! ever invoked.

/// Inline run inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyBlock {
    Paragraph(Vec<Inline>),
    /// File picker used by the proof upload dialog.
    FileInput { id: String, accept: String },
}

impl BodyBlock {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Paragraph(vec![Inline::Text(text.into())])
    }

    /// Plain text rendered as the concatenation of its runs.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Paragraph(runs) => runs
                .iter()
                .map(|run| match run {
                    Inline::Text(s) | Inline::Strong(s) => s.as_str(),
                })
                .collect(),
            Self::FileInput { .. } => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    Primary,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind<A> {
    /// Handed back to whoever opened the modal. The modal stays open.
    Dispatch(A),
    /// Closes the modal.
    Dismiss,
    /// External link, opened in a new tab.
    Link { href: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalAction<A> {
    pub label: String,
    pub style: ActionStyle,
    pub kind: ActionKind<A>,
}

impl<A> ModalAction<A> {
    pub fn primary(label: impl Into<String>, payload: A) -> Self {
        Self {
            label: label.into(),
            style: ActionStyle::Primary,
            kind: ActionKind::Dispatch(payload),
        }
    }

    pub fn dismiss(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ActionStyle::Outline,
            kind: ActionKind::Dismiss,
        }
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ActionStyle::Primary,
            kind: ActionKind::Link { href: href.into() },
        }
    }
}

/// Dialog content before it is given an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSpec<A> {
    pub title: String,
    pub body: Vec<BodyBlock>,
    pub actions: Vec<ModalAction<A>>,
}

impl<A> ModalSpec<A> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn body(mut self, block: BodyBlock) -> Self {
        self.body.push(block);
        self
    }

    #[must_use]
    pub fn paragraph(self, text: impl Into<String>) -> Self {
        self.body(BodyBlock::text(text))
    }

    #[must_use]
    pub fn action(mut self, action: ModalAction<A>) -> Self {
        self.actions.push(action);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalId(u64);

impl ModalId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A modal currently occupying the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<A> {
    pub id: ModalId,
    pub title: String,
    pub body: Vec<BodyBlock>,
    pub actions: Vec<ModalAction<A>>,
}

/// What happened when an action button was pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<A> {
    Dispatch(A),
    Closed,
    Link(String),
    /// The button belonged to a modal that is no longer displayed, or the index was out of range.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalController<A> {
    slot: Option<Modal<A>>,
    next_id: u64,
}

impl<A> Default for ModalController<A> {
    fn default() -> Self {
        Self {
            slot: None,
            next_id: 1,
        }
    }
}

impl<A: Clone> ModalController<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `spec`, replacing whatever was open.
    pub fn open(&mut self, spec: ModalSpec<A>) -> ModalId {
        let id = ModalId(self.next_id);
        self.next_id += 1;
        if let Some(prev) = self.slot.as_ref() {
            log::debug!("modal {:?} `{}` replaced by {:?}", prev.id, prev.title, id);
        }
        self.slot = Some(Modal {
            id,
            title: spec.title,
            body: spec.body,
            actions: spec.actions,
        });
        id
    }

    /// Clear the slot. Returns whether anything was displayed.
    pub fn close(&mut self) -> bool {
        self.slot.take().is_some()
    }

    /// Clicks on the backdrop outside the dialog box.
    pub fn backdrop_click(&mut self) -> bool {
        self.close()
    }

    /// Resolve a button press on modal `id`. Only `Dismiss` closes.
    pub fn select(&mut self, id: ModalId, index: usize) -> Selection<A> {
        let Some(modal) = self.slot.as_ref().filter(|m| m.id == id) else {
            return Selection::Stale;
        };
        let Some(action) = modal.actions.get(index) else {
            return Selection::Stale;
        };
        match &action.kind {
            ActionKind::Dispatch(payload) => Selection::Dispatch(payload.clone()),
            ActionKind::Link { href } => Selection::Link(href.clone()),
            ActionKind::Dismiss => {
                self.close();
                Selection::Closed
            }
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Modal<A>> {
        self.slot.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.slot.is_some()
    }

    /// Whether the region accepts pointer events.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.is_open()
    }

    /// Value of the region's `aria-hidden` attribute.
    #[must_use]
    pub const fn aria_hidden(&self) -> bool {
        !self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(title: &str, payload: u8) -> ModalSpec<u8> {
        ModalSpec::new(title)
            .paragraph("body")
            .action(ModalAction::primary("Go", payload))
            .action(ModalAction::dismiss("Close"))
    }

    #[test]
    fn open_replaces_previous_modal() {
        let mut modals = ModalController::new();
        let first = modals.open(spec("one", 1));
        let second = modals.open(spec("two", 2));
        assert_ne!(first, second);
        assert_eq!(modals.current().unwrap().title, "two");
        assert_eq!(modals.select(first, 0), Selection::Stale);
        assert_eq!(modals.select(second, 0), Selection::Dispatch(2));
    }

    #[test]
    fn dispatch_does_not_close() {
        let mut modals = ModalController::new();
        let id = modals.open(spec("one", 1));
        assert_eq!(modals.select(id, 0), Selection::Dispatch(1));
        assert!(modals.is_open());
    }

    #[test]
    fn dismiss_and_backdrop_close() {
        let mut modals = ModalController::new();
        let id = modals.open(spec("one", 1));
        assert_eq!(modals.select(id, 1), Selection::Closed);
        assert!(!modals.is_open());
        assert!(modals.aria_hidden());

        modals.open(spec("two", 2));
        assert!(modals.is_interactive());
        assert!(modals.backdrop_click());
        assert!(!modals.is_interactive());
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut modals: ModalController<u8> = ModalController::new();
        assert!(!modals.close());
        assert!(!modals.close());
        assert!(modals.current().is_none());
    }

    #[test]
    fn link_leaves_modal_open() {
        let mut modals: ModalController<u8> = ModalController::new();
        let id = modals.open(ModalSpec::new("x").action(ModalAction::link("Install", "https://a")));
        assert_eq!(modals.select(id, 0), Selection::Link("https://a".into()));
        assert!(modals.is_open());
        assert_eq!(modals.select(id, 9), Selection::Stale);
    }

    #[test]
    fn paragraph_plain_text_joins_runs() {
        let block = BodyBlock::Paragraph(vec![
            Inline::Text("You joined ".into()),
            Inline::Strong("Beach".into()),
        ]);
        assert_eq!(block.plain_text(), "You joined Beach");
    }
}
