//! Screen state machine.
//!
//! Every screen other than [`View::Home`] returns to home; there is no
//! history. Payloads ride inside the variants, so an edit screen without a
//! card or a quiz screen without a session cannot be expressed.

use crate::kv::KeyValueStore;
use crate::session::{QuizSession, StudySession};
use crate::{Card, CardDraft, CardId, CardStore, CoreError};
use std::str::FromStr;
use tracing::debug;

pub enum QuizScreen {
    /// Too few cards; the only way out is home.
    Guard { available: usize },
    Running(QuizSession),
}

pub enum View {
    Home,
    Add(CardDraft),
    Edit { card: Card, draft: CardDraft },
    Study(StudySession),
    Quiz(QuizScreen),
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Add(_) => "add",
            View::Edit { .. } => "edit",
            View::Study(_) => "study",
            View::Quiz(_) => "quiz",
        }
    }
}

/// Screen requested at startup, e.g. from `action=quiz`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartAction {
    Add,
    Study,
    Quiz,
}

impl FromStr for StartAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(StartAction::Add),
            "study" => Ok(StartAction::Study),
            "quiz" => Ok(StartAction::Quiz),
            _ => Err(CoreError::Invalid("unknown action")),
        }
    }
}

impl StartAction {
    /// Reads the `action` parameter from a query string such as
    /// `?action=study&x=1`. A bare value (`study`) is accepted too.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.trim().trim_start_matches('?');
        if !query.contains('=') {
            return query.parse().ok();
        }
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == "action")
            .and_then(|(_, v)| v.parse().ok())
    }
}

pub struct ViewController<S: KeyValueStore> {
    store: CardStore<S>,
    view: View,
}

impl<S: KeyValueStore> ViewController<S> {
    pub fn new(store: CardStore<S>) -> Self {
        Self {
            store,
            view: View::Home,
        }
    }

    pub fn store(&self) -> &CardStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CardStore<S> {
        &mut self.store
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Message for the error banner, if a load or save has failed.
    pub fn banner(&self) -> Option<String> {
        self.store.error().map(|e| e.to_string())
    }

    fn set_view(&mut self, view: View) {
        debug!(from = self.view.name(), to = view.name(), "view transition");
        self.view = view;
    }

    pub fn go_home(&mut self) {
        self.set_view(View::Home);
    }

    pub fn open_add(&mut self) {
        self.set_view(View::Add(CardDraft::default()));
    }

    pub fn open_edit(&mut self, id: CardId) -> bool {
        let Some(card) = self.store.get(id).cloned() else {
            return false;
        };
        let draft = CardDraft::from_card(&card);
        self.set_view(View::Edit { card, draft });
        true
    }

    pub fn start_study(&mut self) -> bool {
        match StudySession::start(self.store.list()) {
            Ok(session) => {
                self.set_view(View::Study(session));
                true
            }
            Err(_) => false,
        }
    }

    /// Enters quiz mode. With a single card this lands on the guard screen;
    /// with none the quiz is not offered at all.
    pub fn start_quiz(&mut self) -> bool {
        if self.store.is_empty() {
            return false;
        }
        let screen = match QuizSession::start(self.store.list()) {
            Ok(session) => QuizScreen::Running(session),
            Err(_) => QuizScreen::Guard {
                available: self.store.len(),
            },
        };
        self.set_view(View::Quiz(screen));
        true
    }

    pub fn apply_start_action(&mut self, action: StartAction) -> bool {
        match action {
            StartAction::Add => {
                self.open_add();
                true
            }
            StartAction::Study => self.start_study(),
            StartAction::Quiz => self.start_quiz(),
        }
    }

    /// Saves the add or edit form. On refusal the screen and its draft stay
    /// as they were.
    pub fn submit(&mut self) -> bool {
        let saved = match &self.view {
            View::Add(draft) => {
                let draft = draft.clone();
                self.store.add(&draft.front, &draft.back).is_some()
            }
            View::Edit { card, draft } => {
                let (id, draft) = (card.id, draft.clone());
                self.store.update(id, &draft.front, &draft.back).is_some()
            }
            _ => false,
        };
        if saved {
            self.go_home();
        }
        saved
    }

    pub fn delete(&mut self, id: CardId) -> bool {
        if !matches!(self.view, View::Home) {
            return false;
        }
        self.store.delete(id)
    }

    /// Mutable draft of the add or edit form, if one is open.
    pub fn draft_mut(&mut self) -> Option<&mut CardDraft> {
        match &mut self.view {
            View::Add(draft) | View::Edit { draft, .. } => Some(draft),
            _ => None,
        }
    }
}
