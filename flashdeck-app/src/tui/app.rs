use crate::cli::commands::Store;
use crate::tui::{
    inputs::{map_event, Action, Mode},
    views::{self, Field, Screen},
};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flashdeck_core::{KeyValueStore, QuizScreen, Recall, StartAction, View, ViewController};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};

pub struct TuiApp {
    vc: ViewController<Box<dyn KeyValueStore>>,
    start: Option<StartAction>,
    sel: usize,
    field: Field,
    storage_ok: bool,
}

impl TuiApp {
    pub fn new(store: Store, start: Option<StartAction>) -> Self {
        let storage_ok = store.storage_available();
        Self {
            vc: ViewController::new(store),
            start,
            sel: 0,
            field: Field::Front,
            storage_ok,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        if let Some(action) = self.start.take() {
            if !self.vc.apply_start_action(action) {
                tracing::info!(?action, "start action skipped, no cards");
            }
        }

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn mode(&self) -> Mode {
        match self.vc.view() {
            View::Home => Mode::Home,
            View::Add(_) | View::Edit { .. } => Mode::Form,
            View::Study(_) => Mode::Study,
            View::Quiz(QuizScreen::Running(_)) => Mode::Quiz,
            View::Quiz(QuizScreen::Guard { .. }) => Mode::Guard,
        }
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            let banner = self.vc.banner();
            terminal.draw(|f| {
                let screen = Screen {
                    view: self.vc.view(),
                    cards: self.vc.store().list(),
                    sel: self.sel,
                    field: self.field,
                    banner: banner.as_deref(),
                    storage_ok: self.storage_ok,
                };
                views::draw_ui(f, f.size(), &screen);
            })?;

            if event::poll(std::time::Duration::from_millis(100))? {
                let action = map_event(event::read()?, self.mode());
                if action == Action::Quit {
                    break;
                }
                self.handle(action);
            }
        }
        Ok(())
    }

    fn handle(&mut self, action: Action) {
        match self.mode() {
            Mode::Home => self.handle_home(action),
            Mode::Form => self.handle_form(action),
            Mode::Study => self.handle_study(action),
            Mode::Quiz => self.handle_quiz(action),
            Mode::Guard => {
                if action == Action::Back {
                    self.vc.go_home();
                }
            }
        }
    }

    fn selected_id(&self) -> Option<i64> {
        self.vc.store().list().get(self.sel).map(|c| c.id)
    }

    fn handle_home(&mut self, action: Action) {
        let count = self.vc.store().len();
        match action {
            Action::Up => self.sel = self.sel.saturating_sub(1),
            Action::Down => {
                if self.sel + 1 < count {
                    self.sel += 1;
                }
            }
            Action::Add => {
                self.field = Field::Front;
                self.vc.open_add();
            }
            Action::Edit => {
                if let Some(id) = self.selected_id() {
                    self.field = Field::Front;
                    self.vc.open_edit(id);
                }
            }
            Action::Delete => {
                if let Some(id) = self.selected_id() {
                    self.vc.delete(id);
                    self.sel = self.sel.min(self.vc.store().len().saturating_sub(1));
                }
            }
            Action::Study => {
                self.vc.start_study();
            }
            Action::Quiz => {
                self.vc.start_quiz();
            }
            Action::Dismiss => self.vc.store_mut().dismiss_error(),
            _ => {}
        }
    }

    fn handle_form(&mut self, action: Action) {
        match action {
            Action::Back => self.vc.go_home(),
            Action::Enter => {
                if self.vc.submit() {
                    self.sel = self.sel.min(self.vc.store().len().saturating_sub(1));
                }
            }
            Action::NextField => self.field = self.field.other(),
            Action::Input(c) => {
                if let Some(d) = self.vc.draft_mut() {
                    match self.field {
                        Field::Front => d.front.push(c),
                        Field::Back => d.back.push(c),
                    }
                }
            }
            Action::Backspace => {
                if let Some(d) = self.vc.draft_mut() {
                    match self.field {
                        Field::Front => d.front.pop(),
                        Field::Back => d.back.pop(),
                    };
                }
            }
            _ => {}
        }
    }

    fn handle_study(&mut self, action: Action) {
        let View::Study(session) = self.vc.view_mut() else {
            return;
        };
        let finished = session.is_finished();
        match action {
            Action::Flip => session.flip(),
            Action::Known => session.answer(Recall::Known),
            Action::Learning => session.answer(Recall::StillLearning),
            Action::Restart if finished => session.restart(),
            Action::Back => self.vc.go_home(),
            Action::Enter if finished => self.vc.go_home(),
            _ => {}
        }
    }

    fn handle_quiz(&mut self, action: Action) {
        let View::Quiz(QuizScreen::Running(session)) = self.vc.view_mut() else {
            return;
        };
        let finished = session.is_finished();
        match action {
            Action::Choose(i) => {
                session.select(i);
            }
            Action::Enter if !finished => {
                session.next();
            }
            Action::Restart if finished => session.restart(),
            Action::Back | Action::Enter => self.vc.go_home(),
            _ => {}
        }
    }
}
