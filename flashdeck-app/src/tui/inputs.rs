use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which key map applies; follows the active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Home,
    Form,
    Study,
    Quiz,
    Guard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    Up,
    Down,
    Enter,
    Add,
    Edit,
    Delete,
    Study,
    Quiz,
    Dismiss,
    NextField,
    Input(char),
    Backspace,
    Flip,
    Known,
    Learning,
    Choose(usize),
    Restart,
    None,
}

pub fn map_event(ev: Event, mode: Mode) -> Action {
    let Event::Key(KeyEvent { code, modifiers, kind, .. }) = ev else {
        return Action::None;
    };
    if kind == KeyEventKind::Release {
        return Action::None;
    }
    if let (KeyCode::Char('c'), true) = (code, modifiers.contains(KeyModifiers::CONTROL)) {
        return Action::Quit;
    }
    match mode {
        Mode::Home => match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Char('a') => Action::Add,
            KeyCode::Char('e') | KeyCode::Enter => Action::Edit,
            KeyCode::Char('d') | KeyCode::Delete => Action::Delete,
            KeyCode::Char('s') => Action::Study,
            KeyCode::Char('z') => Action::Quiz,
            KeyCode::Char('x') => Action::Dismiss,
            _ => Action::None,
        },
        Mode::Form => match code {
            KeyCode::Esc => Action::Back,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => Action::NextField,
            KeyCode::Enter => Action::Enter,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) => Action::Input(c),
            _ => Action::None,
        },
        Mode::Study => match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Back,
            KeyCode::Char(' ') => Action::Flip,
            KeyCode::Char('k') | KeyCode::Right => Action::Known,
            KeyCode::Char('l') | KeyCode::Left => Action::Learning,
            KeyCode::Char('r') => Action::Restart,
            KeyCode::Enter => Action::Enter,
            _ => Action::None,
        },
        Mode::Quiz => match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Back,
            KeyCode::Char(c @ 'a'..='d') => Action::Choose(c as usize - 'a' as usize),
            KeyCode::Char(c @ '1'..='4') => Action::Choose(c as usize - '1' as usize),
            KeyCode::Char('r') => Action::Restart,
            KeyCode::Enter => Action::Enter,
            _ => Action::None,
        },
        Mode::Guard => match code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Action::Back,
            _ => Action::None,
        },
    }
}
