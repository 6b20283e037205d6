use crate::cli::commands::option_letter;
use crate::tui::theme::*;
use flashdeck_core::{Card, CardDraft, QuizScreen, QuizSession, StudySession, View, MIN_QUIZ_CARDS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Front,
    Back,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Field::Front => Field::Back,
            Field::Back => Field::Front,
        }
    }
}

/// Everything a frame needs, borrowed from the app for one draw.
pub struct Screen<'a> {
    pub view: &'a View,
    pub cards: &'a [Card],
    pub sel: usize,
    pub field: Field,
    pub banner: Option<&'a str>,
    pub storage_ok: bool,
}

pub fn draw_ui(f: &mut Frame, area: Rect, s: &Screen) {
    let banner_h = if s.banner.is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(banner_h),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, chunks[0], s);
    if let Some(msg) = s.banner {
        let p = Paragraph::new(format!(" {msg}  (x to dismiss)")).style(banner_style());
        f.render_widget(p, chunks[1]);
    }

    match s.view {
        View::Home => draw_home(f, chunks[2], s.cards, s.sel),
        View::Add(draft) => draw_form(f, chunks[2], "New card", draft, s.field),
        View::Edit { draft, .. } => draw_form(f, chunks[2], "Edit card", draft, s.field),
        View::Study(session) => draw_study(f, chunks[2], session),
        View::Quiz(QuizScreen::Guard { available }) => draw_guard(f, chunks[2], *available),
        View::Quiz(QuizScreen::Running(session)) => draw_quiz(f, chunks[2], session),
    }

    let foot = Paragraph::new(Line::from(footer_keys(s.view))).style(footer_style());
    f.render_widget(foot, chunks[3]);
}

fn draw_header(f: &mut Frame, area: Rect, s: &Screen) {
    let storage = if s.storage_ok {
        Span::raw("storage ok").style(hint_style())
    } else {
        Span::raw("storage unavailable").style(wrong_style())
    };
    let line = Line::from(vec![
        Span::raw("Flashdeck").style(title_style()),
        Span::raw(format!("  {} cards  ", s.cards.len())),
        storage,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn footer_keys(view: &View) -> &'static str {
    match view {
        View::Home => " ↑/k ↓/j select  a add  e edit  d delete  s study  z quiz  q quit ",
        View::Add(_) | View::Edit { .. } => " tab switch side  enter save  esc cancel ",
        View::Study(s) if s.is_finished() => " r restart  enter/esc home ",
        View::Study(_) => " space flip  k know  l still learning  esc home ",
        View::Quiz(QuizScreen::Running(q)) if q.is_finished() => " r restart  enter/esc home ",
        View::Quiz(QuizScreen::Running(_)) => " a-d answer  enter next  esc home ",
        View::Quiz(QuizScreen::Guard { .. }) => " enter/esc home ",
    }
}

fn boxed(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL)
}

fn draw_home(f: &mut Frame, area: Rect, cards: &[Card], sel: usize) {
    if cards.is_empty() {
        let p = Paragraph::new("No cards yet. Press a to add one.")
            .wrap(Wrap { trim: true })
            .block(boxed("Cards"));
        f.render_widget(p, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<_> = cards
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let line = Line::from(c.front.clone());
            ListItem::new(if i == sel { line.style(selected_style()) } else { line })
        })
        .collect();
    f.render_widget(List::new(items).block(boxed("Cards")), chunks[0]);

    if let Some(card) = cards.get(sel) {
        let mut text = vec![
            Line::from(vec![Span::raw("Q: ").style(title_style()), Span::raw(&card.front)]),
            Line::from(vec![Span::raw("A: ").style(title_style()), Span::raw(&card.back)]),
            Line::from(""),
        ];
        if let Some(t) = card.updated_at {
            text.push(Line::from(
                Span::raw(format!("updated {}", t.format("%Y-%m-%d %H:%M"))).style(hint_style()),
            ));
        }
        let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(boxed("Card"));
        f.render_widget(p, chunks[1]);
    }
}

fn draw_form(f: &mut Frame, area: Rect, title: &str, draft: &CardDraft, field: Field) {
    let outer = boxed(title);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    for (i, (label, value, which)) in [
        ("Front (question / word)", &draft.front, Field::Front),
        ("Back (answer / definition)", &draft.back, Field::Back),
    ]
    .into_iter()
    .enumerate()
    {
        let style = if field == which { selected_style() } else { Style::default() };
        let cursor = if field == which { "_" } else { "" };
        let p = Paragraph::new(format!("{value}{cursor}"))
            .wrap(Wrap { trim: false })
            .block(Block::default().title(label).borders(Borders::ALL).border_style(style));
        f.render_widget(p, rows[i]);
    }

    if draft.validated().is_none() {
        let hint = Paragraph::new("Both sides need text before saving.").style(hint_style());
        f.render_widget(hint, rows[2]);
    }
}

fn draw_study(f: &mut Frame, area: Rect, session: &StudySession) {
    let Some(card) = session.current() else {
        let score = session.score();
        let text = vec![
            Line::from(Span::raw("Study complete").style(title_style())),
            Line::from(""),
            Line::from(format!(
                "Known {}/{} ({}%)",
                score.correct,
                score.total,
                session.percentage().unwrap_or(0)
            )),
        ];
        f.render_widget(Paragraph::new(text).block(boxed("Study")), area);
        return;
    };

    let score = session.score();
    let title = format!(
        "Study  card {}/{}  known {}/{}",
        session.position() + 1,
        session.len(),
        score.correct,
        score.total
    );
    let text = if session.is_revealed() {
        vec![
            Line::from(Span::raw("Answer").style(hint_style())),
            Line::from(""),
            Line::from(Span::raw(&card.back).style(title_style())),
        ]
    } else {
        vec![
            Line::from(Span::raw("Press space to flip").style(hint_style())),
            Line::from(""),
            Line::from(Span::raw(&card.front).style(title_style())),
        ]
    };
    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(boxed(&title));
    f.render_widget(p, area);
}

fn draw_guard(f: &mut Frame, area: Rect, available: usize) {
    let text = vec![
        Line::from(Span::raw("Not enough cards").style(title_style())),
        Line::from(""),
        Line::from(format!(
            "A quiz needs at least {MIN_QUIZ_CARDS} cards; you have {available}. Add more cards to start."
        )),
    ];
    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(boxed("Quiz"));
    f.render_widget(p, area);
}

fn draw_quiz(f: &mut Frame, area: Rect, session: &QuizSession) {
    let score = session.score();
    let Some(q) = session.question() else {
        let text = vec![
            Line::from(Span::raw("Quiz complete").style(title_style())),
            Line::from(""),
            Line::from(format!(
                "Score {}/{} ({}%)",
                score.correct,
                score.total,
                session.percentage().unwrap_or(0)
            )),
        ];
        f.render_widget(Paragraph::new(text).block(boxed("Quiz")), area);
        return;
    };

    let title = format!(
        "Quiz  question {}/{}  score {}/{}",
        session.position() + 1,
        session.len(),
        score.correct,
        score.total
    );
    let mut text = vec![
        Line::from(Span::raw(&q.prompt).style(title_style())),
        Line::from(""),
    ];
    for (i, opt) in q.options.iter().enumerate() {
        let style = if !q.answered {
            Style::default()
        } else if q.is_correct_option(i) {
            correct_style()
        } else if q.selected == Some(i) {
            wrong_style()
        } else {
            hint_style()
        };
        text.push(Line::from(Span::raw(format!("{}. {}", option_letter(i), opt)).style(style)));
    }
    text.push(Line::from(""));
    let prompt = match q.was_correct() {
        None => "Choose the right answer.",
        Some(_) if session.is_last() => "Enter to see results.",
        Some(_) => "Enter for the next question.",
    };
    text.push(Line::from(Span::raw(prompt).style(hint_style())));

    let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(boxed(&title));
    f.render_widget(p, area);
}
