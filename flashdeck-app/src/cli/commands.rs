use crate::cli::opts::*;
use crate::tui::app::TuiApp;

use anyhow::{bail, Context, Result};
use flashdeck_core::{
    decode_cards, encode_cards_pretty, Card, CardStore, KeyValueStore, QuizSession, Recall, Score,
    StartAction, StudySession,
};
use flashdeck_json::paths::data_root;
use flashdeck_json::FileKv;
use flashdeck_sqlite::SqliteKv;
use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;

pub type Store = CardStore<Box<dyn KeyValueStore>>;

pub fn run_cli(args: Cli) -> Result<()> {
    let mut store = open_store(&args)?;
    report_banner(&store);
    match args.cmd.clone() {
        Command::Card(cmd) => card_cmd(&mut store, cmd),
        Command::Study => {
            let stdin = stdin();
            study_loop(store.list(), &mut stdin.lock(), &mut stdout()).map(|_| ())
        }
        Command::Quiz => {
            let stdin = stdin();
            quiz_loop(store.list(), &mut stdin.lock(), &mut stdout()).map(|_| ())
        }
        Command::Export(cmd) => export_cmd(&store, cmd),
        Command::Import(cmd) => import_cmd(&mut store, cmd),
        Command::Tui(cmd) => {
            let action = match (cmd.action, cmd.query) {
                (Some(a), _) => Some(start_action(a)),
                (None, Some(q)) => StartAction::from_query(&q),
                (None, None) => None,
            };
            TuiApp::new(store, action).run()
        }
        Command::Doctor => doctor_cmd(&store, &args),
    }
}

pub fn data_dir(args: &Cli) -> PathBuf {
    args.data_dir.clone().unwrap_or_else(data_root)
}

pub fn open_store(args: &Cli) -> Result<Store> {
    let root = data_dir(args);
    let kv: Box<dyn KeyValueStore> = match args.store {
        StoreKind::Json => Box::new(
            FileKv::open_with(root.clone(), args.max_backups)
                .with_context(|| format!("opening data dir {}", root.display()))?,
        ),
        StoreKind::Sqlite => {
            let p = args
                .db_path
                .clone()
                .unwrap_or_else(|| root.join("flashdeck.sqlite3"));
            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            Box::new(SqliteKv::open_file(&p).with_context(|| format!("opening {}", p.display()))?)
        }
    };
    Ok(CardStore::load(kv, args.key.clone()))
}

fn start_action(a: ActionArg) -> StartAction {
    match a {
        ActionArg::Add => StartAction::Add,
        ActionArg::Study => StartAction::Study,
        ActionArg::Quiz => StartAction::Quiz,
    }
}

fn report_banner(store: &Store) {
    if let Some(e) = store.error() {
        eprintln!("warning: {e}");
    }
}

fn card_cmd(store: &mut Store, cmd: CardCmd) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let Some(c) = store.add(&a.front, &a.back) else {
                bail!("front and back must not be blank");
            };
            report_banner(store);
            println!("{}", c.id);
        }
        CardCmd::List => {
            for c in store.list() {
                let created = c
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\t{}\t{}", c.id, c.front, c.back, created);
            }
        }
        CardCmd::Edit(e) => {
            let Some(card) = store.get(e.card_id).cloned() else {
                bail!("card not found: {}", e.card_id);
            };
            let front = e.front.unwrap_or(card.front);
            let back = e.back.unwrap_or(card.back);
            if store.update(card.id, &front, &back).is_none() {
                bail!("front and back must not be blank");
            }
            report_banner(store);
            println!("ok");
        }
        CardCmd::Rm { card_id } => {
            if !store.delete(card_id) {
                bail!("card not found: {card_id}");
            }
            report_banner(store);
            println!("ok");
        }
        CardCmd::Clear { yes } => {
            if !yes {
                bail!("refusing to delete {} cards without --yes", store.len());
            }
            store.clear();
            report_banner(store);
            println!("ok");
        }
    }
    Ok(())
}

/// Runs study rounds until the user stops. Returns the last finished
/// round's score, or `None` if they quit midway.
pub fn study_loop<R: BufRead, W: Write>(cards: &[Card], input: &mut R, out: &mut W) -> Result<Option<Score>> {
    let mut session = match StudySession::start(cards) {
        Ok(s) => s,
        Err(_) => {
            writeln!(out, "no cards yet; add some with `flashdeck card add`")?;
            return Ok(None);
        }
    };

    loop {
        while let Some(card) = session.current().cloned() {
            writeln!(out, "\n[{}/{}] Q: {}", session.position() + 1, session.len(), card.front)?;
            if read_line(input, out, "[enter=show]")?.is_none() {
                return Ok(None);
            }
            writeln!(out, "A: {}", card.back)?;
            writeln!(out, "[k=know, l=still learning, q=quit]")?;
            let recall = loop {
                let Some(line) = read_line(input, out, "> ")? else {
                    return Ok(None);
                };
                match line.trim().to_lowercase().as_str() {
                    "k" | "know" | "y" => break Recall::Known,
                    "l" | "learning" | "n" => break Recall::StillLearning,
                    "q" | "quit" => return Ok(None),
                    _ => writeln!(out, "enter k, l, or q")?,
                }
            };
            session.answer(recall);
        }

        let score = session.score();
        writeln!(
            out,
            "\nknown {}/{} ({}%)",
            score.correct,
            score.total,
            session.percentage().unwrap_or(0)
        )?;
        if !wants_restart(input, out)? {
            return Ok(Some(score));
        }
        session.restart();
    }
}

/// Runs quiz rounds until the user stops. Same return contract as
/// [`study_loop`].
pub fn quiz_loop<R: BufRead, W: Write>(cards: &[Card], input: &mut R, out: &mut W) -> Result<Option<Score>> {
    let mut session = match QuizSession::start(cards) {
        Ok(s) => s,
        Err(e) => {
            writeln!(out, "a quiz {e}; add more cards first")?;
            return Ok(None);
        }
    };

    loop {
        while let Some(q) = session.question().cloned() {
            writeln!(out, "\n[{}/{}] Q: {}", session.position() + 1, session.len(), q.prompt)?;
            for (i, opt) in q.options.iter().enumerate() {
                writeln!(out, "  {}. {}", option_letter(i), opt)?;
            }
            let choice = loop {
                let Some(line) = read_line(input, out, "answer> ")? else {
                    return Ok(None);
                };
                let line = line.trim().to_lowercase();
                if line == "q" || line == "quit" {
                    return Ok(None);
                }
                match parse_choice(&line, q.options.len()) {
                    Some(i) => break i,
                    None => writeln!(out, "enter a letter A-{} or q", option_letter(q.options.len() - 1))?,
                }
            };
            match session.select(choice) {
                Some(true) => writeln!(out, "correct")?,
                _ => writeln!(out, "wrong, answer: {}", q.correct_answer)?,
            }
            let label = if session.is_last() { "[enter=results]" } else { "[enter=next]" };
            if read_line(input, out, label)?.is_none() {
                return Ok(None);
            }
            session.next();
        }

        let score = session.score();
        writeln!(
            out,
            "\nscore {}/{} ({}%)",
            score.correct,
            score.total,
            session.percentage().unwrap_or(0)
        )?;
        if !wants_restart(input, out)? {
            return Ok(Some(score));
        }
        session.restart();
    }
}

pub fn option_letter(i: usize) -> char {
    (b'A' + i as u8) as char
}

fn parse_choice(s: &str, n: usize) -> Option<usize> {
    let idx = match s.chars().next()? {
        c @ 'a'..='z' => c as usize - 'a' as usize,
        c @ '1'..='9' => c as usize - '1' as usize,
        _ => return None,
    };
    (s.chars().count() == 1 && idx < n).then_some(idx)
}

fn wants_restart<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    let line = read_line(input, out, "[r=restart, enter=done] ")?;
    Ok(matches!(line.as_deref().map(str::trim), Some("r") | Some("R")))
}

fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush().ok();
    let mut s = String::new();
    if input.read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s))
}

fn export_cmd(store: &Store, cmd: ExportCmd) -> Result<()> {
    match cmd {
        ExportCmd::Json { path } => {
            std::fs::write(&path, encode_cards_pretty(store.list())?)?;
            println!("wrote {}", path.display());
        }
        ExportCmd::Csv { path } => {
            let mut wtr = csv::Writer::from_path(&path)?;
            for c in store.list() {
                wtr.serialize(CsvRow {
                    front: c.front.clone(),
                    back: c.back.clone(),
                })?;
            }
            wtr.flush()?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn import_cmd(store: &mut Store, cmd: ImportCmd) -> Result<()> {
    let rows: Vec<(String, String)> = match cmd {
        ImportCmd::Json { path } => {
            let data = std::fs::read_to_string(&path)?;
            decode_cards(&data)?
                .into_iter()
                .map(|c| (c.front, c.back))
                .collect()
        }
        ImportCmd::Csv { path } => {
            let mut rdr = csv::Reader::from_path(&path)?;
            let mut rows = Vec::new();
            for rec in rdr.deserialize() {
                let row: CsvRow = rec?;
                rows.push((row.front, row.back));
            }
            rows
        }
    };
    let (added, skipped) = import_rows(store, &rows);
    report_banner(store);
    println!("imported {added}, skipped {skipped}");
    Ok(())
}

fn import_rows(store: &mut Store, rows: &[(String, String)]) -> (usize, usize) {
    let mut added = 0;
    for (front, back) in rows {
        if store.add(front, back).is_some() {
            added += 1;
        }
    }
    (added, rows.len() - added)
}

#[derive(serde::Serialize, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    front: String,
    #[serde(default)]
    back: String,
}

fn doctor_cmd(store: &Store, args: &Cli) -> Result<()> {
    let backend = match args.store {
        StoreKind::Json => "json",
        StoreKind::Sqlite => "sqlite",
    };
    println!("backend\t{backend}");
    println!("data dir\t{}", data_dir(args).display());
    println!("slot\t{}", args.key);
    println!(
        "storage\t{}",
        if store.storage_available() { "available" } else { "unavailable" }
    );
    println!("cards\t{}", store.len());
    if let Some(e) = store.error() {
        println!("error\t{e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use flashdeck_core::Card;
    use std::ffi::OsStr;
    use std::io::Cursor;

    fn cards() -> Vec<Card> {
        vec![Card::new(1, "A", "1"), Card::new(2, "B", "2"), Card::new(3, "C", "3")]
    }

    #[test]
    fn study_all_known() {
        let mut input = Cursor::new("\nk\n\nk\n\nk\n\n");
        let mut out = Vec::new();
        let score = study_loop(&cards(), &mut input, &mut out).unwrap();
        assert_eq!(score, Some(Score { correct: 3, total: 3 }));
        assert!(String::from_utf8(out).unwrap().contains("known 3/3 (100%)"));
    }

    #[test]
    fn study_quit_midway() {
        let mut input = Cursor::new("\nl\nq\n");
        let mut out = Vec::new();
        assert_eq!(study_loop(&cards(), &mut input, &mut out).unwrap(), None);
    }

    #[test]
    fn quiz_needs_two_cards() {
        let mut out = Vec::new();
        let one = vec![Card::new(1, "A", "1")];
        assert_eq!(quiz_loop(&one, &mut Cursor::new(""), &mut out).unwrap(), None);
        assert!(String::from_utf8(out).unwrap().contains("need at least 2 cards"));
    }

    #[test]
    fn quiz_counts_every_answer() {
        // Answer "a" three times; whatever the shuffle, three questions are scored.
        let mut input = Cursor::new("a\n\na\n\na\n\n");
        let mut out = Vec::new();
        let score = quiz_loop(&cards(), &mut input, &mut out).unwrap().unwrap();
        assert_eq!(score.total, 3);
    }

    #[test]
    fn import_skips_blank_rows() {
        let kv: Box<dyn KeyValueStore> = Box::new(flashdeck_core::MemoryKv::new());
        let mut store: Store = CardStore::load(kv, "flashcards");
        let rows = vec![
            ("hola".to_string(), "hello".to_string()),
            ("".to_string(), "orphan".to_string()),
            ("adios".to_string(), "goodbye".to_string()),
        ];
        assert_eq!(import_rows(&mut store, &rows), (2, 1));
        assert_eq!(store.list()[1].front, "adios");
    }

    #[test]
    fn csv_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cards.csv");

        let mut src: Store = CardStore::load(Box::new(flashdeck_core::MemoryKv::new()), "flashcards");
        src.add("hola", "hello").unwrap();
        src.add("uno, dos", "one, two").unwrap();
        export_cmd(&src, ExportCmd::Csv { path: path.clone() }).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("front,back"));

        let mut dst: Store = CardStore::load(Box::new(flashdeck_core::MemoryKv::new()), "flashcards");
        import_cmd(&mut dst, ImportCmd::Csv { path }).unwrap();
        assert_eq!(dst.len(), 2);
        assert_eq!(dst.list()[1].front, "uno, dos");
        assert_eq!(dst.list()[1].back, "one, two");
    }

    #[test]
    fn sqlite_db_dir_that_cannot_be_created_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let db = blocker.join("flashdeck.sqlite3");

        let args = Cli::try_parse_from([
            OsStr::new("flashdeck"),
            OsStr::new("--store"),
            OsStr::new("sqlite"),
            OsStr::new("--db-path"),
            db.as_os_str(),
            OsStr::new("doctor"),
        ])
        .unwrap();
        let err = open_store(&args).err().unwrap();
        assert!(format!("{err:#}").contains("creating"));
    }

    #[test]
    fn parses_choices() {
        assert_eq!(parse_choice("a", 4), Some(0));
        assert_eq!(parse_choice("d", 4), Some(3));
        assert_eq!(parse_choice("3", 4), Some(2));
        assert_eq!(parse_choice("e", 4), None);
        assert_eq!(parse_choice("ab", 4), None);
        assert_eq!(parse_choice("", 4), None);
    }
}
