use flashdeck_core::{
    build_options, shuffle, Card, CoreError, Phase, QuizSession, Recall, Score, StudySession,
    PLACEHOLDER_SUFFIX,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn deck(pairs: &[(&str, &str)]) -> Vec<Card> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (f, b))| Card::new(i as i64 + 1, *f, *b))
        .collect()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn shuffle_is_a_permutation() {
    let mut v: Vec<u32> = (0..50).collect();
    shuffle(&mut v, &mut rng(9));
    let mut sorted = v.clone();
    sorted.sort();
    assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    assert_ne!(v, sorted);

    let mut empty: Vec<u32> = Vec::new();
    shuffle(&mut empty, &mut rng(1));
    assert!(empty.is_empty());
}

#[test]
fn shuffle_reaches_every_ordering() {
    let mut seen = HashSet::new();
    let mut r = rng(42);
    for _ in 0..600 {
        let mut v = [1, 2, 3];
        shuffle(&mut v, &mut r);
        seen.insert(v);
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn percentage_rounds_half_up() {
    assert_eq!(Score::default().percentage(), None);
    assert_eq!(Score { correct: 1, total: 8 }.percentage(), Some(13));
    assert_eq!(Score { correct: 1, total: 3 }.percentage(), Some(33));
    assert_eq!(Score { correct: 2, total: 3 }.percentage(), Some(67));
    assert_eq!(Score { correct: 4, total: 4 }.percentage(), Some(100));
}

#[test]
fn study_all_known_finishes_with_full_score() {
    let cards = deck(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
    let mut s = StudySession::with_rng(&cards, rng(3)).unwrap();

    let mut fronts = HashSet::new();
    while let Some(card) = s.current() {
        fronts.insert(card.front.clone());
        s.answer(Recall::Known);
    }

    assert_eq!(fronts.len(), 4);
    assert_eq!(s.phase(), Phase::Finished);
    assert_eq!(s.score(), Score { correct: 4, total: 4 });
    assert_eq!(s.percentage(), Some(100));
}

#[test]
fn study_still_learning_counts_total_only() {
    let cards = deck(&[("a", "1"), ("b", "2")]);
    let mut s = StudySession::with_rng(&cards, rng(5)).unwrap();
    s.answer(Recall::StillLearning);
    assert_eq!(s.percentage(), None);
    s.answer(Recall::Known);
    assert_eq!(s.score(), Score { correct: 1, total: 2 });
    assert_eq!(s.percentage(), Some(50));

    s.answer(Recall::Known);
    assert_eq!(s.score().total, 2);
}

#[test]
fn study_order_is_fixed_until_restart() {
    let cards = deck(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")]);
    let mut s = StudySession::with_rng(&cards, rng(11)).unwrap();
    let order: Vec<_> = s.order().to_vec();
    s.answer(Recall::Known);
    s.answer(Recall::StillLearning);
    assert_eq!(s.order(), order.as_slice());
    assert_eq!(s.position(), 2);

    s.restart();
    assert_eq!(s.position(), 0);
    assert_eq!(s.score(), Score::default());
    assert_eq!(s.phase(), Phase::InProgress);
    assert_eq!(s.len(), 5);
}

#[test]
fn study_flip_resets_on_advance() {
    let cards = deck(&[("a", "1"), ("b", "2")]);
    let mut s = StudySession::with_rng(&cards, rng(1)).unwrap();
    assert!(!s.is_revealed());
    s.flip();
    assert!(s.is_revealed());
    s.answer(Recall::Known);
    assert!(!s.is_revealed());
}

#[test]
fn study_needs_a_card() {
    assert!(matches!(
        StudySession::start(&[]),
        Err(CoreError::NotEnoughCards { required: 1, available: 0 })
    ));
}

#[test]
fn quiz_needs_two_cards() {
    let one = deck(&[("A", "1")]);
    assert!(matches!(
        QuizSession::start(&one),
        Err(CoreError::NotEnoughCards { required: 2, available: 1 })
    ));
    let two = deck(&[("A", "1"), ("B", "2")]);
    assert!(QuizSession::start(&two).is_ok());
}

#[test]
fn options_with_two_cards_use_placeholders() {
    let cards = deck(&[("A", "1"), ("B", "2")]);
    let opts = build_options(&cards, 0, &mut rng(2));
    assert_eq!(opts.len(), 4);
    assert_eq!(opts.iter().filter(|o| *o == "1").count(), 1);
    assert_eq!(opts.iter().filter(|o| *o == "2").count(), 1);
    let placeholder = format!("1{PLACEHOLDER_SUFFIX}");
    assert_eq!(opts.iter().filter(|o| **o == placeholder).count(), 2);
}

#[test]
fn options_skip_duplicate_backs() {
    let cards = deck(&[("A", "same"), ("B", "same"), ("C", "other"), ("D", "other")]);
    let opts = build_options(&cards, 0, &mut rng(4));
    assert_eq!(opts.len(), 4);
    assert_eq!(opts.iter().filter(|o| *o == "same").count(), 1);
    assert_eq!(opts.iter().filter(|o| *o == "other").count(), 1);
    assert_eq!(
        opts.iter().filter(|o| o.ends_with(PLACEHOLDER_SUFFIX)).count(),
        2
    );
}

#[test]
fn options_draw_three_real_distractors_from_large_decks() {
    let pairs: Vec<(String, String)> = (0..10).map(|i| (format!("q{i}"), format!("a{i}"))).collect();
    let refs: Vec<(&str, &str)> = pairs.iter().map(|(f, b)| (f.as_str(), b.as_str())).collect();
    let cards = deck(&refs);
    let mut r = rng(8);
    for idx in 0..cards.len() {
        let opts = build_options(&cards, idx, &mut r);
        let distinct: HashSet<_> = opts.iter().collect();
        assert_eq!(opts.len(), 4);
        assert_eq!(distinct.len(), 4);
        assert!(opts.contains(&cards[idx].back));
        assert!(!opts.iter().any(|o| o.ends_with(PLACEHOLDER_SUFFIX)));
    }
}

#[test]
fn quiz_answer_then_advance() {
    let cards = deck(&[("A", "1"), ("B", "2"), ("C", "3")]);
    let mut q = QuizSession::with_rng(&cards, rng(6)).unwrap();

    assert!(!q.next(), "cannot skip an unanswered question");

    let question = q.question().unwrap().clone();
    assert_eq!(question.options.len(), 4);
    assert_eq!(
        question.options.iter().filter(|o| **o == question.correct_answer).count(),
        1
    );
    let right = question
        .options
        .iter()
        .position(|o| *o == question.correct_answer)
        .unwrap();

    assert_eq!(q.select(right), Some(true));
    assert_eq!(q.select((right + 1) % 4), None, "answer is locked");
    assert_eq!(q.score(), Score { correct: 1, total: 1 });
    assert_eq!(q.position(), 0, "selection does not advance");
    assert_eq!(q.question().unwrap().was_correct(), Some(true));

    assert!(q.next());
    assert_eq!(q.position(), 1);
    let second = q.question().unwrap();
    assert!(!second.answered);
    assert_eq!(second.prompt, q.current().unwrap().front);
}

#[test]
fn quiz_wrong_answers_count_toward_total() {
    let cards = deck(&[("A", "1"), ("B", "2")]);
    let mut q = QuizSession::with_rng(&cards, rng(12)).unwrap();
    while !q.is_finished() {
        let wrong = {
            let question = q.question().unwrap();
            (0..4).find(|i| !question.is_correct_option(*i)).unwrap()
        };
        assert_eq!(q.select(wrong), Some(false));
        assert!(q.next());
    }
    assert_eq!(q.score(), Score { correct: 0, total: 2 });
    assert_eq!(q.percentage(), Some(0));
    assert!(q.question().is_none());
    assert!(!q.next());
}

#[test]
fn quiz_restart_resets_everything() {
    let cards = deck(&[("A", "1"), ("B", "2"), ("C", "3")]);
    let mut q = QuizSession::with_rng(&cards, rng(21)).unwrap();
    q.select(0);
    q.next();
    q.restart();
    assert_eq!(q.position(), 0);
    assert_eq!(q.score(), Score::default());
    assert_eq!(q.phase(), Phase::InProgress);
    assert!(!q.question().unwrap().answered);
}

#[test]
fn quiz_out_of_range_selection_is_ignored() {
    let cards = deck(&[("A", "1"), ("B", "2")]);
    let mut q = QuizSession::with_rng(&cards, rng(0)).unwrap();
    assert_eq!(q.select(4), None);
    assert!(!q.question().unwrap().answered);
    assert_eq!(q.score().total, 0);
}
