use flashdeck_core::{decode_cards, encode_cards, Card, CardStore, MemoryKv, DEFAULT_CARDS_KEY};
use std::sync::Arc;

fn empty_store() -> (Arc<MemoryKv>, CardStore<Arc<MemoryKv>>) {
    let kv = Arc::new(MemoryKv::new());
    let store = CardStore::load(kv.clone(), DEFAULT_CARDS_KEY);
    (kv, store)
}

#[test]
fn add_appends_and_persists() {
    let (kv, mut store) = empty_store();
    let card = store.add("  hola ", "hello").expect("valid card");

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(card.id), Some(&card));
    assert_eq!(card.front, "hola");
    assert!(card.created_at.is_some());
    assert_eq!(card.created_at, card.updated_at);
    assert!(store.error().is_none());

    let persisted = decode_cards(&kv.peek(DEFAULT_CARDS_KEY).unwrap()).unwrap();
    assert_eq!(persisted, store.list());
}

#[test]
fn blank_sides_are_refused() {
    let (kv, mut store) = empty_store();
    assert!(store.add("", "x").is_none());
    assert!(store.add("x", "   ").is_none());
    assert!(store.add("\t\n", "\n").is_none());
    assert!(store.is_empty());
    assert!(kv.peek(DEFAULT_CARDS_KEY).is_none());
}

#[test]
fn ids_stay_unique_under_rapid_adds() {
    let (_kv, mut store) = empty_store();
    let ids: Vec<_> = (0..200)
        .map(|i| store.add(&format!("q{i}"), "a").unwrap().id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn new_ids_follow_loaded_ones() {
    let far_future = i64::MAX / 2;
    let seed = vec![Card::new(far_future, "a", "1")];
    let kv = MemoryKv::with_entry(DEFAULT_CARDS_KEY, &encode_cards(&seed).unwrap());
    let mut store = CardStore::load(kv, DEFAULT_CARDS_KEY);
    let card = store.add("b", "2").unwrap();
    assert_eq!(card.id, far_future + 1);
}

#[test]
fn update_keeps_identity() {
    let (_kv, mut store) = empty_store();
    let card = store.add("hola", "hello").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));

    let edited = store.update(card.id, "adios", " goodbye ").unwrap();
    assert_eq!(edited.id, card.id);
    assert_eq!(edited.created_at, card.created_at);
    assert_eq!(edited.front, "adios");
    assert_eq!(edited.back, "goodbye");
    assert!(edited.updated_at > card.updated_at);
    assert_eq!(store.list(), &[edited]);
}

#[test]
fn update_refuses_blank_or_unknown() {
    let (_kv, mut store) = empty_store();
    let card = store.add("hola", "hello").unwrap();
    assert!(store.update(card.id, "", "x").is_none());
    assert!(store.update(card.id + 1, "x", "y").is_none());
    assert_eq!(store.get(card.id).unwrap().front, "hola");
}

#[test]
fn delete_unknown_is_noop() {
    let (_kv, mut store) = empty_store();
    let card = store.add("a", "1").unwrap();
    assert!(!store.delete(card.id + 7));
    assert_eq!(store.len(), 1);
    assert!(store.delete(card.id));
    assert!(store.is_empty());
}

#[test]
fn clear_erases_slot() {
    let (kv, mut store) = empty_store();
    store.add("a", "1");
    store.add("b", "2");
    store.clear();
    assert!(store.is_empty());
    assert!(kv.peek(DEFAULT_CARDS_KEY).is_none());
}

#[test]
fn write_failure_keeps_memory_state() {
    let (kv, mut store) = empty_store();
    kv.fail_writes(true);

    let card = store.add("A", "1").expect("validation passes");
    assert!(store.error().is_some());
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.get(card.id).unwrap().back, "1");
    assert!(kv.peek(DEFAULT_CARDS_KEY).is_none());

    kv.fail_writes(false);
    store.add("B", "2").unwrap();
    assert!(store.error().is_none());
    let persisted = decode_cards(&kv.peek(DEFAULT_CARDS_KEY).unwrap()).unwrap();
    assert_eq!(persisted.len(), 2);
}

#[test]
fn unreadable_payload_loads_empty_with_error() {
    let kv = MemoryKv::with_entry(DEFAULT_CARDS_KEY, "{not json");
    let store = CardStore::load(kv, DEFAULT_CARDS_KEY);
    assert!(store.is_empty());
    assert!(store.error().is_some());
}

#[test]
fn read_failure_loads_empty_with_error() {
    let kv = MemoryKv::new();
    kv.fail_reads(true);
    let mut store = CardStore::load(kv, DEFAULT_CARDS_KEY);
    assert!(store.is_empty());
    assert!(store.error().is_some());
    store.dismiss_error();
    assert!(store.error().is_none());
}

#[test]
fn probe_reflects_backend() {
    let (kv, store) = empty_store();
    assert!(store.storage_available());
    kv.fail_writes(true);
    assert!(!store.storage_available());
}

#[test]
fn payload_round_trips() {
    let mut legacy = Card::new(1_700_000_000_000, "front", "back");
    legacy.created_at = None;
    legacy.updated_at = None;
    let cards = vec![
        Card::new(1, "¿qué?", "what"),
        legacy,
        Card::new(3, "line\nbreak", "\"quoted\""),
    ];
    let payload = encode_cards(&cards).unwrap();
    assert!(payload.contains("createdAt"));
    assert_eq!(decode_cards(&payload).unwrap(), cards);
}

#[test]
fn decodes_minimal_records() {
    let cards = decode_cards(r#"[{"id":5,"front":"A","back":"1"}]"#).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, 5);
    assert!(cards[0].created_at.is_none());
}
