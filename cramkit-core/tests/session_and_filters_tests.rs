use chrono::{Duration, Utc};
use cramkit_core::{
    filter_decks, CardStatus, Deck, DeckFilter, Face, Flashcard, Grade, GradeStep, ReviewSession,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn deck_with_cards(n: usize) -> (Deck, Vec<Flashcard>) {
    let deck = Deck::new("Calc", "Mathematics");
    let cards = (0..n)
        .map(|i| Flashcard::new(deck.id, format!("q{i}"), format!("a{i}"), "Mathematics", 3))
        .collect();
    (deck, cards)
}

#[test]
fn favorites_sort_first_by_favorited_at() {
    let now = Utc::now();
    let mut a = Deck::new("A", "Mathematics");
    a.set_favorite(true, now - Duration::days(2));
    let mut b = Deck::new("B", "Chemistry");
    b.set_favorite(true, now - Duration::days(1));
    let c = Deck::new("C", "History");

    // scrambled input order must not matter for favorites
    let filtered = filter_decks(&[c.clone(), b.clone(), a.clone()], &DeckFilter::default());
    let names: Vec<_> = filtered.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn non_favorites_keep_input_order() {
    let a = Deck::new("A", "Mathematics");
    let b = Deck::new("B", "Chemistry");
    let c = Deck::new("C", "History");
    let filtered = filter_decks(&[b.clone(), c.clone(), a.clone()], &DeckFilter::default());
    let names: Vec<_> = filtered.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["B", "C", "A"]);
}

#[test]
fn course_new_only_and_search_filters() {
    let mut a = Deck::new("Calculus Fundamentals", "Mathematics");
    a.new_cards = 3;
    let b = Deck::new("Organic Reactions", "Chemistry");
    let decks = [a.clone(), b.clone()];

    let by_course = filter_decks(
        &decks,
        &DeckFilter { course: Some("chemistry".into()), ..Default::default() },
    );
    assert_eq!(by_course.len(), 1);
    assert_eq!(by_course[0].name, "Organic Reactions");

    let new_only = filter_decks(&decks, &DeckFilter { new_only: true, ..Default::default() });
    assert_eq!(new_only.len(), 1);
    assert_eq!(new_only[0].name, "Calculus Fundamentals");

    // search matches name or course, case-insensitively
    let by_search = filter_decks(&decks, &DeckFilter { search: "CALC".into(), ..Default::default() });
    assert_eq!(by_search.len(), 1);
    let by_course_text = filter_decks(&decks, &DeckFilter { search: "chem".into(), ..Default::default() });
    assert_eq!(by_course_text.len(), 1);
}

#[test]
fn session_starts_at_front_of_first_card() {
    let (deck, cards) = deck_with_cards(3);
    let session = ReviewSession::start(deck.id, cards);
    assert_eq!(session.index(), 0);
    assert_eq!(session.face(), Face::Front);
    assert_eq!(session.progress(), (1, 3, 33));
}

#[test]
fn flip_toggles_without_touching_data() {
    let (deck, cards) = deck_with_cards(2);
    let mut session = ReviewSession::start(deck.id, cards);
    session.flip();
    assert_eq!(session.face(), Face::Back);
    session.flip();
    assert_eq!(session.face(), Face::Front);
    assert_eq!(session.current().unwrap().review_count, 0);
}

#[test]
fn navigation_noops_at_boundaries() {
    let (deck, cards) = deck_with_cards(2);
    let mut session = ReviewSession::start(deck.id, cards);

    assert!(!session.previous());

    assert!(session.next());
    session.settle();
    assert_eq!(session.index(), 1);
    assert!(!session.next());

    assert!(!session.jump_to(1)); // current index
    assert!(!session.jump_to(5)); // out of bounds
}

#[test]
fn moves_are_dropped_while_in_flight() {
    let (deck, cards) = deck_with_cards(3);
    let mut session = ReviewSession::start(deck.id, cards);

    assert!(session.next());
    assert!(session.is_transitioning());
    assert!(!session.next());
    assert!(!session.previous());
    assert!(!session.jump_to(2));
    assert_eq!(session.index(), 1);

    session.settle();
    assert!(session.next());
}

#[test]
fn shuffle_requires_two_cards_and_changes_index() {
    let mut rng = StdRng::seed_from_u64(7);

    let (deck, cards) = deck_with_cards(1);
    let mut single = ReviewSession::start(deck.id, cards);
    assert!(!single.shuffle(&mut rng));

    let (deck, cards) = deck_with_cards(5);
    let mut session = ReviewSession::start(deck.id, cards);
    for _ in 0..20 {
        let before = session.index();
        assert!(session.shuffle(&mut rng));
        assert_ne!(session.index(), before);
        assert_eq!(session.face(), Face::Front);
        session.settle();
    }
}

#[test]
fn grading_advances_and_finishes_at_last_card() {
    let now = Utc::now();
    let (deck, cards) = deck_with_cards(2);
    let mut session = ReviewSession::start(deck.id, cards);
    session.flip();

    let first = session.grade(Grade::Good, now).unwrap();
    assert_eq!(first.step, GradeStep::Advanced);
    assert_eq!(session.index(), 1);
    assert_eq!(session.face(), Face::Front);
    assert_eq!(first.outcome.updated_card.status, CardStatus::Learning);

    let last = session.grade(Grade::Again, now).unwrap();
    assert_eq!(last.step, GradeStep::Finished);
    assert_eq!(last.outcome.updated_card.streak, 0);
}

#[test]
fn grading_updates_card_in_session() {
    let now = Utc::now();
    let (deck, cards) = deck_with_cards(2);
    let mut session = ReviewSession::start(deck.id, cards);
    session.grade(Grade::Easy, now).unwrap();
    // the stored copy of card 0 carries the reschedule
    let card = &session.cards()[0];
    assert_eq!(card.review_count, 1);
    assert_eq!(card.interval_days, 4);
    assert_eq!(card.last_reviewed, Some(now));
}
