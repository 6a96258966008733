use chrono::{Duration, Utc};
use cramkit_core::{apply_grade, CardStatus, Deck, Flashcard, Grade, EF_MAX, EF_MIN};

fn new_card() -> Flashcard {
    let deck = Deck::new("Test", "Biology");
    Flashcard::new(deck.id, "hola", "hello", "Biology", 3)
}

#[test]
fn good_from_new_starts_learning() {
    let now = Utc::now();
    let out = apply_grade(new_card(), Grade::Good, now);
    let c = out.updated_card;

    assert_eq!(c.status, CardStatus::Learning);
    assert_eq!(c.streak, 1);
    assert_eq!(c.review_count, 1);
    assert_eq!(c.interval_days, 1);
    assert_eq!(c.last_reviewed, Some(now));
    assert_eq!(c.next_review, now + Duration::days(1));
    assert!(c.next_review >= c.last_reviewed.unwrap());
}

#[test]
fn easy_from_new_jumps_ahead() {
    let out = apply_grade(new_card(), Grade::Easy, Utc::now());
    let c = out.updated_card;
    assert_eq!(c.interval_days, 4);
    assert!(c.ease_factor > 2.5 && c.ease_factor <= EF_MAX);
}

#[test]
fn second_success_graduates_to_review() {
    let now = Utc::now();
    let card = apply_grade(new_card(), Grade::Good, now).updated_card;
    let c = apply_grade(card, Grade::Good, now).updated_card;
    assert_eq!(c.streak, 2);
    assert_eq!(c.interval_days, 6);
    assert_eq!(c.status, CardStatus::Review);
}

#[test]
fn third_success_grows_by_ease_factor() {
    let now = Utc::now();
    let mut card = new_card();
    card = apply_grade(card, Grade::Good, now).updated_card;
    card = apply_grade(card, Grade::Good, now).updated_card;
    let ef = card.ease_factor;
    let c = apply_grade(card, Grade::Good, now).updated_card;
    assert_eq!(c.interval_days, (6.0 * ef).round() as u32);
}

#[test]
fn hard_uses_fixed_multiplier_and_stays_learning() {
    let now = Utc::now();
    let mut card = new_card();
    card = apply_grade(card, Grade::Hard, now).updated_card;
    assert_eq!(card.status, CardStatus::Learning);
    card = apply_grade(card, Grade::Hard, now).updated_card;
    let c = apply_grade(card, Grade::Hard, now).updated_card;
    // streak 3: interval grows by the fixed hard multiplier, not the EF
    assert_eq!(c.interval_days, (6.0f32 * 1.2).round() as u32);
    assert_eq!(c.status, CardStatus::Learning);
}

#[test]
fn again_resets_streak_and_regresses() {
    let now = Utc::now();
    let mut card = new_card();
    card = apply_grade(card, Grade::Good, now).updated_card;
    card = apply_grade(card, Grade::Good, now).updated_card;
    assert_eq!(card.status, CardStatus::Review);

    let c = apply_grade(card, Grade::Again, now).updated_card;
    assert_eq!(c.streak, 0);
    assert_eq!(c.interval_days, 1);
    assert_eq!(c.status, CardStatus::Learning);
    assert!(c.ease_factor >= EF_MIN && c.ease_factor <= EF_MAX);
}

#[test]
fn ease_factor_never_leaves_bounds() {
    let now = Utc::now();
    let mut card = new_card();
    for _ in 0..30 {
        card = apply_grade(card, Grade::Again, now).updated_card;
    }
    assert_eq!(card.ease_factor, EF_MIN);

    let mut card = new_card();
    for _ in 0..30 {
        card = apply_grade(card, Grade::Easy, now).updated_card;
    }
    assert_eq!(card.ease_factor, EF_MAX);
}

#[test]
fn long_intervals_reach_mastered() {
    let now = Utc::now();
    let mut card = new_card();
    for _ in 0..6 {
        card = apply_grade(card, Grade::Good, now).updated_card;
    }
    assert!(card.interval_days >= 21);
    assert_eq!(card.status, CardStatus::Mastered);
}

#[test]
fn review_log_records_applied_values() {
    let now = Utc::now();
    let out = apply_grade(new_card(), Grade::Good, now);
    assert_eq!(out.review.card_id, out.updated_card.id);
    assert_eq!(out.review.interval_applied, out.updated_card.interval_days);
    assert_eq!(out.review.ease_after, out.updated_card.ease_factor);
    assert_eq!(out.review.reviewed_at, now);
}
