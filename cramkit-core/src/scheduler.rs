//! SM-2-style grading update for the four-button review flow.

use crate::{CardStatus, Flashcard, Grade, Review, EF_MAX, EF_MIN};
use chrono::{DateTime, Duration, Utc};

/// Interval at which a card is considered mastered.
pub const MASTERY_INTERVAL_DAYS: u32 = 21;

const FIRST_INTERVAL: u32 = 1;
const EASY_FIRST_INTERVAL: u32 = 4;
const SECOND_INTERVAL: u32 = 6;
const HARD_MULTIPLIER: f32 = 1.2;

pub struct ScheduleOutcome {
    pub updated_card: Flashcard,
    pub review: Review,
}

fn clamp_ef(x: f32) -> f32 {
    x.clamp(EF_MIN, EF_MAX)
}

fn ease_delta(grade: Grade) -> f32 {
    match grade {
        Grade::Again => -0.20,
        Grade::Hard => -0.15,
        Grade::Good => 0.0,
        Grade::Easy => 0.15,
    }
}

/// Apply one grade to a card, producing the rescheduled card and the review
/// log entry. `Again` resets the streak and interval and drops the card back
/// to learning; successful grades grow the interval (1, 6, then interval*EF,
/// with a fixed 1.2 multiplier for `Hard`).
pub fn apply_grade(mut card: Flashcard, grade: Grade, now: DateTime<Utc>) -> ScheduleOutcome {
    let new_ef = clamp_ef(card.ease_factor + ease_delta(grade));

    let new_streak;
    let new_interval;
    let new_status;

    if grade.is_success() {
        new_streak = card.streak + 1;
        new_interval = if new_streak == 1 {
            if grade == Grade::Easy {
                EASY_FIRST_INTERVAL
            } else {
                FIRST_INTERVAL
            }
        } else if new_streak == 2 {
            SECOND_INTERVAL
        } else {
            let base = card.interval_days.max(1) as f32;
            let mult = if grade == Grade::Hard { HARD_MULTIPLIER } else { new_ef };
            (base * mult).round().max(1.0) as u32
        };

        let progressed = match card.status {
            CardStatus::New => CardStatus::Learning,
            CardStatus::Learning if grade != Grade::Hard => CardStatus::Review,
            other => other,
        };
        new_status = if new_interval >= MASTERY_INTERVAL_DAYS {
            CardStatus::Mastered
        } else {
            progressed
        };
    } else {
        new_streak = 0;
        new_interval = FIRST_INTERVAL;
        new_status = CardStatus::Learning;
    }

    card.ease_factor = new_ef;
    card.streak = new_streak;
    card.review_count += 1;
    card.interval_days = new_interval;
    card.status = new_status;
    card.last_reviewed = Some(now);
    card.next_review = now + Duration::days(new_interval as i64);

    let review = Review::new(card.id, grade, now, new_interval, new_ef);

    ScheduleOutcome { updated_card: card, review }
}
