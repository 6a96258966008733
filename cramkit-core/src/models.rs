use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type DeckId = Uuid;
pub type CardId = Uuid;
pub type ReviewId = Uuid;

pub const EF_MIN: f32 = 1.3;
pub const EF_MAX: f32 = 2.8;
pub const EF_DEFAULT: f32 = 2.5;

pub const DIFFICULTY_MIN: u8 = 1;
pub const DIFFICULTY_MAX: u8 = 5;
pub const DIFFICULTY_DEFAULT: u8 = 3;

/// Recall quality reported by the user after seeing the back of a card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub fn as_score(&self) -> i32 {
        match self {
            Grade::Again => 0,
            Grade::Hard => 1,
            Grade::Good => 2,
            Grade::Easy => 3,
        }
    }

    /// Anything but `Again` counts as a successful recall.
    pub fn is_success(&self) -> bool {
        !matches!(self, Grade::Again)
    }
}

/// Where a card sits in its learning lifecycle. Grading only moves this
/// forward (new -> learning -> review -> mastered); `Again` regresses to
/// learning.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Mastered,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub course: String,
    pub total_cards: u32,
    pub new_cards: u32,
    pub favorite: bool,
    /// Present iff `favorite`; favorites list in ascending order of this.
    pub favorited_at: Option<DateTime<Utc>>,
    pub last_studied: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: impl Into<String>, course: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            course: course.into(),
            total_cards: 0,
            new_cards: 0,
            favorite: false,
            favorited_at: None,
            last_studied: None,
            created_at: Utc::now(),
        }
    }

    pub fn set_favorite(&mut self, favorite: bool, at: DateTime<Utc>) {
        self.favorite = favorite;
        self.favorited_at = favorite.then_some(at);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: CardId,
    pub deck_id: DeckId,
    pub front: String,
    pub back: String,
    pub course: String,
    pub difficulty: u8,

    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: DateTime<Utc>,
    pub interval_days: u32,
    pub ease_factor: f32,
    pub review_count: u32,
    pub streak: u32,
    pub status: CardStatus,

    pub created_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(
        deck_id: DeckId,
        front: impl Into<String>,
        back: impl Into<String>,
        course: impl Into<String>,
        difficulty: u8,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front: front.into(),
            back: back.into(),
            course: course.into(),
            difficulty: difficulty.clamp(DIFFICULTY_MIN, DIFFICULTY_MAX),
            last_reviewed: None,
            next_review: now,
            interval_days: 1,
            ease_factor: EF_DEFAULT,
            review_count: 0,
            streak: 0,
            status: CardStatus::New,
            created_at: now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.status == CardStatus::New
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// One graded recall, appended to the review log for stats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub card_id: CardId,
    pub grade: Grade,
    pub reviewed_at: DateTime<Utc>,
    pub interval_applied: u32,
    pub ease_after: f32,
}

impl Review {
    pub fn new(
        card_id: CardId,
        grade: Grade,
        reviewed_at: DateTime<Utc>,
        interval_applied: u32,
        ease_after: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id,
            grade,
            reviewed_at,
            interval_applied,
            ease_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_card_defaults() {
        let deck = Deck::new("Calc", "Mathematics");
        let card = Flashcard::new(deck.id, "q", "a", "Mathematics", 2);
        assert_eq!(card.status, CardStatus::New);
        assert_eq!(card.interval_days, 1);
        assert_eq!(card.ease_factor, EF_DEFAULT);
        assert_eq!(card.review_count, 0);
        assert_eq!(card.streak, 0);
        assert!(card.last_reviewed.is_none());
    }

    #[test]
    fn difficulty_is_clamped_into_range() {
        let deck = Deck::new("Calc", "Mathematics");
        assert_eq!(Flashcard::new(deck.id, "q", "a", "m", 0).difficulty, 1);
        assert_eq!(Flashcard::new(deck.id, "q", "a", "m", 9).difficulty, 5);
        assert_eq!(Flashcard::new(deck.id, "q", "a", "m", 4).difficulty, 4);
    }

    #[test]
    fn unfavoriting_clears_timestamp() {
        let mut deck = Deck::new("Calc", "Mathematics");
        deck.set_favorite(true, Utc::now());
        assert!(deck.favorited_at.is_some());
        deck.set_favorite(false, Utc::now());
        assert!(deck.favorited_at.is_none());
    }
}
