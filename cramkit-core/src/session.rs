//! Review-session state machine: flip, grade, and bounded navigation over the
//! cards of one selected deck.
//!
//! Navigation and shuffle are single-flight: a successful move parks the
//! session in `Transition::InFlight`, and further moves are dropped until the
//! presentation layer calls [`ReviewSession::settle`]. How long the visible
//! transition takes is entirely the caller's concern; no timers live here.

use crate::{apply_grade, DeckId, Flashcard, Grade, ScheduleOutcome};
use chrono::{DateTime, Utc};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Idle,
    InFlight,
}

/// What grading did with the session afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeStep {
    /// Moved on to the next card, front shown.
    Advanced,
    /// The graded card was the last one; the session is over.
    Finished,
}

pub struct GradeResult {
    pub outcome: ScheduleOutcome,
    pub step: GradeStep,
}

pub struct ReviewSession {
    deck_id: DeckId,
    cards: Vec<Flashcard>,
    index: usize,
    face: Face,
    transition: Transition,
}

impl ReviewSession {
    /// Enter reviewing at card index 0, front shown.
    pub fn start(deck_id: DeckId, cards: Vec<Flashcard>) -> Self {
        Self {
            deck_id,
            cards,
            index: 0,
            face: Face::Front,
            transition: Transition::Idle,
        }
    }

    pub fn deck_id(&self) -> DeckId {
        self.deck_id
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition == Transition::InFlight
    }

    /// (current 1-based, total, percentage) for a progress bar.
    pub fn progress(&self) -> (usize, usize, u8) {
        let total = self.cards.len();
        if total == 0 {
            return (0, 0, 0);
        }
        let current = self.index + 1;
        let pct = ((current as f32 / total as f32) * 100.0).round() as u8;
        (current, total, pct)
    }

    /// Toggle front/back of the current card. Pure view state, never guarded.
    pub fn flip(&mut self) {
        self.face = match self.face {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        };
    }

    /// Grade the current card, reschedule it in place, and advance (or finish
    /// at the last card). Returns `None` when the session holds no cards.
    pub fn grade(&mut self, grade: Grade, now: DateTime<Utc>) -> Option<GradeResult> {
        let card = self.cards.get(self.index)?.clone();
        let outcome = apply_grade(card, grade, now);
        self.cards[self.index] = outcome.updated_card.clone();

        let step = if self.index + 1 < self.cards.len() {
            self.index += 1;
            self.face = Face::Front;
            GradeStep::Advanced
        } else {
            GradeStep::Finished
        };
        Some(GradeResult { outcome, step })
    }

    /// Bounded forward move. Returns false (and does nothing) at the last
    /// index or while a transition is in flight.
    pub fn next(&mut self) -> bool {
        if self.is_transitioning() || self.index + 1 >= self.cards.len() {
            return false;
        }
        self.move_to(self.index + 1);
        true
    }

    /// Bounded backward move; no-op at index 0.
    pub fn previous(&mut self) -> bool {
        if self.is_transitioning() || self.index == 0 {
            return false;
        }
        self.move_to(self.index - 1);
        true
    }

    /// Jump to an arbitrary index. Jumping to the current index, out of
    /// bounds, or mid-transition is a no-op.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if self.is_transitioning() || index == self.index || index >= self.cards.len() {
            return false;
        }
        self.move_to(index);
        true
    }

    /// Move to a uniformly random index different from the current one.
    /// Requires at least two cards; same single-flight guard as navigation.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.is_transitioning() || self.cards.len() < 2 {
            return false;
        }
        let target = loop {
            let i = rng.gen_range(0..self.cards.len());
            if i != self.index {
                break i;
            }
        };
        self.move_to(target);
        true
    }

    /// Mark the in-flight transition as visually complete, re-enabling
    /// navigation.
    pub fn settle(&mut self) {
        self.transition = Transition::Idle;
    }

    fn move_to(&mut self, index: usize) {
        self.index = index;
        self.face = Face::Front;
        self.transition = Transition::InFlight;
    }
}
