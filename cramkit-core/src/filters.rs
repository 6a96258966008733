use crate::{Deck, Flashcard};

/// Current values of the deck-list controls. Filtering is a pure function of
/// the deck collection and this struct, recomputed on every read.
#[derive(Clone, Debug, Default)]
pub struct DeckFilter {
    pub course: Option<String>,
    pub new_only: bool,
    pub search: String,
}

/// Filter and order decks: course equality, "has new cards", free-text search
/// over name and course, then favorites first. The sort is stable, so
/// non-favorites keep their input order and favorites order by ascending
/// favorited-at.
pub fn filter_decks(decks: &[Deck], filter: &DeckFilter) -> Vec<Deck> {
    let mut out: Vec<Deck> = decks
        .iter()
        .filter(|d| {
            filter
                .course
                .as_ref()
                .map(|c| d.course.eq_ignore_ascii_case(c))
                .unwrap_or(true)
        })
        .filter(|d| !filter.new_only || d.new_cards > 0)
        .filter(|d| {
            let q = filter.search.trim().to_lowercase();
            q.is_empty()
                || d.name.to_lowercase().contains(&q)
                || d.course.to_lowercase().contains(&q)
        })
        .cloned()
        .collect();

    out.sort_by_key(|d| match (d.favorite, d.favorited_at) {
        (true, Some(t)) => (0u8, t),
        (true, None) => (0, chrono::DateTime::<chrono::Utc>::MIN_UTC),
        (false, _) => (1, chrono::DateTime::<chrono::Utc>::MIN_UTC),
    });
    out
}

pub fn filter_cards_by_text(cards: &[Flashcard], query: &str) -> Vec<Flashcard> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| {
            c.front.to_lowercase().contains(&q)
                || c.back.to_lowercase().contains(&q)
                || c.course.to_lowercase().contains(&q)
        })
        .cloned()
        .collect()
}
