use crate::{CardId, CoreError, Deck, DeckId, Flashcard, Review};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryRepo {
    decks: RwLock<HashMap<DeckId, Deck>>,
    cards: RwLock<HashMap<CardId, Flashcard>>,
    reviews: RwLock<HashMap<CardId, Vec<Review>>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a deck's card counters in step with its cards. Callers must hold
    /// no lock on `decks` or `cards`.
    fn refresh_counts(&self, deck_id: DeckId) {
        let (total, fresh) = {
            let cards = self.cards.read();
            let in_deck = cards.values().filter(|c| c.deck_id == deck_id);
            in_deck.fold((0u32, 0u32), |(t, n), c| {
                (t + 1, n + u32::from(c.is_new()))
            })
        };
        if let Some(deck) = self.decks.write().get_mut(&deck_id) {
            deck.total_cards = total;
            deck.new_cards = fresh;
        }
    }
}

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
    async fn create_deck(&self, name: &str, course: &str) -> Result<Deck, CoreError> {
        let deck = Deck::new(name, course);
        let mut m = self.decks.write();
        if m.values().any(|d| d.name.eq_ignore_ascii_case(name)) {
            return Err(CoreError::Conflict("deck name already exists"));
        }
        m.insert(deck.id, deck.clone());
        Ok(deck)
    }

    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError> {
        self.decks
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("deck"))
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        Ok(self.decks.read().values().cloned().collect())
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError> {
        self.decks
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound("deck"))?;
        let mut cards = self.cards.write();
        let ids: Vec<CardId> = cards
            .values()
            .filter(|c| c.deck_id == id)
            .map(|c| c.id)
            .collect();
        for cid in ids {
            cards.remove(&cid);
            self.reviews.write().remove(&cid);
        }
        Ok(())
    }

    async fn set_favorite(&self, id: DeckId, favorite: bool) -> Result<Deck, CoreError> {
        let mut m = self.decks.write();
        let Some(deck) = m.get_mut(&id) else {
            return Err(CoreError::NotFound("deck"));
        };
        deck.set_favorite(favorite, Utc::now());
        Ok(deck.clone())
    }

    async fn touch_studied(&self, id: DeckId, at: DateTime<Utc>) -> Result<(), CoreError> {
        let mut m = self.decks.write();
        let Some(deck) = m.get_mut(&id) else {
            return Err(CoreError::NotFound("deck"));
        };
        deck.last_studied = Some(at);
        Ok(())
    }

    async fn add_card(
        &self,
        deck_id: DeckId,
        front: &str,
        back: &str,
        difficulty: u8,
    ) -> Result<Flashcard, CoreError> {
        let course = self
            .decks
            .read()
            .get(&deck_id)
            .map(|d| d.course.clone())
            .ok_or(CoreError::NotFound("deck"))?;
        let card = Flashcard::new(deck_id, front, back, course, difficulty);
        self.cards.write().insert(card.id, card.clone());
        self.refresh_counts(deck_id);
        Ok(card)
    }

    async fn get_card(&self, id: CardId) -> Result<Flashcard, CoreError> {
        self.cards
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("card"))
    }

    async fn list_cards(&self, deck_id: Option<DeckId>) -> Result<Vec<Flashcard>, CoreError> {
        let cards = self.cards.read();
        let mut v: Vec<Flashcard> = cards.values().cloned().collect();
        if let Some(did) = deck_id {
            v.retain(|c| c.deck_id == did);
        }
        Ok(v)
    }

    async fn update_card(&self, card: &Flashcard) -> Result<Flashcard, CoreError> {
        {
            let mut m = self.cards.write();
            if !m.contains_key(&card.id) {
                return Err(CoreError::NotFound("card"));
            }
            m.insert(card.id, card.clone());
        }
        self.refresh_counts(card.deck_id);
        Ok(card.clone())
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        let deck_id = {
            let mut m = self.cards.write();
            let card = m.remove(&id).ok_or(CoreError::NotFound("card"))?;
            card.deck_id
        };
        self.reviews.write().remove(&id);
        self.refresh_counts(deck_id);
        Ok(())
    }

    async fn insert_review(&self, review: &Review) -> Result<(), CoreError> {
        let mut m = self.reviews.write();
        m.entry(review.card_id).or_default().push(review.clone());
        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, CoreError> {
        Ok(self.reviews.read().values().flatten().cloned().collect())
    }

    async fn list_reviews_for_card(&self, card_id: CardId) -> Result<Vec<Review>, CoreError> {
        Ok(self
            .reviews
            .read()
            .get(&card_id)
            .cloned()
            .unwrap_or_default())
    }
}
