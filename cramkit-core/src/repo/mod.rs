use crate::{CardId, CoreError, Deck, DeckId, Flashcard, Review};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod memory;

pub use memory::MemoryRepo;

#[async_trait]
pub trait Repository: Send + Sync {
    // Decks
    async fn create_deck(&self, name: &str, course: &str) -> Result<Deck, CoreError>;
    async fn get_deck(&self, id: DeckId) -> Result<Deck, CoreError>;
    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError>;
    /// Deletion is immediate and cascades to the deck's cards and reviews.
    async fn delete_deck(&self, id: DeckId) -> Result<(), CoreError>;
    async fn set_favorite(&self, id: DeckId, favorite: bool) -> Result<Deck, CoreError>;
    async fn touch_studied(&self, id: DeckId, at: DateTime<Utc>) -> Result<(), CoreError>;

    // Cards
    async fn add_card(
        &self,
        deck_id: DeckId,
        front: &str,
        back: &str,
        difficulty: u8,
    ) -> Result<Flashcard, CoreError>;

    async fn get_card(&self, id: CardId) -> Result<Flashcard, CoreError>;
    async fn list_cards(&self, deck_id: Option<DeckId>) -> Result<Vec<Flashcard>, CoreError>;
    async fn update_card(&self, card: &Flashcard) -> Result<Flashcard, CoreError>;
    async fn delete_card(&self, id: CardId) -> Result<(), CoreError>;

    // Reviews
    async fn insert_review(&self, review: &Review) -> Result<(), CoreError>;
    async fn list_reviews(&self) -> Result<Vec<Review>, CoreError>;
    async fn list_reviews_for_card(&self, card_id: CardId) -> Result<Vec<Review>, CoreError>;
}
