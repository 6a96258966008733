use anyhow::Result;
use cramkit_core::Repository;

/// Seed a handful of decks so the TUI and the review loop have something to
/// show on first launch. Favorites are set one at a time so their
/// `favorited_at` stamps are strictly ascending.
pub async fn seed(repo: &dyn Repository) -> Result<()> {
    let calculus = repo.create_deck("Calculus Fundamentals", "Mathematics").await?;
    let chemistry = repo.create_deck("Organic Chemistry Reactions", "Chemistry").await?;
    let history = repo.create_deck("World War II Events", "History").await?;
    repo.create_deck("Spanish Vocabulary", "Languages").await?;

    repo.set_favorite(calculus.id, true).await?;
    repo.set_favorite(history.id, true).await?;

    repo.add_card(
        calculus.id,
        "What is the derivative of x^2?",
        "2x",
        2,
    )
    .await?;
    repo.add_card(
        calculus.id,
        "State the fundamental theorem of calculus",
        "If F is an antiderivative of f on [a, b], then the integral of f from a to b equals F(b) - F(a).",
        4,
    )
    .await?;
    repo.add_card(
        calculus.id,
        "What is the limit of sin(x)/x as x approaches 0?",
        "1",
        3,
    )
    .await?;

    repo.add_card(
        chemistry.id,
        "What does SN2 stand for?",
        "Bimolecular nucleophilic substitution",
        3,
    )
    .await?;
    repo.add_card(
        history.id,
        "When did the Normandy landings take place?",
        "June 6, 1944",
        2,
    )
    .await?;

    Ok(())
}
