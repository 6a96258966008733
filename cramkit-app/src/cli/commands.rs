use crate::cli::opts::*;
use crate::sample;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use cramkit_core::{
    daily_streak, filter_cards_by_text, filter_decks, per_deck_totals, summarize, Deck,
    DeckFilter, Grade, GradeStep, MemoryRepo, Repository, ReviewSession,
};
use cramkit_gen::{suggest_course, GenConfig, Generator, Progress, ProgressFn, SourceFile};
use std::collections::HashMap;
use std::io::{stdin, stdout, Write};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub async fn run_cli(args: Cli) -> Result<()> {
    let repo = open_repo(!args.no_seed).await?;
    match args.cmd {
        Command::Deck(cmd) => deck_cmd(repo, cmd).await,
        Command::Card(cmd) => card_cmd(repo, cmd).await,
        Command::Generate(cmd) => generate_cmd(repo, cmd).await,
        Command::Review(cmd) => review_cmd(repo, cmd).await,
        Command::Stats => stats_cmd(repo).await,
        // main launches the TUI before entering the async runtime
        Command::Tui => bail!("tui is started from main"),
    }
}

/// The store is in-memory and per-invocation; there is no persistence layer
/// by design. Seeding gives the session something to browse and review.
pub async fn open_repo(seed: bool) -> Result<Arc<dyn Repository>> {
    let repo: Arc<dyn Repository> = Arc::new(MemoryRepo::new());
    if seed {
        sample::seed(repo.as_ref()).await?;
    }
    Ok(repo)
}

async fn deck_cmd(repo: Arc<dyn Repository>, cmd: DeckCmd) -> Result<()> {
    match cmd {
        DeckCmd::Add { name, course } => {
            let d = repo.create_deck(&name, &course).await?;
            println!("{}", d.id);
        }
        DeckCmd::List(list) => {
            let mut decks = repo.list_decks().await?;
            decks.sort_by_key(|d| d.created_at);
            let filter = DeckFilter {
                course: list.course,
                new_only: list.new_only,
                search: list.search,
            };
            for d in filter_decks(&decks, &filter) {
                let star = if d.favorite { "*" } else { " " };
                let studied = d
                    .last_studied
                    .map(format_ago)
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "{star} {}\t{}\t[{}]\tcards={} new={}\tstudied {}",
                    d.id, d.name, d.course, d.total_cards, d.new_cards, studied
                );
            }
        }
        DeckCmd::Rm { deck } => {
            let d = resolve_deck(&*repo, &deck).await?;
            repo.delete_deck(d.id).await?;
            println!("ok");
        }
        DeckCmd::Favorite { deck } => {
            let d = resolve_deck(&*repo, &deck).await?;
            repo.set_favorite(d.id, true).await?;
            println!("ok");
        }
        DeckCmd::Unfavorite { deck } => {
            let d = resolve_deck(&*repo, &deck).await?;
            repo.set_favorite(d.id, false).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn card_cmd(repo: Arc<dyn Repository>, cmd: CardCmd) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let deck = resolve_deck(&*repo, &a.deck).await?;
            let c = repo
                .add_card(deck.id, &a.front, &a.back, a.difficulty)
                .await?;
            println!("{}", c.id);
        }
        CardCmd::List { deck, search } => {
            let deck_id = if let Some(sel) = deck {
                Some(resolve_deck(&*repo, &sel).await?.id)
            } else {
                None
            };
            let mut cards = repo.list_cards(deck_id).await?;
            if let Some(q) = search {
                cards = filter_cards_by_text(&cards, &q);
            }
            cards.sort_by_key(|c| c.created_at);
            for c in cards {
                println!(
                    "{}\t{}\t{}\tdiff={} status={:?} due={}",
                    c.id,
                    c.front,
                    c.back,
                    c.difficulty,
                    c.status,
                    c.next_review.format("%Y-%m-%d")
                );
            }
        }
        CardCmd::Rm { card_id } => {
            let id = parse_uuid(&card_id)?;
            repo.delete_card(id).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn generate_cmd(repo: Arc<dyn Repository>, cmd: GenerateCmd) -> Result<()> {
    let bytes = std::fs::read(&cmd.file)
        .with_context(|| format!("could not read {}", cmd.file.display()))?;
    let name = cmd
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cmd.file.display().to_string());
    let source = SourceFile::new(name.clone(), bytes);

    let subject = cmd
        .subject
        .unwrap_or_else(|| suggest_course(&name).to_string());

    let config = GenConfig {
        api_key: cmd.api_key,
        base_url: cmd.base_url,
        chat_model: cmd.model,
        vision_model: cmd.vision_model,
        timeout: Duration::from_secs(60),
    };
    let generator = Generator::new(config)?;

    let report = |p: Progress| eprintln!("[{:>3}%] {}", p.percent, p.stage);
    let report: &ProgressFn = &report;

    let drafts = generator
        .generate(&source, &subject, Some(report))
        .await
        .context("failed to generate flashcards")?;
    log::info!("generated {} drafts from {}", drafts.len(), name);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&drafts)?);
    } else {
        for (i, d) in drafts.iter().enumerate() {
            println!("{}. [{}] {}", i + 1, d.difficulty, d.front);
            println!("   -> {}", d.back);
        }
    }

    if let Some(sel) = cmd.deck {
        let deck = ensure_deck_by_name(&*repo, &sel, &subject).await?;
        for d in &drafts {
            repo.add_card(deck.id, &d.front, &d.back, d.difficulty)
                .await?;
        }
        println!("stored {} cards in '{}'", drafts.len(), deck.name);
    }
    Ok(())
}

async fn review_cmd(repo: Arc<dyn Repository>, cmd: ReviewCmd) -> Result<()> {
    let deck = match cmd.deck {
        Some(sel) => resolve_deck(&*repo, &sel).await?,
        None => {
            let mut decks = repo.list_decks().await?;
            decks.sort_by_key(|d| d.created_at);
            decks
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("no decks to review"))?
        }
    };

    let mut cards = repo.list_cards(Some(deck.id)).await?;
    cards.sort_by_key(|c| (c.next_review, c.created_at));
    cards.truncate(cmd.max);
    if cards.is_empty() {
        println!("deck '{}' has no cards", deck.name);
        return Ok(());
    }

    let mut session = ReviewSession::start(deck.id, cards);
    let mut reviewed = 0usize;

    loop {
        let (front, back) = match session.current() {
            Some(c) => (c.front.clone(), c.back.clone()),
            None => break,
        };
        let (pos, total, _) = session.progress();
        println!("\n[{pos}/{total}]");
        println!("Q: {front}");
        prompt_enter("[enter=flip]")?;
        session.flip();
        println!("A: {back}");
        println!("[1=Again, 2=Hard, 3=Good, 4=Easy, s=skip, q=quit]");

        let choice = loop {
            let line = read_line("grade> ")?;
            match line.trim().to_lowercase().as_str() {
                "1" | "a" | "again" => break Some(Grade::Again),
                "2" | "h" | "hard" => break Some(Grade::Hard),
                "3" | "g" | "good" => break Some(Grade::Good),
                "4" | "e" | "easy" => break Some(Grade::Easy),
                "s" | "skip" => break None,
                "q" | "quit" => return Ok(()),
                _ => println!("enter 1/2/3/4, s, or q"),
            }
        };

        match choice {
            Some(grade) => {
                let Some(res) = session.grade(grade, Utc::now()) else {
                    break;
                };
                repo.update_card(&res.outcome.updated_card).await?;
                repo.insert_review(&res.outcome.review).await?;
                repo.touch_studied(deck.id, Utc::now()).await?;
                reviewed += 1;
                println!(
                    "-> next due in {} day(s)",
                    res.outcome.updated_card.interval_days
                );
                if res.step == GradeStep::Finished {
                    break;
                }
                session.settle();
            }
            None => {
                // skipping the last card ends the session
                if !session.next() {
                    break;
                }
                session.settle();
            }
        }
    }

    println!("\nreviewed {reviewed}");
    Ok(())
}

async fn stats_cmd(repo: Arc<dyn Repository>) -> Result<()> {
    let reviews = repo.list_reviews().await?;
    let summary = summarize(&reviews);
    let t = &summary.totals;
    println!(
        "reviews={} again={} hard={} good={} easy={}",
        t.total, t.again, t.hard, t.good, t.easy
    );
    println!("accuracy: {:.0}%", t.accuracy() * 100.0);
    println!(
        "daily streak: {}",
        daily_streak(&reviews, Utc::now().date_naive())
    );

    let cards = repo.list_cards(None).await?;
    let card_to_deck: HashMap<Uuid, Uuid> = cards.iter().map(|c| (c.id, c.deck_id)).collect();
    let per_deck = per_deck_totals(&reviews, &card_to_deck);
    for (deck_id, totals) in per_deck {
        if let Ok(deck) = repo.get_deck(deck_id).await {
            println!("  {}: {} reviews", deck.name, totals.total);
        }
    }
    Ok(())
}

// ===== Helpers =====
fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|_| anyhow!("invalid uuid"))
}

pub async fn resolve_deck<R: Repository + ?Sized>(repo: &R, sel: &str) -> Result<Deck> {
    if let Ok(id) = Uuid::parse_str(sel) {
        if let Ok(d) = repo.get_deck(id).await {
            return Ok(d);
        }
    }
    let decks = repo.list_decks().await?;
    if let Some(d) = decks.into_iter().find(|d| d.name.eq_ignore_ascii_case(sel)) {
        return Ok(d);
    }
    bail!("deck not found: {}", sel)
}

async fn ensure_deck_by_name<R: Repository + ?Sized>(
    repo: &R,
    name: &str,
    course: &str,
) -> Result<Deck> {
    let decks = repo.list_decks().await?;
    if let Some(d) = decks.into_iter().find(|d| d.name.eq_ignore_ascii_case(name)) {
        return Ok(d);
    }
    Ok(repo.create_deck(name, course).await?)
}

fn prompt_enter(label: &str) -> Result<()> {
    print!("{label}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(s)
}

/// "30m ago" style rendering for deck lists.
fn format_ago(date: DateTime<Utc>) -> String {
    let diff = Utc::now() - date;
    if diff.num_minutes() < 60 {
        format!("{}m ago", diff.num_minutes().max(0))
    } else if diff.num_hours() < 24 {
        format!("{}h ago", diff.num_hours())
    } else {
        format!("{}d ago", diff.num_days())
    }
}
