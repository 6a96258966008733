use crate::tui::{
    inputs::{map_event, Action},
    views::{self, RightPane},
};
use chrono::Utc;
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use cramkit_core::{Deck, Grade, GradeStep, Repository, ReviewSession, StudyGoal};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

const DEFAULT_GOAL_MINUTES: u32 = 60;
const SESSION_CAP: usize = 50;

pub struct TuiApp {
    pub repo: Arc<dyn Repository>,
    pub rt: Arc<Runtime>,
    decks: Vec<Deck>,
    sel: usize,
    session: Option<ReviewSession>,
    goal: StudyGoal,
    minute_mark: Instant,
}

impl TuiApp {
    pub fn new(repo: Arc<dyn Repository>, rt: Arc<Runtime>) -> Self {
        Self {
            repo,
            rt,
            decks: vec![],
            sel: 0,
            session: None,
            goal: StudyGoal::new(DEFAULT_GOAL_MINUTES),
            minute_mark: Instant::now(),
        }
    }

    fn load_decks(&mut self) {
        let mut v = self.rt.block_on(self.repo.list_decks()).unwrap_or_default();
        v.sort_by_key(|d| d.created_at);
        self.decks = v;
        self.sel = self.sel.min(self.decks.len().saturating_sub(1));
    }

    fn start_session(&mut self) {
        if self.decks.is_empty() {
            return;
        }
        let deck_id = self.decks[self.sel].id;
        let mut cards = self
            .rt
            .block_on(self.repo.list_cards(Some(deck_id)))
            .unwrap_or_default();
        cards.sort_by_key(|c| (c.next_review, c.created_at));
        cards.truncate(SESSION_CAP);
        self.session = Some(ReviewSession::start(deck_id, cards));
    }

    fn apply_grade(&mut self, grade: Grade) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(res) = session.grade(grade, Utc::now()) else {
            return;
        };
        let deck_id = session.deck_id();
        self.rt
            .block_on(self.repo.update_card(&res.outcome.updated_card))
            .ok();
        self.rt
            .block_on(self.repo.insert_review(&res.outcome.review))
            .ok();
        self.rt
            .block_on(self.repo.touch_studied(deck_id, Utc::now()))
            .ok();
        if res.step == GradeStep::Finished {
            self.close_session();
        }
    }

    /// Leave reviewing, finished or not. Counters on the deck list may have
    /// changed under a partial session, so always reload.
    fn close_session(&mut self) {
        self.session = None;
        self.load_decks();
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.load_decks();
        self.goal.start();
        self.minute_mark = Instant::now();

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| {
                let right = match &self.session {
                    Some(session) => match session.current() {
                        Some(card) => {
                            let (position, total, _) = session.progress();
                            RightPane::Card {
                                card,
                                face: session.face(),
                                position,
                                total,
                            }
                        }
                        None => RightPane::Empty("This deck has no cards yet."),
                    },
                    None => RightPane::Idle,
                };
                views::draw_ui(f, f.size(), &self.decks, self.sel, right, &self.goal);
            })?;

            // a move holds the in-flight guard for exactly one frame
            if let Some(session) = self.session.as_mut() {
                session.settle();
            }

            if self.goal.is_running() && self.minute_mark.elapsed() >= Duration::from_secs(60) {
                self.goal.tick();
                self.minute_mark = Instant::now();
            }

            if event::poll(Duration::from_millis(100))? {
                let action = map_event(event::read()?);
                match action {
                    Action::Quit => {
                        if self.session.is_some() {
                            self.close_session();
                        } else {
                            break;
                        }
                    }
                    Action::Up => {
                        if self.session.is_none() {
                            self.sel = self.sel.saturating_sub(1);
                        }
                    }
                    Action::Down => {
                        if self.session.is_none() && self.sel + 1 < self.decks.len() {
                            self.sel += 1;
                        }
                    }
                    Action::Enter => {
                        if self.session.is_none() {
                            self.start_session();
                        }
                    }
                    Action::Flip => {
                        if let Some(session) = self.session.as_mut() {
                            session.flip();
                        }
                    }
                    Action::Next => {
                        if let Some(session) = self.session.as_mut() {
                            session.next();
                        }
                    }
                    Action::Previous => {
                        if let Some(session) = self.session.as_mut() {
                            session.previous();
                        }
                    }
                    Action::Shuffle => {
                        if let Some(session) = self.session.as_mut() {
                            session.shuffle(&mut rand::thread_rng());
                        }
                    }
                    Action::GradeAgain => self.apply_grade(Grade::Again),
                    Action::GradeHard => self.apply_grade(Grade::Hard),
                    Action::GradeGood => self.apply_grade(Grade::Good),
                    Action::GradeEasy => self.apply_grade(Grade::Easy),
                    Action::TimerToggle => {
                        if self.goal.is_running() {
                            self.goal.pause();
                        } else {
                            self.goal.start();
                            self.minute_mark = Instant::now();
                        }
                    }
                    Action::TargetUp => self.goal.adjust_target(15),
                    Action::TargetDown => self.goal.adjust_target(-15),
                    Action::None => {}
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cramkit_core::MemoryRepo;

    #[test]
    fn abandoning_a_session_refreshes_deck_counters() {
        let rt = Arc::new(Runtime::new().unwrap());
        let repo: Arc<dyn Repository> = Arc::new(MemoryRepo::new());
        let deck_id = rt.block_on(async {
            let deck = repo.create_deck("Calc", "Mathematics").await.unwrap();
            repo.add_card(deck.id, "q1", "a1", 3).await.unwrap();
            repo.add_card(deck.id, "q2", "a2", 3).await.unwrap();
            deck.id
        });

        let mut app = TuiApp::new(repo, rt);
        app.load_decks();
        assert_eq!(app.decks[0].id, deck_id);
        assert_eq!(app.decks[0].new_cards, 2);

        // grade one card, then bail out mid-session
        app.start_session();
        app.apply_grade(Grade::Good);
        assert!(app.session.is_some());
        app.close_session();

        assert!(app.session.is_none());
        assert_eq!(app.decks[0].new_cards, 1);
    }
}
