use crate::tui::theme::*;
use cramkit_core::{format_minutes, Deck, Face, Flashcard, StudyGoal};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub enum RightPane<'a> {
    Idle,
    Card {
        card: &'a Flashcard,
        face: Face,
        position: usize,
        total: usize,
    },
    Empty(&'a str),
}

pub fn draw_ui(
    f: &mut Frame,
    area: Rect,
    decks: &[Deck],
    sel: usize,
    right: RightPane,
    goal: &StudyGoal,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);
    draw_decks(f, chunks[0], decks, sel);
    draw_right(f, chunks[1], right);
    draw_footer(f, area, goal);
}

fn draw_footer(f: &mut Frame, area: Rect, goal: &StudyGoal) {
    let timer = format!(
        " {} / {} ({}%){} ",
        format_minutes(goal.studied_minutes()),
        format_minutes(goal.target_minutes()),
        goal.progress_percent(),
        if goal.is_running() { " ▶" } else { " ⏸" },
    );
    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" ↑/k ↓/j select  Enter start  space flip  1-4 grade  n/p move  r shuffle  t timer  +/- target  q quit "),
        Span::raw(timer).style(goal_style()),
    ]))
    .style(footer_style())
    .block(Block::default().borders(Borders::TOP));
    let fh = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    f.render_widget(foot, fh);
}

fn draw_decks(f: &mut Frame, area: Rect, decks: &[Deck], sel: usize) {
    let items: Vec<_> = decks
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let label = if d.favorite {
                format!("★ {}  [{}]", d.name, d.course)
            } else {
                format!("  {}  [{}]", d.name, d.course)
            };
            let line = if i == sel {
                Line::from(label).style(selected_style())
            } else if d.favorite {
                Line::from(label).style(favorite_style())
            } else {
                Line::from(label)
            };
            ListItem::new(line)
        })
        .collect();

    let title = Paragraph::new(Line::from(vec![Span::raw("Decks").style(title_style())]));
    let th = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    f.render_widget(title, th);

    let list_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    f.render_widget(list, list_area);
}

fn draw_right(f: &mut Frame, area: Rect, pane: RightPane) {
    match pane {
        RightPane::Idle => {
            let p = Paragraph::new("Press Enter to start reviewing the selected deck.")
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Review").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Empty(msg) => {
            let p = Paragraph::new(msg)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Review").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Card {
            card,
            face,
            position,
            total,
        } => {
            let title = format!("Review {position}/{total}");
            let block = Block::default().title(title).borders(Borders::ALL);
            let inner = Rect {
                x: area.x + 1,
                y: area.y + 1,
                width: area.width.saturating_sub(2),
                height: area.height.saturating_sub(2),
            };
            f.render_widget(block, area);

            let q = Paragraph::new(Line::from(vec![
                Span::raw("Q: ").style(title_style()),
                Span::raw(&card.front),
            ]))
            .wrap(Wrap { trim: true });
            f.render_widget(q, inner);

            if face == Face::Back {
                let ans_area = Rect {
                    x: inner.x,
                    y: inner.y + 2,
                    width: inner.width,
                    height: inner.height.saturating_sub(2),
                };
                let text = vec![
                    Line::from(vec![
                        Span::raw("A: ").style(title_style()),
                        Span::raw(&card.back),
                    ]),
                    Line::from(""),
                    Line::from(vec![Span::raw(format!(
                        "1 Again   2 Hard   3 Good   4 Easy   (interval {}d, streak {})",
                        card.interval_days, card.streak
                    ))
                    .style(footer_style())]),
                ];
                let a = Paragraph::new(text).wrap(Wrap { trim: true });
                f.render_widget(a, ans_area);
            }
        }
    }
}
