use ratatui::style::Stylize;
use ratatui::style::{Color, Style};

pub fn title_style() -> Style { Style::default().fg(Color::Cyan).bold() }
pub fn selected_style() -> Style { Style::default().fg(Color::Yellow).bold() }
pub fn favorite_style() -> Style { Style::default().fg(Color::Magenta) }
pub fn goal_style() -> Style { Style::default().fg(Color::Green) }
pub fn footer_style() -> Style { Style::default().fg(Color::Gray) }
