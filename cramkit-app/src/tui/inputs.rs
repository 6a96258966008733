use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Enter,
    Flip,
    GradeAgain,
    GradeHard,
    GradeGood,
    GradeEasy,
    Next,
    Previous,
    Shuffle,
    TimerToggle,
    TargetUp,
    TargetDown,
    None,
}

pub fn map_event(ev: Event) -> Action {
    if let Event::Key(KeyEvent {
        code, modifiers, ..
    }) = ev
    {
        match (code, modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Action::Quit,
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::Down,
            (KeyCode::Enter, _) => Action::Enter,
            (KeyCode::Char(' '), _) => Action::Flip,
            (KeyCode::Char('1'), _) => Action::GradeAgain,
            (KeyCode::Char('2'), _) => Action::GradeHard,
            (KeyCode::Char('3'), _) => Action::GradeGood,
            (KeyCode::Char('4'), _) => Action::GradeEasy,
            (KeyCode::Char('n'), KeyModifiers::NONE) => Action::Next,
            (KeyCode::Char('p'), KeyModifiers::NONE) => Action::Previous,
            (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Shuffle,
            (KeyCode::Char('t'), KeyModifiers::NONE) => Action::TimerToggle,
            (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Action::TargetUp,
            (KeyCode::Char('-'), _) => Action::TargetDown,
            _ => Action::None,
        }
    } else {
        Action::None
    }
}
