use blockfall_engine::{EventQueue, GameSession, GameSnapshot, InputSignal};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::{SessionDisplay, style},
};

const HELP_PLAYING: &str = "Controls: ← → (Move) | ↓ (Down) | ↑ (Rotate) | Q (Quit)";
const HELP_GAME_OVER: &str = "Controls: Q (Quit)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Signal(InputSignal),
    Quit,
}

/// Maps a key to what it does. Unknown keys map to `None` and are ignored.
pub(crate) fn key_action(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::Left => KeyAction::Signal(InputSignal::Left),
        KeyCode::Right => KeyAction::Signal(InputSignal::Right),
        KeyCode::Down => KeyAction::Signal(InputSignal::Down),
        KeyCode::Up => KeyAction::Signal(InputSignal::RotateClockwise),
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Terminal frontend for one game.
///
/// Key presses and timer ticks are queued and pumped into the session one at
/// a time; after every reaction the snapshot is refreshed and the timer is
/// re-armed from the session, which stops it once the game is over.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    queue: EventQueue,
    snapshot: GameSnapshot,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        let snapshot = session.snapshot();
        Self {
            session,
            queue: EventQueue::new(),
            snapshot,
            is_exiting: false,
        }
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn seed(&self) -> u64 {
        self.session.seed()
    }

    fn react(&mut self, tui: &mut Tui) {
        let processed = self.queue.pump(&mut self.session);
        tracing::trace!(processed, "events processed");
        self.snapshot = self.session.snapshot();
        tui.set_tick_interval(self.session.tick_interval());
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(self.session.tick_interval());
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        match key_action(key.code) {
            Some(KeyAction::Signal(signal)) => {
                self.queue.push_input(signal);
                self.react(tui);
            }
            Some(KeyAction::Quit) => {
                self.queue.clear();
                tui.set_tick_interval(None);
                self.is_exiting = true;
            }
            None => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.snapshot, self.session.duration());
        let help_text = if self.snapshot.game_over {
            HELP_GAME_OVER
        } else {
            HELP_PLAYING
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.queue.push_tick();
        self.react(tui);
    }
}
