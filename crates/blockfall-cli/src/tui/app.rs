use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for applications executed by [`Tui::run`].
pub trait App {
    /// Called once before the first event. Use this to set the tick interval.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Called on each tick.
    fn update(&mut self, tui: &mut Tui);
}
