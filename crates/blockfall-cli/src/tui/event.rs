use crossterm::event::Event as CrosstermEvent;

/// Events delivered to a running [`App`](super::App).
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// Something changed since the last draw.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
