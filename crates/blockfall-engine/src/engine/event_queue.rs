use std::collections::VecDeque;

use super::{GameSession, InputSignal, SessionEvent, ShapeSource};

/// Pending input and tick events for a [`GameSession`].
///
/// Inputs and ticks are queued separately but every event is stamped with
/// its arrival order, so [`pop_next`](Self::pop_next) hands them out exactly
/// in the order they were pushed, whichever queue they sit in.
///
/// # Example
///
/// ```
/// use blockfall_engine::{EventQueue, InputSignal, SessionEvent};
///
/// let mut queue = EventQueue::new();
/// queue.push_tick();
/// queue.push_input(InputSignal::Left);
/// queue.push_tick();
///
/// assert_eq!(queue.pop_next(), Some(SessionEvent::Tick));
/// assert_eq!(queue.pop_next(), Some(SessionEvent::Input(InputSignal::Left)));
/// assert_eq!(queue.pop_next(), Some(SessionEvent::Tick));
/// assert_eq!(queue.pop_next(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inputs: VecDeque<(u64, InputSignal)>,
    ticks: VecDeque<u64>,
    next_seq: u64,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, signal: InputSignal) {
        let seq = self.next_seq();
        self.inputs.push_back((seq, signal));
    }

    pub fn push_tick(&mut self) {
        let seq = self.next_seq();
        self.ticks.push_back(seq);
    }

    pub fn push(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tick => self.push_tick(),
            SessionEvent::Input(signal) => self.push_input(signal),
        }
    }

    /// Removes and returns the oldest pending event.
    pub fn pop_next(&mut self) -> Option<SessionEvent> {
        let take_input = match (self.inputs.front(), self.ticks.front()) {
            (Some((input_seq, _)), Some(tick_seq)) => input_seq < tick_seq,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };
        if take_input {
            self.inputs
                .pop_front()
                .map(|(_, signal)| SessionEvent::Input(signal))
        } else {
            self.ticks.pop_front().map(|_| SessionEvent::Tick)
        }
    }

    /// Feeds every pending event to `session`, one at a time, and returns
    /// how many were processed.
    ///
    /// Each reaction completes before the next event is taken. Events that
    /// arrive after the game is over are consumed and ignored by the session.
    pub fn pump<S>(&mut self, session: &mut GameSession<S>) -> usize
    where
        S: ShapeSource,
    {
        let mut processed = 0;
        while let Some(event) = self.pop_next() {
            session.handle_event(event);
            processed += 1;
        }
        processed
    }

    /// Discards all pending events.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.ticks.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len() + self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.ticks.is_empty()
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
