use std::time::Duration;

use blockfall_engine::GameSnapshot;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, SessionStatsDisplay, color, style};

/// Board and statistics side by side, with a banner once the game is over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a GameSnapshot,
    elapsed: Duration,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a GameSnapshot, elapsed: Duration) -> Self {
        Self {
            snapshot,
            elapsed,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = if self.snapshot.game_over {
            color::RED
        } else {
            color::WHITE
        };

        let render_board = self.snapshot.render_board();
        let game_board = BoardDisplay::new(&render_board).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let session_stats = SessionStatsDisplay::new(self.snapshot, self.elapsed).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);

        if self.snapshot.game_over {
            let style = Style::new().fg(color::WHITE).bg(color::RED);
            let block = Block::new().style(style);
            let text = Text::styled("GAME OVER", style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameSession, SessionConfig, ShapeKind, ShapeSequence};

    use super::*;

    fn rendered_text(snapshot: &GameSnapshot) -> String {
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(snapshot, Duration::ZERO).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_playing_session_has_no_banner() {
        let session = GameSession::with_shapes(
            SessionConfig::default(),
            ShapeSequence::new([ShapeKind::O]),
        );
        let text = rendered_text(&session.snapshot());
        assert!(text.contains("SCORE:"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut session = GameSession::with_shapes(
            SessionConfig::default(),
            ShapeSequence::new([ShapeKind::O]),
        );
        while session.session_state().is_playing() {
            session.handle_tick();
        }
        let text = rendered_text(&session.snapshot());
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("100"));
    }
}
