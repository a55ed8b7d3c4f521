use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, cell_display::*, session_display::*, session_stats_display::*};

mod board_display;
mod cell_display;
mod session_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const PURPLE: Color = Color::Rgb(128, 0, 128);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 165, 0);
    pub const GREEN: Color = Color::Rgb(0, 128, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::ColorId;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const HELP: Style = fg_bg(color::GRAY, color::BLACK);

    /// Cell styles indexed by `color id - 1`, in catalog order.
    const FILLED: [Style; 7] = [
        bg_only(color::CYAN),
        bg_only(color::YELLOW),
        bg_only(color::PURPLE),
        bg_only(color::BLUE),
        bg_only(color::ORANGE),
        bg_only(color::GREEN),
        bg_only(color::RED),
    ];

    pub const fn filled(color: ColorId) -> Style {
        FILLED[(color.get() - ColorId::MIN) as usize]
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{ColorId, ShapeKind};
    use ratatui::widgets::Block;

    use super::*;

    #[test]
    fn test_palette_follows_catalog_order() {
        assert_eq!(style::filled(ShapeKind::I.color_id()).bg, Some(color::CYAN));
        assert_eq!(style::filled(ShapeKind::O.color_id()).bg, Some(color::YELLOW));
        assert_eq!(style::filled(ShapeKind::T.color_id()).bg, Some(color::PURPLE));
        assert_eq!(style::filled(ShapeKind::S.color_id()).bg, Some(color::RED));
        for value in ColorId::MIN..=ColorId::MAX {
            let color = ColorId::new(value).unwrap();
            assert_ne!(style::filled(color), style::EMPTY);
        }
    }

    #[test]
    fn test_block_margins() {
        assert_eq!(block_horizontal_margin(None), 0);
        assert_eq!(block_vertical_margin(None), 0);
        let bordered = Block::bordered();
        assert_eq!(block_horizontal_margin(Some(&bordered)), 2);
        assert_eq!(block_vertical_margin(Some(&bordered)), 2);
    }
}
