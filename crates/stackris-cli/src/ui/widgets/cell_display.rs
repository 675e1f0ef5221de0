use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use stackris_engine::core::{Cell, ShapeKind};

use crate::ui::widgets::style;

/// One playfield cell, drawn as a 2x1 terminal block.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty => {
                if show_dots {
                    Self::new(style::EMPTY_DOT, ".")
                } else {
                    Self::new(style::EMPTY, "")
                }
            }
            Cell::Piece(kind) => Self::new(Self::kind_style(kind), ""),
        }
    }

    fn kind_style(kind: ShapeKind) -> Style {
        match kind {
            ShapeKind::I => style::I_CELL,
            ShapeKind::O => style::O_CELL,
            ShapeKind::T => style::T_CELL,
            ShapeKind::S => style::S_CELL,
            ShapeKind::Z => style::Z_CELL,
            ShapeKind::J => style::J_CELL,
            ShapeKind::L => style::L_CELL,
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // A Paragraph fills the whole area, not just the symbol cells.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
