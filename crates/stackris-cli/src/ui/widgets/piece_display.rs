use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackris_engine::core::{Cell, ShapeKind};

use crate::ui::widgets::CellDisplay;

/// Preview panel for a single shape, drawn in its spawn rotation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    kind: Option<ShapeKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            kind: None,
            block: None,
        }
    }

    pub fn kind(self, kind: ShapeKind) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Bounding box of a shape's spawn rotation: minimum offsets and size.
fn spawn_bounds(kind: ShapeKind) -> (i8, i8, u16, u16) {
    let cells = &kind.rotation_states()[0];
    let min_dx = cells.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
    let max_dx = cells.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
    let min_dy = cells.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
    let max_dy = cells.iter().map(|&(_, dy)| dy).max().unwrap_or(0);
    let width = u16::try_from(max_dx - min_dx + 1).unwrap_or(0);
    let height = u16::try_from(max_dy - min_dy + 1).unwrap_or(0);
    (min_dx, min_dy, width, height)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let empty = CellDisplay::from_cell(Cell::Empty, false);
        let Some(kind) = self.kind else {
            empty.render(area, buf);
            return;
        };

        let (min_dx, min_dy, width, height) = spawn_bounds(kind);
        let piece_area = area.centered(
            Constraint::Length(width * CellDisplay::width()),
            Constraint::Length(height * CellDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let cells = &kind.rotation_states()[0];
        let occupied = CellDisplay::from_cell(Cell::Piece(kind), false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                let hit = cells.iter().any(|&(dx, dy)| {
                    usize::try_from(dx - min_dx) == Ok(x) && usize::try_from(dy - min_dy) == Ok(y)
                });
                if hit {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}
