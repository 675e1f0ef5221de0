use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Paragraph, Widget},
};
use stackris_engine::engine::GameSession;

use crate::ui::widgets::style;

/// Inner text width: a 6-column label plus a 10-column value.
const PANEL_WIDTH: u16 = 16;

/// Score, pacing, and clear-histogram panel.
pub struct StatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PANEL_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines().len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let stats = self.session.stats();
        let dur = self.session.duration();
        let time = format!(
            "{}:{:02}.{:02}",
            dur.as_secs() / 60,
            dur.as_secs() % 60,
            dur.subsec_millis() / 10
        );

        let mut lines = vec![
            entry("SCORE", &stats.score().to_string()),
            entry("TIME", &time),
            Line::raw(""),
            entry("LEVEL", &stats.level().to_string()),
            entry("LINES", &stats.total_cleared_lines().to_string()),
            entry("PIECES", &stats.completed_pieces().to_string()),
            Line::raw(""),
        ];
        // Drops by lines cleared at once; index 0 (no clear) is omitted.
        let histogram = stats.line_cleared_counter();
        for (count, label) in [(1, "SINGLE"), (2, "DOUBLE"), (3, "TRIPLE"), (4, "QUAD")] {
            lines.push(entry(label, &histogram[count].to_string()));
        }
        lines
    }
}

fn entry(label: &str, value: &str) -> Line<'static> {
    Line::styled(format!("{label:<6}{value:>10}"), style::DEFAULT)
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        Paragraph::new(Text::from(self.lines()))
            .style(style::DEFAULT)
            .render(area, buf);
    }
}
