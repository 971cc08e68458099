/// Selectable table used for career matches and scholarships

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Row, Table, Widget},
};

use super::{accent, titled_block};

#[derive(Clone, Debug)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub style: Style,
}

pub struct TableWidget<'a> {
    title: &'a str,
    headers: Vec<&'a str>,
    widths: Vec<Constraint>,
    rows: Vec<TableRow>,
    selected: Option<usize>,
    high_contrast: bool,
}

impl<'a> TableWidget<'a> {
    pub fn new(title: &'a str, headers: Vec<&'a str>, widths: Vec<Constraint>) -> Self {
        Self {
            title,
            headers,
            widths,
            rows: Vec::new(),
            selected: None,
            high_contrast: false,
        }
    }

    pub fn rows(mut self, rows: Vec<TableRow>) -> Self {
        self.rows = rows;
        self
    }

    /// Highlights `index`; ignored when the table has no rows.
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = (!self.rows.is_empty()).then(|| index.min(self.rows.len() - 1));
        self
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }

    fn render_scrollbar(&self, area: Rect, buf: &mut Buffer) {
        // borders and header
        let viewport = area.height.saturating_sub(3) as usize;
        let total = self.rows.len();
        if total <= viewport || viewport == 0 {
            return;
        }

        let x = area.right().saturating_sub(1);
        let top = area.top() + 2;
        let bottom = area.bottom().saturating_sub(1);
        let height = bottom.saturating_sub(top);
        if height == 0 {
            return;
        }

        let position = self.selected.unwrap_or(0) as f32 / total as f32 * height as f32;
        let thumb = top + (position as u16).min(height - 1);
        let thumb_color = accent(self.high_contrast);

        for y in top..bottom {
            if let Some(cell) = buf.cell_mut((x, y)) {
                if y == thumb {
                    cell.set_char('█').set_fg(thumb_color);
                } else {
                    cell.set_char('│').set_fg(Color::DarkGray);
                }
            }
        }
    }
}

impl<'a> Widget for TableWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = accent(self.high_contrast);
        let header_style = Style::default().fg(accent).add_modifier(Modifier::BOLD);

        let header = Row::new(
            self.headers
                .iter()
                .map(|h| Span::styled(*h, header_style))
                .collect::<Vec<_>>(),
        )
        .height(1);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let style = if Some(i) == self.selected {
                    Style::default()
                        .bg(accent)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else {
                    row.style
                };
                Row::new(row.cells.iter().map(|c| c.as_str())).style(style)
            })
            .collect();

        let table = Table::new(rows, self.widths.iter().copied())
            .header(header)
            .block(titled_block(self.title, self.high_contrast));

        Widget::render(table, area, buf);
        self.render_scrollbar(area, buf);
    }
}

/// Helper to create styled rows
pub fn create_row(cells: Vec<String>, color: Color) -> TableRow {
    TableRow {
        cells,
        style: Style::default().fg(color),
    }
}
