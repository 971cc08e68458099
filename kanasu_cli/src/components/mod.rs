/// Component module exports
pub mod multiselect;
pub mod table;

pub use multiselect::{InterestPicker, InterestPickerState};
pub use table::{create_row, TableRow, TableWidget};

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

/// Kanasu saffron
const ACCENT: Color = Color::Rgb(245, 158, 11);

pub fn accent(high_contrast: bool) -> Color {
    if high_contrast {
        Color::White
    } else {
        ACCENT
    }
}

pub fn border_style(high_contrast: bool) -> Style {
    if high_contrast {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Bordered block with a bold accent title.
pub fn titled_block(title: &str, high_contrast: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(high_contrast))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(accent(high_contrast))
                .add_modifier(Modifier::BOLD),
        ))
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}
