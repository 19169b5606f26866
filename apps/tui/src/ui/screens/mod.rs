pub mod index;
pub mod timeseries;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// One labelled control box; the focused one is highlighted.
fn render_control(f: &mut Frame<'_>, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let paragraph = Paragraph::new(TextLine::from(Span::styled(value.to_string(), value_style)))
        .block(
            Block::default()
                .title(format!(" {label} "))
                .borders(Borders::ALL)
                .border_style(border),
        );
    f.render_widget(paragraph, area);
}
