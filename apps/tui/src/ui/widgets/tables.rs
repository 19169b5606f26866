use ratatui::layout::{Constraint, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{
    Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;
use senate_trades_core::table::{Badge, TransactionTable, COLUMN_WIDTHS, TABLE_HEADERS};

use super::tone_color;

fn badge(badge: &Badge, bold: bool) -> Cell<'static> {
    let mut style = Style::default().fg(tone_color(badge.tone));
    if bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    Cell::from(Span::styled(badge.text.clone(), style))
}

/// Transactions with coloured ticker and side badges, scrolled to the table's
/// scroll position.
pub fn render_transaction_table(table: &TransactionTable, title: &str, f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(TABLE_HEADERS.map(Cell::from)).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    // Borders plus the header row.
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let rows = table.visible(max_visible_rows).map(|row| {
        Row::new(vec![
            Cell::from(row.full_name.clone()),
            badge(&row.ticker, false),
            badge(&row.side, true),
            Cell::from(row.tx_date.clone()),
            Cell::from(row.estimate.clone()),
        ])
    });

    let widths = COLUMN_WIDTHS
        .iter()
        .enumerate()
        .map(|(index, &width)| {
            if index == 0 {
                Constraint::Min(width)
            } else {
                Constraint::Length(width)
            }
        });
    let block_title = table.caption(title, max_visible_rows);

    let widget = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(block_title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .column_spacing(1);
    f.render_widget(widget, area);

    if table.len() > max_visible_rows {
        let mut state = ScrollbarState::new(table.len())
            .position(table.scroll())
            .viewport_content_length(max_visible_rows);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_style(Style::default().fg(Color::Rgb(0, 0, 238)));
        f.render_stateful_widget(scrollbar, area.inner(Margin::new(0, 1)), &mut state);
    }
}
