use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use senate_trades_core::controller::{IndexControl, IndexPage};
use senate_trades_core::select::picker_text;

use super::render_control;
use crate::ui::widgets::charts::render_chart;
use crate::ui::widgets::popup::render_picker;
use crate::ui::widgets::tables::render_transaction_table;

pub fn render_index(page: &IndexPage, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6)])
        .split(area);

    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(24),
            Constraint::Percentage(12),
            Constraint::Percentage(18),
            Constraint::Percentage(12),
            Constraint::Percentage(16),
            Constraint::Percentage(18),
        ])
        .split(rows[0]);

    let activity = page.activity();
    let filters = page.filters();
    let focus = page.focus();
    let values = [
        page.senator_label().to_string(),
        page.side_label().to_string(),
        picker_text(page.ticker_picker(), &filters.ticker, focus == IndexControl::Ticker),
        activity.period().label().to_string(),
        activity.side().label().to_string(),
        activity.bucket().unwrap_or("-").to_string(),
    ];
    for ((control, value), area) in IndexControl::ALL.iter().zip(&values).zip(controls.iter()) {
        render_control(f, *area, control.label(), value, *control == focus);
    }

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let table_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(content[0]);

    let title = format!(
        "Transactions, {} {}",
        filters.sort.label(),
        filters.order.arrow()
    );
    render_transaction_table(page.table(), &title, f, table_area[0]);
    f.render_widget(
        Paragraph::new(page.page_info()).style(Style::default().fg(Color::Gray)),
        table_area[1],
    );

    render_chart(activity.chart(), "Top tickers", f, content[1]);

    if let Some(picker) = page.ticker_picker().filter(|p| p.is_searching()) {
        render_picker(picker, f, controls[2], area);
    }
}
