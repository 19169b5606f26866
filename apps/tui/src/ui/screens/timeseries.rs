use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;
use senate_trades_core::controller::{TimeseriesControl, TimeseriesPage};
use senate_trades_core::select::picker_text;

use super::render_control;
use crate::ui::widgets::charts::render_chart;
use crate::ui::widgets::popup::render_picker;
use crate::ui::widgets::tables::render_transaction_table;

pub fn render_timeseries(page: &TimeseriesPage, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(55),
            Constraint::Min(5),
        ])
        .split(area);

    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let focus = page.focus();
    let filters = page.filters();
    render_control(
        f,
        controls[0],
        TimeseriesControl::Ticker.label(),
        &picker_text(
            page.ticker_picker(),
            &filters.ticker,
            focus == TimeseriesControl::Ticker,
        ),
        focus == TimeseriesControl::Ticker,
    );
    render_control(
        f,
        controls[1],
        TimeseriesControl::Mode.label(),
        filters.mode.label(),
        focus == TimeseriesControl::Mode,
    );

    render_chart(page.chart(), "Unique senators per month", f, rows[1]);

    let title = if filters.ticker.is_empty() {
        "Transactions".to_string()
    } else {
        format!("Transactions for {}", filters.ticker)
    };
    render_transaction_table(page.table(), &title, f, rows[2]);

    if let Some(picker) = page.ticker_picker().filter(|p| p.is_searching()) {
        render_picker(picker, f, controls[0], area);
    }
}
