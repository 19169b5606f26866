use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
        Row, Table, Wrap,
    },
    Frame,
};
use senate_trades_core::chart::{ChartKind, ChartSpec};
use senate_trades_core::controller::{IndexControl, IndexPage, TimeseriesControl, TimeseriesPage};
use senate_trades_core::select::{picker_text, TickerPicker};
use senate_trades_core::table::{Badge, Tone, TransactionTable, COLUMN_WIDTHS, TABLE_HEADERS};

use crate::WebPage;

const TICKER_MATCHES_SHOWN: usize = 8;

const fn tone_color(tone: Tone) -> Color {
    let (r, g, b) = tone.rgb();
    Color::Rgb(r, g, b)
}

pub fn render(state: &WebPage, f: &mut Frame<'_>) {
    let area = f.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let page = state.page();
    let (title, switch_hint) = match state {
        WebPage::Index(_) => ("Senate trades: transactions", "/timeseries"),
        WebPage::Timeseries(_) => ("Senate trades: monthly series", "/"),
    };
    render_header(title, switch_hint, page.is_loading(), f, rows[0]);

    match state {
        WebPage::Index(page) => render_index(page, f, rows[1]),
        WebPage::Timeseries(page) => render_timeseries(page, f, rows[1]),
    }

    let status = Paragraph::new(page.status().unwrap_or(
        "Tab/Shift+Tab: focus  ←/→: change  ↑/↓: scroll  n/p: page  s/o: sort  r: reload",
    ))
    .block(Block::default().borders(Borders::ALL).title(" Status "))
    .style(Style::default().fg(Color::Gray))
    .wrap(Wrap { trim: true });
    f.render_widget(status, rows[2]);
}

fn render_header(title: &str, other: &str, loading: bool, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if loading {
        spans.push(Span::styled("  Loading...", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(
        format!("  (other view: {other})"),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(TextLine::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(header, area);
}

fn render_control(f: &mut Frame<'_>, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(value.to_string()).block(
        Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(paragraph, area);
}

fn render_index(page: &IndexPage, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(1)])
        .split(area);

    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(rows[0]);

    let filters = page.filters();
    let activity = page.activity();
    let values = [
        page.senator_label().to_string(),
        page.side_label().to_string(),
        picker_text(
            page.ticker_picker(),
            &filters.ticker,
            page.focus() == IndexControl::Ticker,
        ),
        activity.period().label().to_string(),
        activity.side().label().to_string(),
        activity.bucket().unwrap_or("-").to_string(),
    ];
    for ((control, value), area) in IndexControl::ALL.iter().zip(&values).zip(controls.iter()) {
        render_control(f, *area, control.label(), value, *control == page.focus());
    }

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let title = format!("Transactions, {} {}", filters.sort.label(), filters.order.arrow());
    render_table(page.table(), &title, f, content[0]);
    render_chart(activity.chart(), "Top tickers", f, content[1]);

    f.render_widget(
        Paragraph::new(page.page_info()).style(Style::default().fg(Color::Gray)),
        rows[2],
    );

    if let Some(picker) = page.ticker_picker().filter(|p| p.is_searching()) {
        render_matches(picker, f, content[1]);
    }
}

fn render_timeseries(page: &TimeseriesPage, f: &mut Frame<'_>, area: Rect) {
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

    let filters = page.filters();
    let focus = page.focus();
    render_control(
        f,
        controls[0],
        TimeseriesControl::Ticker.label(),
        &picker_text(
            page.ticker_picker(),
            &filters.ticker,
            page.focus() == TimeseriesControl::Ticker,
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
    render_table(page.table(), &format!("Transactions for {}", filters.ticker), f, rows[2]);

    if let Some(picker) = page.ticker_picker().filter(|p| p.is_searching()) {
        render_matches(picker, f, rows[1]);
    }
}

fn badge(badge: &Badge) -> Cell<'static> {
    Cell::from(Span::styled(
        badge.text.clone(),
        Style::default().fg(tone_color(badge.tone)),
    ))
}

fn render_table(table: &TransactionTable, title: &str, f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(TABLE_HEADERS.map(Cell::from))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let rows = table.visible(max_visible_rows).map(|row| {
        Row::new(vec![
            Cell::from(row.full_name.clone()),
            badge(&row.ticker),
            badge(&row.side),
            Cell::from(row.tx_date.clone()),
            Cell::from(row.estimate.clone()),
        ])
    });

    let [name, rest @ ..] = COLUMN_WIDTHS;
    let widths = std::iter::once(Constraint::Min(name)).chain(rest.map(Constraint::Length));

    let widget = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(table.caption(title, max_visible_rows))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .column_spacing(1);
    f.render_widget(widget, area);
}

fn render_chart(spec: Option<&ChartSpec>, empty_title: &str, f: &mut Frame<'_>, area: Rect) {
    let block = |title: String| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
    };

    let Some(spec) = spec.filter(|spec| !spec.labels.is_empty()) else {
        let paragraph = Paragraph::new("No chart data")
            .block(block(empty_title.to_string()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    };

    match spec.kind {
        ChartKind::Bar => {
            let Some(dataset) = spec.datasets.first() else {
                return;
            };
            let bars: Vec<Bar<'_>> = spec
                .labels
                .iter()
                .zip(&dataset.values)
                .map(|(label, value)| {
                    Bar::default()
                        .value(*value)
                        .label(TextLine::from(label.as_str()))
                        .style(Style::default().fg(tone_color(dataset.tone)))
                })
                .collect();
            let chart = BarChart::default()
                .block(block(format!("{} ({})", spec.title, dataset.label)))
                .data(BarGroup::default().bars(&bars))
                .max(spec.max_value())
                .bar_gap(1)
                .bar_width(5);
            f.render_widget(chart, area);
        }
        ChartKind::Line => render_line_chart(spec, block(spec.title.clone()), f, area),
    }
}

#[allow(clippy::cast_precision_loss)]
fn render_line_chart(spec: &ChartSpec, block: Block<'_>, f: &mut Frame<'_>, area: Rect) {
    let points: Vec<Vec<(f64, f64)>> = spec
        .datasets
        .iter()
        .map(|dataset| {
            dataset
                .values
                .iter()
                .enumerate()
                .map(|(index, value)| (index as f64, *value as f64))
                .collect()
        })
        .collect();

    let datasets = spec
        .datasets
        .iter()
        .zip(&points)
        .map(|(dataset, data)| {
            Dataset::default()
                .name(dataset.label.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(tone_color(dataset.tone)))
                .data(data)
        })
        .collect::<Vec<_>>();

    let last = spec.labels.len().saturating_sub(1);
    let max = spec.max_value();
    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, last.max(1) as f64])
                .labels(spec.x_axis_labels()),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, max as f64])
                .labels(spec.y_axis_labels()),
        );
    f.render_widget(chart, area);
}

/// The live search results under the ticker box.
fn render_matches(picker: &TickerPicker, f: &mut Frame<'_>, area: Rect) {
    let highlighted = picker.highlighted().map(|option| option.value.as_str());
    let lines: Vec<TextLine<'_>> = picker
        .matches()
        .take(TICKER_MATCHES_SHOWN)
        .map(|option| {
            let style = if Some(option.value.as_str()) == highlighted {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            TextLine::from(Span::styled(option.label.clone(), style))
        })
        .collect();

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX).min(area.height);
    let popup = Rect::new(area.x, area.y, area.width.min(32), height);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} matches ", picker.match_count()))
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black)),
    );
    f.render_widget(ratzilla::ratatui::widgets::Clear, popup);
    f.render_widget(widget, popup);
}
