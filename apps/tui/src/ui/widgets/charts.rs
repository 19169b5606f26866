use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;
use senate_trades_core::chart::{ChartKind, ChartSpec};

use super::tone_color;

fn chart_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Draws `spec`, or an empty panel titled `empty_title` when there is none.
pub fn render_chart(spec: Option<&ChartSpec>, empty_title: &str, f: &mut Frame<'_>, area: Rect) {
    match spec {
        Some(spec) if !spec.labels.is_empty() => match spec.kind {
            ChartKind::Bar => render_bar_chart(spec, f, area),
            ChartKind::Line => render_line_chart(spec, f, area),
        },
        _ => {
            let paragraph = Paragraph::new("No chart data")
                .block(chart_block(empty_title.to_string()))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, area);
        }
    }
}

fn render_bar_chart(spec: &ChartSpec, f: &mut Frame<'_>, area: Rect) {
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
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let slots = u16::try_from(bars.len().max(1)).unwrap_or(u16::MAX);
    let bar_width = (area.width.saturating_sub(2) / slots).saturating_sub(1).clamp(3, 8);

    let chart = BarChart::default()
        .block(chart_block(format!("{} ({})", spec.title, dataset.label)))
        .data(BarGroup::default().bars(&bars))
        .max(spec.max_value())
        .bar_gap(1)
        .bar_width(bar_width);

    f.render_widget(chart, area);
}

#[allow(clippy::cast_precision_loss)]
fn render_line_chart(spec: &ChartSpec, f: &mut Frame<'_>, area: Rect) {
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
        .block(chart_block(spec.title.clone()))
        .x_axis(
            Axis::default()
                .title("Month")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last.max(1) as f64])
                .labels(spec.x_axis_labels()),
        )
        .y_axis(
            Axis::default()
                .title("Senators")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, max as f64])
                .labels(spec.y_axis_labels()),
        );

    f.render_widget(chart, area);
}
