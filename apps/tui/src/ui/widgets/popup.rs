use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use senate_trades_core::select::TickerPicker;

use crate::cli::PageKind;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

const COMMON_KEYS: [(&str, &str); 8] = [
    ("Tab / Shift-Tab", "Move between controls"),
    ("← / →", "Change the focused control"),
    ("↑ / ↓, j / k", "Scroll the table"),
    ("Enter", "Pick the highlighted ticker"),
    ("Esc / Del", "Cancel search or reset the control"),
    ("r / F5", "Reload"),
    ("F2", "Switch page"),
    ("q", "Quit"),
];

const INDEX_KEYS: [(&str, &str); 3] = [
    ("n / p, PgDn / PgUp", "Next / previous page"),
    ("s", "Cycle sort column"),
    ("o", "Flip sort order"),
];

pub fn render_help_popup(f: &mut Frame<'_>, page: PageKind) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let extra: &[(&str, &str)] = match page {
        PageKind::Index => &INDEX_KEYS,
        PageKind::Timeseries => &[],
    };
    let mut lines: Vec<TextLine<'_>> = COMMON_KEYS
        .iter()
        .chain(extra)
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(format!("{key:<20}"), key_style),
                Span::raw(*action),
            ])
        })
        .collect();
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Type while the ticker box is focused to search.",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" Help: {} (Esc to close) ", page.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Drop-down of ticker matches below `anchor`.
pub fn render_picker(picker: &TickerPicker, f: &mut Frame<'_>, anchor: Rect, bounds: Rect) {
    let visible = u16::try_from(picker.match_count().min(8)).unwrap_or(8);
    let height = (visible + 2).min(bounds.bottom().saturating_sub(anchor.bottom()));
    if height < 3 {
        return;
    }
    let area = Rect {
        x: anchor.x,
        y: anchor.bottom(),
        width: anchor.width.max(20).min(bounds.right().saturating_sub(anchor.x)),
        height,
    };

    let items: Vec<ListItem<'_>> = picker
        .matches()
        .map(|option| ListItem::new(option.label.clone()))
        .collect();
    let title = if picker.match_count() == 0 {
        format!(" {} : no matches ", picker.query())
    } else {
        format!(" {} ", picker.query())
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(0, 0, 238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(Some(picker.highlight_index()));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
