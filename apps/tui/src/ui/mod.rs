// Draws the dashboard: page tabs, the active page, status and shortcuts.

pub mod screens;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

use crate::app::App;
use crate::cli::PageKind;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Page tabs
            Constraint::Min(10),   // Page body
            Constraint::Length(4), // Status and share query
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_header(app, f, layout[0]);
    match app.page {
        PageKind::Index => screens::index::render_index(&app.pages.index, f, layout[1]),
        PageKind::Timeseries => {
            screens::timeseries::render_timeseries(&app.pages.timeseries, f, layout[1]);
        }
    }
    render_status(app, f, layout[2]);
    render_shortcuts(app, f, layout[3]);

    if app.show_help {
        widgets::popup::render_help_popup(f, app.page);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Senate Trades ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(16)])
        .split(inner);

    let selected = match app.page {
        PageKind::Index => 0,
        PageKind::Timeseries => 1,
    };
    let tabs = Tabs::new([PageKind::Index.title(), PageKind::Timeseries.title()])
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));
    f.render_widget(tabs, chunks[0]);

    if app.is_loading() {
        let throbber = Throbber::default()
            .label("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        f.render_widget(Paragraph::new(throbber.to_line(&app.throbber)), chunks[1]);
    }
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status = app.current().status().map_or_else(
        || Span::styled("Ready", Style::default().fg(Color::Green)),
        |message| Span::styled(message.to_string(), Style::default().fg(Color::Yellow)),
    );
    let share = TextLine::from(vec![
        Span::styled("Share: ", Style::default().fg(Color::Gray)),
        Span::raw(format!("?{}", app.share_query())),
    ]);

    let paragraph = Paragraph::new(vec![TextLine::from(status), share]).block(
        Block::default()
            .title(" Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(paragraph, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let key = |text: &'static str| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![
        key("Tab"),
        Span::raw(": Focus  "),
        key("←/→"),
        Span::raw(": Change  "),
        key("↑/↓"),
        Span::raw(": Scroll  "),
    ];
    if app.page == PageKind::Index {
        spans.extend([
            key("n/p"),
            Span::raw(": Page  "),
            key("s/o"),
            Span::raw(": Sort  "),
        ]);
    }
    spans.extend([
        key("r"),
        Span::raw(": Reload  "),
        key("F2"),
        Span::raw(": Switch page  "),
        key("F1"),
        Span::raw(": Help  "),
        key("q"),
        Span::raw(": Quit"),
    ]);

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(ratatui::layout::Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use senate_trades_core::ApiBase;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).expect("test terminal");
        terminal.draw(|f| ui(app, f)).expect("draws");
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn index_page_shows_controls_and_share_query() {
        let mut app = App::new(ApiBase::parse("http://localhost").expect("valid"), PageKind::Index);
        app.start("side=BUY");
        let text = screen_text(&app);
        assert!(text.contains("All Senators"));
        assert!(text.contains("Share: ?side=BUY&limit=50&offset=0"));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn help_overlay_lists_paging_keys() {
        let mut app = App::new(ApiBase::parse("http://localhost").expect("valid"), PageKind::Index);
        app.show_help = true;
        assert!(screen_text(&app).contains("Next / previous page"));
    }
}
