use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::app::actions::spawn_requests;
use crate::app::{handle_input, ApiResponse, App};
use crate::ui;

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &ApiClient,
    query: &str,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let (tx, mut rx) = mpsc::unbounded_channel::<ApiResponse>();
    spawn_requests(client, &tx, app.start(query));

    loop {
        while let Ok(response) = rx.try_recv() {
            let follow_up = app.receive(response);
            spawn_requests(client, &tx, follow_up);
        }

        app.tick();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    let requests = handle_input(app, key.code);
                    spawn_requests(client, &tx, requests);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Redrawn on the next pass
                }
                Ok(_) | Err(_) => {}
            }
        }

        // Let spawned requests make progress between polls.
        tokio::task::yield_now().await;
    }

    Ok(())
}
