mod fetch;
mod view;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::event::KeyCode;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use senate_trades_core::{ApiBase, Command, Effect, IndexPage, Page, TimeseriesPage};
use wasm_bindgen_futures::spawn_local;

/// The page this URL serves.
pub enum WebPage {
    Index(IndexPage),
    Timeseries(TimeseriesPage),
}

impl WebPage {
    fn for_path(pathname: &str) -> Self {
        if pathname.contains("timeseries") {
            Self::Timeseries(TimeseriesPage::new())
        } else {
            Self::Index(IndexPage::new())
        }
    }

    fn page(&self) -> &dyn Page {
        match self {
            Self::Index(page) => page,
            Self::Timeseries(page) => page,
        }
    }

    fn page_mut(&mut self) -> &mut dyn Page {
        match self {
            Self::Index(page) => page,
            Self::Timeseries(page) => page,
        }
    }
}

type Shared = Rc<RefCell<WebPage>>;

fn main() -> io::Result<()> {
    let api = Rc::new(fetch::api_base());
    let (pathname, search) = fetch::location();
    let state: Shared = Rc::new(RefCell::new(WebPage::for_path(&pathname)));

    let effects = state.borrow_mut().page_mut().startup(&search);
    run_effects(&state, &api, effects);

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        let api = api.clone();
        move |event| {
            let accepts_text = state.borrow().page().accepts_text();
            let Some(command) = map_key(event.code, event.shift, accepts_text) else {
                return;
            };
            let effects = state.borrow_mut().page_mut().handle(command);
            run_effects(&state, &api, effects);
        }
    });

    terminal.draw_web(move |f| view::render(&state.borrow(), f));

    Ok(())
}

fn map_key(code: KeyCode, shift: bool, accepts_text: bool) -> Option<Command> {
    let command = match code {
        KeyCode::Tab if shift => Command::FocusPrev,
        KeyCode::Tab => Command::FocusNext,
        KeyCode::Left => Command::OptionPrev,
        KeyCode::Right => Command::OptionNext,
        KeyCode::Up => Command::ScrollUp,
        KeyCode::Down => Command::ScrollDown,
        KeyCode::PageUp => Command::PrevPage,
        KeyCode::PageDown => Command::NextPage,
        KeyCode::Enter => Command::Submit,
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Esc | KeyCode::Delete => Command::Clear,
        KeyCode::Char(ch) if accepts_text => Command::Input(ch),
        KeyCode::Char('n') => Command::NextPage,
        KeyCode::Char('p') => Command::PrevPage,
        KeyCode::Char('r') => Command::Reload,
        KeyCode::Char('s') => Command::CycleSort,
        KeyCode::Char('o') => Command::FlipOrder,
        _ => return None,
    };
    Some(command)
}

/// Carries out page effects. Each load runs as its own local future.
fn run_effects(state: &Shared, api: &Rc<ApiBase>, effects: Vec<Effect>) {
    for effect in effects {
        if effect == Effect::SyncUrl {
            let (_, search) = fetch::location();
            let query = state.borrow().page().sync_query(&search);
            fetch::replace_query(&query);
            continue;
        }

        let request = state.borrow_mut().page_mut().begin(effect, api);
        if let Some(request) = request {
            let state = state.clone();
            let api = api.clone();
            spawn_local(async move {
                let result = fetch::get(&request).await;
                if let Err(error) = &result {
                    web_sys::console::error_1(&format!("{}: {error}", request.url).into());
                }
                let effects = state.borrow_mut().page_mut().complete(&request, result);
                run_effects(&state, &api, effects);
            });
        }
    }
}
