// Application state and the glue between key presses, page controllers
// and the HTTP tasks.

pub mod actions;
pub mod input;
pub mod state;

pub use actions::{ApiResponse, OutgoingRequest};
pub use input::handle_input;
pub use state::App;
