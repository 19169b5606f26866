// Terminal front-end for the senate trades dashboard.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod terminal;
pub mod ui;
