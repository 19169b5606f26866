// Shared view state for the senate trades dashboard.
// Nothing in here performs I/O; the web and terminal front-ends drive it.

pub mod chart;
pub mod controller;
pub mod decode;
pub mod domain;
pub mod error;
pub mod models;
pub mod query_state;
pub mod request;
pub mod select;
pub mod slot;
pub mod table;
pub mod tokens;

pub use controller::{Command, Effect, IndexPage, Page, PendingRequest, TimeseriesPage};
pub use decode::{decode_response, Channel, Payload};
pub use domain::{Period, SeriesMode, Side, SortField, SortOrder};
pub use error::ApiError;
pub use request::ApiBase;
