//! HTTP front end for the Streamcast skill.
//!
//! Accepts request envelopes from the voice platform on `POST /` and
//! answers with the skill's response envelope. `GET /health` reports
//! liveness and the configured stream.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
