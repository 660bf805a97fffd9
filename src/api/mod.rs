//! HTTP API for the tax engine.
//!
//! Exposes the tax and salary calculations, their CSV exports and the list
//! of loaded regimes over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{SalaryRequest, TaxRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
