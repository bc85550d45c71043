//! Diabetes Risk Client Library
//!
//! Everything between the user and the prediction API: configuration, the
//! HTTP client, session handling, the prediction wizard, batch upload and
//! the recommendation view. The `diabetes-risk` binary is a terminal
//! front-end over these modules.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod history;
pub mod recommendation;
pub mod session;
pub mod state;
pub mod submission;
pub mod upload;
pub mod wizard;

pub use error::{ClientError, ClientResult};
pub use state::AppState;
