//! Authentication flows
//!
//! Login and signup validate locally first; nothing is sent when the form
//! is incomplete or the passwords differ. A successful response stores the
//! token in the session and refreshes the user's history.

mod credentials;
pub mod token;

pub use credentials::{Credentials, SignupForm};
pub use token::{inspect_token, TokenInfo};

use tracing::{info, warn};

use crate::error::{ClientError, ClientResult, SERVER_ERROR_FALLBACK};
use crate::state::AppState;

/// Which flow a failure came from, for message prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Signup,
}

impl AuthFlow {
    /// Message shown for a failed attempt
    ///
    /// Local checks show their own text; anything the server (or the
    /// network) rejected is prefixed, e.g. "Login failed: Invalid credentials".
    pub fn failure_message(&self, err: &ClientError) -> String {
        let prefix = match self {
            AuthFlow::Login => "Login failed",
            AuthFlow::Signup => "Signup failed",
        };
        match err {
            ClientError::Auth(_) | ClientError::Validation(_) => err.user_message(),
            ClientError::Api {
                message: Some(message),
                ..
            } => format!("{}: {}", prefix, message),
            _ => format!("{}: {}", prefix, SERVER_ERROR_FALLBACK),
        }
    }
}

/// Log in and store the returned token
pub async fn login(state: &AppState, credentials: Credentials) -> ClientResult<()> {
    credentials.check()?;

    let response = state
        .api()
        .login(&credentials.username, &credentials.password)
        .await?;
    state.set_token(response.token).await?;

    let remembered = credentials
        .remember_me
        .then(|| credentials.username.clone());
    state.set_remembered_username(remembered).await?;

    info!("Logged in");
    refresh_history_quietly(state).await;
    Ok(())
}

/// Create an account; the server logs the new user straight in
pub async fn register(state: &AppState, form: SignupForm) -> ClientResult<()> {
    form.check()?;

    let response = state
        .api()
        .register(&form.username, &form.password)
        .await?;
    state.set_token(response.token).await?;

    info!("Account created");
    refresh_history_quietly(state).await;
    Ok(())
}

async fn refresh_history_quietly(state: &AppState) {
    if let Err(e) = state.refresh_history().await {
        warn!(error = %e, "History fetch failed");
    }
}
