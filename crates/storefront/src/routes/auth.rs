//! Authentication route handlers.
//!
//! Login only: a successful login stores a token in visitor storage and
//! redirects home. There is no registration and no logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::flash;
use crate::models::Credentials;
use crate::services::auth::{self as auth_service, AuthError};
use crate::state::AppState;
use crate::storage::SessionStorage;

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub flash: Option<String>,
    pub signed_in: bool,
}

/// Display the login page.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> impl IntoResponse {
    let storage = SessionStorage::new(session.clone());
    let signed_in = match auth_service::is_authenticated(&storage).await {
        Ok(signed_in) => signed_in,
        Err(e) => {
            tracing::warn!("Failed to read token: {e}");
            false
        }
    };

    LoginTemplate {
        flash: flash::take(&session).await,
        signed_in,
    }
}

/// Handle login form submission.
///
/// Any rejection is acknowledged with the same message and leaves the stored
/// token as it was.
///
/// # Errors
///
/// Fails only if the token cannot be written to storage.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let storage = SessionStorage::new(session.clone());
    let credentials = Credentials::new(form.email, form.password);

    match auth_service::login(state.backend(), &storage, &credentials).await {
        Ok(()) => Ok(Redirect::to("/")),
        Err(AuthError::Rejected(_)) => {
            flash::set(&session, MSG_INVALID_CREDENTIALS).await;
            Ok(Redirect::to("/login"))
        }
        Err(AuthError::Storage(e)) => Err(e.into()),
    }
}
