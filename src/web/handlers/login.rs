//! Login page and form submission handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::application::services::{CREDENTIALS_REQUIRED, LoginError};
use crate::domain::entities::Credentials;
use crate::state::AppState;
use crate::utils::session_id::{generate_session_id, is_well_formed};
use crate::web::session_cookie::{current_session, session_id};

/// Message for an email that does not look like an address.
pub const INVALID_EMAIL: &str = "Invalid email format";

/// Account seeded in the backend's development database.
pub const DEMO_EMAIL: &str = "john.doe@example.com";
pub const DEMO_PASSWORD: &str = "SecurePass123";

const SUBMIT_LABEL: &str = "Sign in";
const LOADING_LABEL: &str = "Signing in...";

/// Template for the login page.
///
/// The error block is rendered only for the response that produced it.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    email: String,
    error: Option<String>,
    submit_label: &'static str,
    loading_label: &'static str,
    demo_email: &'static str,
    demo_password: &'static str,
}

impl LoginTemplate {
    fn new(email: String, error: Option<String>) -> Self {
        Self {
            email,
            error,
            submit_label: SUBMIT_LABEL,
            loading_label: LOADING_LABEL,
            demo_email: DEMO_EMAIL,
            demo_password: DEMO_PASSWORD,
        }
    }
}

/// Submitted login form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
///
/// Redirects to `/dashboard` when the browser already holds a live session.
/// Otherwise makes sure the browser carries a `sid` cookie, so that a pending
/// login can be tied to it.
pub async fn login_page_handler(State(state): State<AppState>, jar: CookieJar) -> Response {
    match current_session(&state.auth_service, &jar).await {
        Ok(Some(_)) => return Redirect::to("/dashboard").into_response(),
        Ok(None) => {}
        Err(e) => tracing::warn!("Session lookup failed on login page: {}", e),
    }

    let jar = match session_id(&jar) {
        Some(sid) if is_well_formed(&sid) => jar,
        _ => jar.add(state.cookies.session_cookie(generate_session_id())),
    };

    (jar, LoginTemplate::new(String::new(), None)).into_response()
}

/// Handles a login form submission.
///
/// # Endpoint
///
/// `POST /login` (form-encoded `email`, `password`)
///
/// # Response Codes
///
/// - **303 See Other** to `/dashboard` with a fresh `sid` cookie on success
/// - **401 Unauthorized** when the backend rejects the credentials or fails
/// - **409 Conflict** when a login for this browser session is still pending
/// - **422 Unprocessable Entity** for missing fields or a malformed email
///
/// Failed attempts re-render the form with the error and the typed email.
/// The password is never echoed back.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let form = LoginForm {
        email: form.email.trim().to_string(),
        password: form.password,
    };
    let credentials = Credentials::new(&form.email, &form.password);

    if credentials.is_incomplete() {
        return render_error(StatusCode::UNPROCESSABLE_ENTITY, form.email, CREDENTIALS_REQUIRED);
    }

    if form.validate().is_err() {
        return render_error(StatusCode::UNPROCESSABLE_ENTITY, form.email, INVALID_EMAIL);
    }

    let current_sid = session_id(&jar);

    match state
        .auth_service
        .login(current_sid.as_deref(), &credentials)
        .await
    {
        Ok(outcome) => {
            let jar = jar.add(state.cookies.session_cookie(outcome.session_id));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(e @ LoginError::InProgress) => {
            render_error(StatusCode::CONFLICT, form.email, &e.to_string())
        }
        Err(LoginError::Failed(e)) => {
            render_error(StatusCode::UNAUTHORIZED, form.email, e.message())
        }
    }
}

fn render_error(status: StatusCode, email: String, message: &str) -> Response {
    (status, LoginTemplate::new(email, Some(message.to_string()))).into_response()
}
