use crate::{
    AppState,
    auth::SessionUser,
    gate::LOGIN_PATH,
    login::LoginFlow,
    models::{FieldError, LoginErrorBody, LoginForm, LoginOutcome, PageView},
    session::SessionState,
};
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

// --- Login & Logout ---

/// submit_login
///
/// [Auth Page] Handles the login form. On success both session cookies are set and the
/// browser is sent on with `303 See Other`; failures come back as form state.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirected to the validated target"),
        (status = 422, description = "Form validation failed", body = LoginErrorBody),
        (status = 401, description = "Identity Provider rejected the login", body = LoginErrorBody)
    )
)]
pub async fn submit_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let flow = LoginFlow {
        identity: state.identity.as_ref(),
        verifier: state.verifier.as_ref(),
        routes: state.routes.as_ref(),
        sessions: state.sessions.as_ref(),
    };

    let (jar, outcome) = flow.submit(jar, form).await;

    match outcome {
        LoginOutcome::Success { redirect } => (jar, Redirect::to(&redirect)).into_response(),
        LoginOutcome::ValidationError { errors } => {
            form_state(StatusCode::UNPROCESSABLE_ENTITY, errors)
        }
        LoginOutcome::UpstreamError { message } => form_state(
            StatusCode::UNAUTHORIZED,
            vec![FieldError::new("server", message)],
        ),
    }
}

fn form_state(status: StatusCode, errors: Vec<FieldError>) -> Response {
    (
        status,
        Json(LoginErrorBody {
            success: false,
            errors,
        }),
    )
        .into_response()
}

/// logout
///
/// Drops both session cookies and returns to the login page.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 303, description = "Session cleared, redirected to /login"))
)]
pub async fn logout(State(sessions): State<SessionState>, jar: CookieJar) -> Response {
    let jar = sessions.purge(jar);
    tracing::info!("session cleared");
    (jar, Redirect::to(LOGIN_PATH)).into_response()
}

// --- Placeholder Pages ---

pub async fn home_page() -> Json<PageView> {
    Json(PageView::anonymous("home"))
}

pub async fn about_page() -> Json<PageView> {
    Json(PageView::anonymous("about"))
}

/// Auth pages are only reachable anonymously; the gate redirects logged-in users.
pub async fn login_page() -> Json<PageView> {
    Json(PageView::anonymous("login"))
}

pub async fn register_page() -> Json<PageView> {
    Json(PageView::anonymous("register"))
}

pub async fn forget_password_page() -> Json<PageView> {
    Json(PageView::anonymous("forget-password"))
}

pub async fn reset_password_page() -> Json<PageView> {
    Json(PageView::anonymous("reset-password"))
}

/// [Common Route] Any authenticated role.
pub async fn my_profile_page(user: SessionUser) -> Json<PageView> {
    Json(PageView::for_role("my-profile", user.role))
}

pub async fn setting_page(user: SessionUser) -> Json<PageView> {
    Json(PageView::for_role("setting", user.role))
}

/// [Role Route] Dashboards. The gate has already matched the role to the path prefix.
pub async fn admin_dashboard(user: SessionUser) -> Json<PageView> {
    Json(PageView::for_role("admin-dashboard", user.role))
}

pub async fn doctor_dashboard(user: SessionUser) -> Json<PageView> {
    Json(PageView::for_role("doctor-dashboard", user.role))
}

pub async fn patient_dashboard(user: SessionUser) -> Json<PageView> {
    Json(PageView::for_role("patient-dashboard", user.role))
}
