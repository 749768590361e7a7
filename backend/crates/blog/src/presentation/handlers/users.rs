use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use kernel::envelope::Envelope;

use crate::application::{LoginUseCase, RegisterUseCase};
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{LoginRequest, RegisterRequest};
use crate::presentation::extract::JsonBody;
use crate::presentation::handlers::BlogAppState;

// ============================================================================
// Register
// ============================================================================

/// POST /api/user/register
pub async fn register<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> BlogResult<StatusCode> {
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(req.into()).await?;

    Ok(StatusCode::OK)
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/user/login
///
/// The token travels in the body; the raw fingerprint only in the
/// HttpOnly `Secure-Fgp` cookie.
pub async fn login<R: BlogRepository>(
    State(state): State<BlogAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> BlogResult<impl IntoResponse> {
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(req.into()).await?;

    let fingerprint_cookie = state
        .config
        .fingerprint_cookie()
        .build_set_cookie(&output.fingerprint);
    let login_cookie = state.config.login_cookie().build_set_cookie(&output.username);

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, fingerprint_cookie),
            (header::SET_COOKIE, login_cookie),
        ]),
        Envelope::body(output.token),
    ))
}
