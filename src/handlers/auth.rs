// region:    --- Imports
use crate::database::DatabaseManager;
use crate::users::commands::{
    self, ChangePasswordCommand, ForgotPasswordCommand, LoginCommand, RegisterUserCommand,
    ResetPasswordCommand, VerifyEmailCommand,
};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Command Handlers

/// 회원 가입 요청 처리
pub async fn handle_register(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<RegisterUserCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 회원 가입 요청 처리 시작", "Command");
    match commands::handle_register_user(cmd, &db_manager).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => (axum::http::StatusCode::BAD_REQUEST, Json(e)).into_response(),
    }
}

/// 로그인 요청 처리 (실패 시 401)
pub async fn handle_login(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<LoginCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 로그인 요청 처리 시작", "Command");
    match commands::handle_login(cmd, &db_manager).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => (axum::http::StatusCode::UNAUTHORIZED, Json(e)).into_response(),
    }
}

/// 로그아웃 요청 처리 (서버 측 세션 없음)
pub async fn handle_logout() -> impl IntoResponse {
    info!("{:<12} --> 로그아웃 요청 처리", "Command");
    Json(serde_json::json!({"message": "Logged out successfully"}))
}

/// 이메일 인증 요청 처리
pub async fn handle_verify_email(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<VerifyEmailCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 이메일 인증 요청 처리 시작", "Command");
    match commands::handle_verify_email(cmd, &db_manager).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => (axum::http::StatusCode::BAD_REQUEST, Json(e)).into_response(),
    }
}

/// 비밀번호 재설정 토큰 발급 처리
pub async fn handle_forgot_password(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<ForgotPasswordCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 비밀번호 재설정 토큰 발급 시작", "Command");
    match commands::handle_forgot_password(cmd, &db_manager).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => (axum::http::StatusCode::BAD_REQUEST, Json(e)).into_response(),
    }
}

/// 비밀번호 재설정 처리
pub async fn handle_reset_password(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<ResetPasswordCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 비밀번호 재설정 처리 시작", "Command");
    match commands::handle_reset_password(cmd, &db_manager).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => (axum::http::StatusCode::BAD_REQUEST, Json(e)).into_response(),
    }
}

/// 비밀번호 변경 처리
pub async fn handle_change_password(
    State(db_manager): State<Arc<DatabaseManager>>,
    Json(cmd): Json<ChangePasswordCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 비밀번호 변경 처리 시작", "Command");
    match commands::handle_change_password(cmd, &db_manager).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => (axum::http::StatusCode::BAD_REQUEST, Json(e)).into_response(),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 현재 사용자 조회 (토큰 세션 미도입 상태의 자리 표시 응답)
pub async fn handle_current_user() -> impl IntoResponse {
    info!("{:<12} --> 현재 사용자 조회", "HandlerQuery");
    Json(serde_json::json!({"message": "Current user endpoint"}))
}

// endregion: --- Query Handlers

// region:    --- Routes

/// /api/auth 하위 라우터
pub fn routes() -> Router<Arc<DatabaseManager>> {
    Router::new()
        .route("/register", post(handle_register))
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/me", get(handle_current_user))
        .route("/verify-email", post(handle_verify_email))
        .route("/forgot-password", post(handle_forgot_password))
        .route("/reset-password", post(handle_reset_password))
        .route("/change-password", post(handle_change_password))
}

// endregion: --- Routes
