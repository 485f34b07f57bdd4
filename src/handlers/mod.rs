// region:    --- Modules
pub mod auth;
pub mod categories;
pub mod items;
pub mod messages;
pub mod offers;
pub mod transactions;
pub mod users;

// endregion: --- Modules

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

/// 커맨드 오류를 HTTP 응답으로 변환
/// (NOT_FOUND 코드는 404, 나머지 코드는 400, 코드 없는 DB 오류는 500)
pub fn error_response(err: serde_json::Value) -> Response {
    let status = match err.get("code").and_then(|code| code.as_str()) {
        Some("NOT_FOUND") => axum::http::StatusCode::NOT_FOUND,
        Some(_) => axum::http::StatusCode::BAD_REQUEST,
        None => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err)).into_response()
}

/// 조회 대상이 없을 때의 404 응답
pub fn not_found(message: &str) -> Response {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": message,
            "code": "NOT_FOUND"
        })),
    )
        .into_response()
}

/// 페이지 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page_size() -> i64 {
    20
}
