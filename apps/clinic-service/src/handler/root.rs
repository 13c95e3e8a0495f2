//! # ルートハンドラ
//!
//! - `GET /` - 稼働確認メッセージ
//! - 未定義のルート - 404

use axum::{Json, http::StatusCode, response::IntoResponse};
use clinic_shared::{ErrorResponse, MessageResponse};

use crate::error::messages;

pub const RUNNING_MESSAGE: &str = "Clinic Booking API is running!";

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(RUNNING_MESSAGE))
}

/// どのルートにも一致しないリクエスト
pub async fn fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(messages::ROUTE_NOT_FOUND)),
    )
}
