//! # エラーレスポンス
//!
//! API が返す失敗・通知ボディの構造体を提供する。
//!
//! ## 設計
//!
//! - ボディは `{"error": "..."}` / `{"message": "..."}` の 1 キーのみ
//! - 文言はサービス側で決める。ここでは形だけを定義する
//! - axum の `IntoResponse` 変換は各サービスの責務

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// ```
/// use clinic_shared::ErrorResponse;
///
/// let body = ErrorResponse::new("Patient not found");
/// assert_eq!(body.error, "Patient not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 削除成功などの通知レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
