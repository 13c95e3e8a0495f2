//! # Clinic Service エラー定義
//!
//! Clinic Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//! ステータスコードを決めるのはこの [`IntoResponse`] 実装だけ。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_domain::DomainError;
use clinic_infra::InfraError;
use clinic_shared::ErrorResponse;
use thiserror::Error;

/// クライアントに返すメッセージ
pub mod messages {
    pub use clinic_domain::value_objects::ALL_FIELDS_REQUIRED;

    pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
    pub const EMAIL_OR_PHONE_EXISTS: &str = "Email or phone already exists";
    pub const CONFLICTING_APPOINTMENT: &str = "Doctor has a conflicting appointment";
    pub const PATIENT_NOT_FOUND: &str = "Patient not found";
    pub const DOCTOR_NOT_FOUND: &str = "Doctor not found";
    pub const APPOINTMENT_NOT_FOUND: &str = "Appointment not found";
    pub const ROUTE_NOT_FOUND: &str = "Not found";
    pub const PATIENT_DELETED: &str = "Patient deleted successfully";
    pub const APPOINTMENT_DELETED: &str = "Appointment deleted successfully";
    pub const DATABASE_ERROR: &str = "Database error";
}

/// Clinic Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// 必須項目の欠落
    #[error("入力が不正です: {0}")]
    Validation(#[from] DomainError),

    /// リクエストボディを解釈できない
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 一意制約違反
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// 対象または参照先が見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl CoreError {
    pub fn not_found(message: &str) -> Self {
        Self::NotFound(message.to_string())
    }

    pub fn conflict(message: &str) -> Self {
        Self::Conflict(message.to_string())
    }

    /// 一意制約違反なら `conflict_message` の Conflict、それ以外は Database に変換する
    pub fn from_write(err: InfraError, conflict_message: &str) -> Self {
        if err.is_unique_violation() {
            tracing::debug!(error = %err, "一意制約違反");
            Self::conflict(conflict_message)
        } else {
            Self::Database(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) | CoreError::BadRequest(_) | CoreError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "リクエストボディを解釈できません");
        Self::BadRequest(messages::INVALID_JSON_BODY.to_string())
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            CoreError::Validation(e) => e.to_string(),
            CoreError::BadRequest(msg) | CoreError::Conflict(msg) | CoreError::NotFound(msg) => {
                msg
            }
            CoreError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                messages::DATABASE_ERROR.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
