//! # クリニック予約 共有ユーティリティ
//!
//! サービスとインフラ層から使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換はサービス側の責務）
//! - トレーシング関連は `observability` feature で有効化する

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::{ErrorResponse, MessageResponse};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
