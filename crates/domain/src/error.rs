//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 必須フィールドの欠落 |
//!
//! 「存在しない」「一意制約違反」はストアへの問い合わせ結果であり、
//! ドメイン層ではなくユースケース層で表現する。
//!
//! ## 使用例
//!
//! ```rust
//! use clinic_domain::DomainError;
//!
//! fn validate_name(name: &str) -> Result<(), DomainError> {
//!     if name.is_empty() {
//!         return Err(DomainError::Validation("All fields are required".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_name("").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    /// メッセージはそのままクライアントに返される。
    #[error("{0}")]
    Validation(String),
}
