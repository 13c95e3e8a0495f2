//! # クリニック予約ドメイン層
//!
//! 患者・医師・予約のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: ストアが採番する ID を持つオブジェクト（Patient, Doctor, Appointment）
//! - **入力検証**: 必須フィールドの検証はストア呼び出しより前に、このクレートの型で完結させる
//! - **ドメインエラー**: 検証失敗を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! clinic-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB）にも HTTP にも依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`value_objects`] - 必須フィールド判定と参照 ID の入力値
//! - [`patient`] - 患者
//! - [`doctor`] - 医師
//! - [`appointment`] - 予約
//!
//! ## 使用例
//!
//! ```rust
//! use clinic_domain::patient::{PatientDetails, PatientFields};
//!
//! let fields = PatientFields {
//!     first_name:    Some("A".to_string()),
//!     last_name:     Some("B".to_string()),
//!     email:         Some("a@b.com".to_string()),
//!     phone:         Some("123".to_string()),
//!     date_of_birth: None,
//! };
//!
//! assert!(PatientDetails::new(fields).is_err());
//! ```

#[macro_use]
mod macros;

pub mod appointment;
pub mod doctor;
pub mod error;
pub mod patient;
pub mod value_objects;

pub use error::DomainError;
