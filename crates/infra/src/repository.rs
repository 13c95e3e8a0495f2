//! # リポジトリ実装
//!
//! 患者・医師・予約の永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **トレイトによる抽象化**: ユースケース層は `Arc<dyn ...Repository>` だけに依存する
//! - **1 操作 1 ステートメント**: 各メソッドはストアへの単一の SQL 文に対応する
//! - **エラー分類**: 一意制約違反は [`InfraError::is_unique_violation`](crate::InfraError::is_unique_violation)
//!   で判別できる形で返す

pub mod appointment_repository;
pub mod doctor_repository;
pub mod patient_repository;

pub use appointment_repository::{AppointmentRepository, PostgresAppointmentRepository};
pub use doctor_repository::{DoctorRepository, PostgresDoctorRepository};
pub use patient_repository::{PatientRepository, PostgresPatientRepository};
