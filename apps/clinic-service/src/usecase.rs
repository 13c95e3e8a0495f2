//! # ユースケース層
//!
//! Clinic Service のアプリケーションロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入出力の変換だけを行い、存在確認や
//!   ストアエラーの分類はユースケースに集約
//! - **1 操作 1 書き込み**: 書き込みは常に 1 文。予約の作成・更新だけは
//!   書き込み前に参照先の存在確認（読み取り 2 回）を行う

pub mod appointment;
pub mod doctor;
pub mod patient;

pub use appointment::AppointmentUseCaseImpl;
pub use doctor::DoctorUseCaseImpl;
pub use patient::PatientUseCaseImpl;
