//! # クリニック予約 インフラ層
//!
//! リレーショナルストア（PostgreSQL）との接続・通信を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール作成とマイグレーション
//! - **リポジトリ実装**: 患者・医師・予約の永続化
//! - **エラー分類**: ストア固有のエラーコードを [`InfraErrorKind`] に変換
//!
//! ## 依存関係
//!
//! ```text
//! clinic-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `fake` - テスト用インメモリ実装（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod fake;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
