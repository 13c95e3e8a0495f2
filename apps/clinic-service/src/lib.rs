//! # Clinic Service ライブラリ
//!
//! 患者・医師・予約を管理する HTTP API の本体。
//! バイナリ（`main.rs`）と結合テストの両方から使用する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: State の組み立てとルーター定義
//! - `config`: 環境変数からの設定読み込み
//! - `error`: `CoreError` と HTTP レスポンスへの変換
//! - `extract`: JSON ボディのエクストラクタ
//! - `handler`: HTTP ハンドラ
//! - `usecase`: 存在確認とストアエラーの分類

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;

pub use app_builder::{AppDependencies, build_app};
