//! # インフラ層エラー定義
//!
//! ストアとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **型付きの分類**: ストア固有のエラーコード（SQLSTATE）の判定はこのモジュールに閉じ込め、
//!   上位層には [`InfraErrorKind`] として渡す
//! - **HTTP からの分離**: ステータスコードへの変換はアプリケーション層の責務
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::UniqueViolation { .. } => { /* 重複 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 一意制約違反（SQLSTATE 23505）
    ///
    /// メールアドレス・電話番号の重複、同一医師・同一日時の予約など。
    /// ユースケース層でエンティティごとのメッセージに変換する。
    #[error("一意制約違反: {}", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation {
        /// 違反した制約名（ドライバが返した場合のみ）
        constraint: Option<String>,
    },

    /// データベースエラー
    ///
    /// 接続失敗、型変換の失敗、外部キー違反など、一意制約違反以外のすべて。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 一意制約違反かどうか
    pub fn is_unique_violation(&self) -> bool {
        matches!(self.kind, InfraErrorKind::UniqueViolation { .. })
    }

    // ===== Convenience constructors =====

    /// 一意制約違反エラーを生成する
    pub fn unique_violation(constraint: Option<&str>) -> Self {
        Self {
            kind:       InfraErrorKind::UniqueViolation {
                constraint: constraint.map(str::to_string),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    /// sqlx のエラーを分類する
    ///
    /// ドライバが一意制約違反と判定したものだけを `UniqueViolation` にし、
    /// それ以外は `Database` として元のエラーを保持する。
    fn from(source: sqlx::Error) -> Self {
        let kind = match source.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => InfraErrorKind::UniqueViolation {
                constraint: db_err.constraint().map(str::to_string),
            },
            _ => InfraErrorKind::Database(source),
        };

        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}
