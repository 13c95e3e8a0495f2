//! # ヘルスチェック共通型
//!
//! Liveness（`/health`）と Readiness（`/health/ready`）エンドポイントの
//! レスポンス型を提供する。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// プロセスが応答できることだけを示す。データベースには触れない。
///
/// ## 使用例
///
/// ```
/// use clinic_shared::HealthResponse;
///
/// let response = HealthResponse {
///     status:  "healthy".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// チェック成功
    Ok,
    /// チェック失敗
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// データベースに接続できる
    Ready,
    /// データベースに接続できない
    NotReady,
}

/// Readiness Check レスポンス
///
/// データベースへの疎通結果を含むレスポンス型。
/// `status` は全体のステータス、`checks` は個別チェック結果を示す。
///
/// ## 使用例
///
/// ```
/// use std::collections::HashMap;
///
/// use clinic_shared::{CheckStatus, ReadinessResponse, ReadinessStatus};
///
/// let mut checks = HashMap::new();
/// checks.insert("database".to_string(), CheckStatus::Ok);
/// let response = ReadinessResponse {
///     status: ReadinessStatus::Ready,
///     checks,
/// };
/// assert_eq!(response.status, ReadinessStatus::Ready);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// 全体のステータス
    pub status: ReadinessStatus,
    /// 個別チェック結果（キー: チェック名、値: ステータス）
    pub checks: HashMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// 個別チェック結果から全体ステータスを導出する
    ///
    /// すべて `Ok` なら `Ready`、ひとつでも `Error` があれば `NotReady`。
    pub fn from_checks(checks: HashMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|c| *c == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}
