//! # ヘルスチェックハンドラ
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（データベースへの疎通を確認）
//!
//! レスポンス型は [`clinic_shared::HealthResponse`] / [`clinic_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use clinic_infra::db::DatabaseHealth;
use clinic_shared::{CheckStatus, HealthResponse, ReadinessResponse};

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub database: Arc<dyn DatabaseHealth>,
}

/// Readiness Check エンドポイント
///
/// `SELECT 1` が通れば 200、失敗またはタイムアウトなら 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert(
        "database".to_string(),
        check_database(state.database.as_ref()).await,
    );

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

async fn check_database(database: &dyn DatabaseHealth) -> CheckStatus {
    match tokio::time::timeout(PING_TIMEOUT, database.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database ping timed out");
            CheckStatus::Error
        }
    }
}
