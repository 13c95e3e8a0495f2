//! # Clinic Service サーバー
//!
//! 患者・医師・予約の CRUD を提供する HTTP API。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | No | PostgreSQL 接続 URL（設定時は `DB_*` より優先） |
//! | `DB_HOST` | `DATABASE_URL` 未設定時 | データベースホスト |
//! | `DB_PORT` | No | データベースポート（デフォルト: `5432`） |
//! | `DB_USER` | `DATABASE_URL` 未設定時 | データベースユーザー |
//! | `DB_PASSWORD` | No | データベースパスワード |
//! | `DB_DATABASE` | `DATABASE_URL` 未設定時 | データベース名 |
//! | `DB_MAX_CONNECTIONS` | No | 接続プールの上限（デフォルト: `10`） |
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `LOG_FORMAT` | No | `json` または `pretty` |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,clinic=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p clinic-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use clinic_infra::{
    db,
    repository::{
        PostgresAppointmentRepository,
        PostgresDoctorRepository,
        PostgresPatientRepository,
    },
};
use clinic_service::{AppDependencies, build_app, config::ClinicConfig};
use clinic_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Clinic Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("clinic-service");
    init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    // 設定読み込み
    let config = ClinicConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!(
        "Clinic Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let app = build_app(AppDependencies {
        patient_repository:     Arc::new(PostgresPatientRepository::new(pool.clone())),
        doctor_repository:      Arc::new(PostgresDoctorRepository::new(pool.clone())),
        appointment_repository: Arc::new(PostgresAppointmentRepository::new(pool.clone())),
        database_health:        Arc::new(pool),
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| {
            format!(
                "アドレスのパースに失敗しました: {}:{}",
                config.host, config.port
            )
        })?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Clinic Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
