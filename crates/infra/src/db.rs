//! # PostgreSQL データベース接続管理
//!
//! データベース接続プールの作成とスキーマのマイグレーションを行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 起動時に一度だけ作成し、ハンドラの状態として明示的に渡す
//!   （プロセス全体のシングルトンにはしない）
//! - **同時実行の管理**: 物理コネクションの貸し出し・返却はプールに任せる。
//!   アプリケーション側ではロックもトランザクションも使わない
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use clinic_infra::db::{self, DatabaseSettings};
//!
//! async fn example(settings: &DatabaseSettings) -> Result<(), sqlx::Error> {
//!     let pool = db::create_pool(settings).await?;
//!     db::run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::error::InfraError;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// 接続先の指定
///
/// `url` が指定されていればそれを優先し、なければ個別の値から組み立てる。
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url:             Option<String>,
    pub host:            String,
    pub port:            u16,
    pub user:            String,
    pub password:        String,
    pub database:        String,
    pub max_connections: u32,
}

// パスワードをログに出さない
impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseSettings {
    /// 接続オプションを組み立てる
    ///
    /// URL の書式が不正な場合は `sqlx::Error::Configuration` を返す。
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database))
    }
}

/// データベースマイグレーションを実行する
///
/// `sqlx::migrate!()` マクロで埋め込まれたマイグレーションファイルを
/// 順番に適用する。適用済みのマイグレーションはスキップされる。
///
/// sqlx が PostgreSQL の advisory lock を使用するため、
/// 複数プロセスから同時に呼び出しても安全。
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// PostgreSQL 接続プールを作成する
///
/// 接続できない場合（ホスト不達、認証失敗など）は `sqlx::Error` を返す。
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(settings.connect_options()?)
        .await
}

/// ストアへの疎通を確認する
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Readiness Check が使う疎通確認
///
/// ハンドラのテストでプールなしに差し替えられるようトレイトにしている。
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn ping(&self) -> Result<(), InfraError>;
}

#[async_trait]
impl DatabaseHealth for PgPool {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn ping(&self) -> Result<(), InfraError> {
        ping(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DatabaseSettings {
        DatabaseSettings {
            url:             None,
            host:            "db.internal".to_string(),
            port:            5433,
            user:            "clinic".to_string(),
            password:        "secret".to_string(),
            database:        "clinic_booking".to_string(),
            max_connections: 10,
        }
    }

    #[test]
    fn test_個別の値から接続オプションを組み立てる() {
        let options = settings().connect_options().unwrap();

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "clinic");
        assert_eq!(options.get_database(), Some("clinic_booking"));
    }

    #[test]
    fn test_urlが指定されていればurlを優先する() {
        let settings = DatabaseSettings {
            url: Some("postgres://app:pw@localhost:15432/clinic".to_string()),
            ..settings()
        };

        let options = settings.connect_options().unwrap();

        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 15432);
        assert_eq!(options.get_database(), Some("clinic"));
    }

    #[test]
    fn test_不正なurlはエラーを返す() {
        let settings = DatabaseSettings {
            url: Some("not a url".to_string()),
            ..settings()
        };

        assert!(settings.connect_options().is_err());
    }

    #[test]
    fn test_debug出力にパスワードを含めない() {
        let debug = format!("{:?}", settings());

        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
