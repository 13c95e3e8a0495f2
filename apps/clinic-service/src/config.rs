//! # Clinic Service 設定
//!
//! 環境変数から Clinic Service サーバーの設定を読み込む。
//!
//! `DATABASE_URL` が設定されていれば接続先はそれで決まり、
//! `DB_HOST` / `DB_USER` / `DB_DATABASE` は不要になる。

use std::{env, str::FromStr};

use clinic_infra::db::DatabaseSettings;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値を解釈できない
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Clinic Service サーバーの設定
#[derive(Debug, Clone)]
pub struct ClinicConfig {
    /// バインドアドレス
    pub host:     String,
    /// ポート番号
    pub port:     u16,
    /// データベース接続先
    pub database: DatabaseSettings,
}

impl ClinicConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let url = get("DATABASE_URL");
        // URL があれば個別の値は使わないので、欠けていても構わない
        let part = |name: &'static str| match &url {
            Some(_) => Ok(get(name).unwrap_or_default()),
            None => required(name),
        };

        let database = DatabaseSettings {
            host: part("DB_HOST")?,
            port: parse_or("DB_PORT", get("DB_PORT"), DEFAULT_DB_PORT)?,
            user: part("DB_USER")?,
            password: get("DB_PASSWORD").unwrap_or_default(),
            database: part("DB_DATABASE")?,
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            url,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database,
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
