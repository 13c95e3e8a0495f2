//! # DoctorRepository
//!
//! 医師情報の永続化を担当するリポジトリ。
//! 作成と、予約時の存在確認のみを提供する。

use async_trait::async_trait;
use clinic_domain::doctor::{Doctor, DoctorDetails, DoctorId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 医師リポジトリトレイト
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// 医師を挿入し、採番された ID 付きで返す
    ///
    /// `email` / `phone` の重複は一意制約違反として返る。
    async fn insert(&self, details: &DoctorDetails) -> Result<Doctor, InfraError>;

    /// 医師が存在するか確認する
    async fn exists(&self, id: DoctorId) -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の DoctorRepository
#[derive(Debug, Clone)]
pub struct PostgresDoctorRepository {
    pool: PgPool,
}

impl PostgresDoctorRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorRepository for PostgresDoctorRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, details: &DoctorDetails) -> Result<Doctor, InfraError> {
        let doctor_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO doctors (first_name, last_name, specialty, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING doctor_id
            "#,
        )
        .bind(details.first_name())
        .bind(details.last_name())
        .bind(details.specialty())
        .bind(details.email())
        .bind(details.phone())
        .fetch_one(&self.pool)
        .await?;

        Ok(Doctor::new(DoctorId::from_i64(doctor_id), details.clone()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn exists(&self, id: DoctorId) -> Result<bool, InfraError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM doctors WHERE doctor_id = $1)
            "#,
        )
        .bind(id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
