//! # PatientRepository
//!
//! 患者情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **重複チェックはストアに委譲**: `email` / `phone` の一意制約違反は
//!   `InfraErrorKind::UniqueViolation` として返し、事前の SELECT は行わない
//! - **日付はストアで解釈**: `date_of_birth` はクライアントの文字列を `::date` で
//!   キャストして保存し、読み出し時は `::text` で文字列に戻す
//! - **書き込み結果は入力値**: 挿入・更新は採番 ID のみを受け取り、
//!   属性はクライアントの入力値をそのまま返す（ストアでの正規化前の値）

use async_trait::async_trait;
use clinic_domain::patient::{Patient, PatientDetails, PatientId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 患者リポジトリトレイト
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// 患者を挿入し、採番された ID 付きで返す
    async fn insert(&self, details: &PatientDetails) -> Result<Patient, InfraError>;

    /// すべての患者を取得する
    async fn find_all(&self) -> Result<Vec<Patient>, InfraError>;

    /// ID で患者を検索する
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, InfraError>;

    /// 患者の属性を上書きする
    ///
    /// 該当行がなければ `None`。
    async fn update(
        &self,
        id: PatientId,
        details: &PatientDetails,
    ) -> Result<Option<Patient>, InfraError>;

    /// 患者を削除する
    ///
    /// 削除した行があれば `true`。
    async fn delete(&self, id: PatientId) -> Result<bool, InfraError>;

    /// 患者が存在するか確認する
    async fn exists(&self, id: PatientId) -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の PatientRepository
#[derive(Debug, Clone)]
pub struct PostgresPatientRepository {
    pool: PgPool,
}

impl PostgresPatientRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// patients テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct PatientRow {
    patient_id:    i64,
    first_name:    String,
    last_name:     String,
    email:         String,
    phone:         String,
    date_of_birth: String,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient::from_db(
            PatientId::from_i64(row.patient_id),
            row.first_name,
            row.last_name,
            row.email,
            row.phone,
            row.date_of_birth,
        )
    }
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, details: &PatientDetails) -> Result<Patient, InfraError> {
        let patient_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO patients (first_name, last_name, email, phone, date_of_birth)
            VALUES ($1, $2, $3, $4, $5::date)
            RETURNING patient_id
            "#,
        )
        .bind(details.first_name())
        .bind(details.last_name())
        .bind(details.email())
        .bind(details.phone())
        .bind(details.date_of_birth())
        .fetch_one(&self.pool)
        .await?;

        Ok(Patient::new(PatientId::from_i64(patient_id), details.clone()))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Patient>, InfraError> {
        let rows = sqlx::query_as::<_, PatientRow>(
            r#"
            SELECT
                patient_id,
                first_name,
                last_name,
                email,
                phone,
                date_of_birth::text AS date_of_birth
            FROM patients
            ORDER BY patient_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Patient::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, InfraError> {
        let row = sqlx::query_as::<_, PatientRow>(
            r#"
            SELECT
                patient_id,
                first_name,
                last_name,
                email,
                phone,
                date_of_birth::text AS date_of_birth
            FROM patients
            WHERE patient_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Patient::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        id: PatientId,
        details: &PatientDetails,
    ) -> Result<Option<Patient>, InfraError> {
        let patient_id = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE patients
            SET first_name = $2, last_name = $3, email = $4, phone = $5, date_of_birth = $6::date
            WHERE patient_id = $1
            RETURNING patient_id
            "#,
        )
        .bind(id.as_i64())
        .bind(details.first_name())
        .bind(details.last_name())
        .bind(details.email())
        .bind(details.phone())
        .bind(details.date_of_birth())
        .fetch_optional(&self.pool)
        .await?;

        Ok(patient_id.map(|id| Patient::new(PatientId::from_i64(id), details.clone())))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: PatientId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM patients
            WHERE patient_id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        match result.rows_affected() {
            0 => Ok(false),
            1 => Ok(true),
            n => Err(InfraError::unexpected(format!(
                "主キー指定の削除で {n} 行が削除されました（patients）"
            ))),
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn exists(&self, id: PatientId) -> Result<bool, InfraError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM patients WHERE patient_id = $1)
            "#,
        )
        .bind(id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
