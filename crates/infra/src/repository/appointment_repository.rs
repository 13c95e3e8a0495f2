//! # AppointmentRepository
//!
//! 予約情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **参照先の存在確認はしない**: 患者・医師の存在確認はユースケース層が
//!   書き込み前に行う。確認と書き込みの間に参照先が消えた場合は外部キー違反となり、
//!   `InfraErrorKind::Database` として返る
//! - **予約の衝突**: `(doctor_id, appointment_date)` の一意制約違反は
//!   `InfraErrorKind::UniqueViolation` として返る
//! - **ステータス**: 挿入時に `Scheduled` を設定する。更新では変更せず、
//!   `RETURNING` で保存済みの値を返す
//! - **書き込み結果は入力値**: 挿入・更新で返す属性はクライアントの入力値のまま。
//!   `appointment_date` のストアでの正規化結果は読み出し時にのみ現れる

use async_trait::async_trait;
use clinic_domain::{
    appointment::{Appointment, AppointmentDetails, AppointmentId},
    doctor::DoctorId,
    patient::PatientId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 予約リポジトリトレイト
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// 予約を `Scheduled` で挿入し、採番された ID 付きで返す
    async fn insert(&self, details: &AppointmentDetails) -> Result<Appointment, InfraError>;

    /// すべての予約を取得する
    async fn find_all(&self) -> Result<Vec<Appointment>, InfraError>;

    /// ID で予約を検索する
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, InfraError>;

    /// 予約の属性を上書きする（ステータスは変更しない）
    ///
    /// 該当行がなければ `None`。
    async fn update(
        &self,
        id: AppointmentId,
        details: &AppointmentDetails,
    ) -> Result<Option<Appointment>, InfraError>;

    /// 予約を削除する
    ///
    /// 削除した行があれば `true`。
    async fn delete(&self, id: AppointmentId) -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の AppointmentRepository
#[derive(Debug, Clone)]
pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// appointments テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    appointment_id:   i64,
    patient_id:       i64,
    doctor_id:        i64,
    appointment_date: String,
    reason:           String,
    status:           String,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment::from_db(
            AppointmentId::from_i64(row.appointment_id),
            PatientId::from_i64(row.patient_id),
            DoctorId::from_i64(row.doctor_id),
            row.appointment_date,
            row.reason,
            row.status,
        )
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, details: &AppointmentDetails) -> Result<Appointment, InfraError> {
        let appointment_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO appointments (patient_id, doctor_id, appointment_date, reason, status)
            VALUES ($1, $2, $3::timestamp, $4, $5)
            RETURNING appointment_id
            "#,
        )
        .bind(details.patient_id().as_i64())
        .bind(details.doctor_id().as_i64())
        .bind(details.appointment_date())
        .bind(details.reason())
        .bind(Appointment::DEFAULT_STATUS)
        .fetch_one(&self.pool)
        .await?;

        Ok(Appointment::new(
            AppointmentId::from_i64(appointment_id),
            details.clone(),
            Appointment::DEFAULT_STATUS,
        ))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Appointment>, InfraError> {
        let rows = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT
                appointment_id,
                patient_id,
                doctor_id,
                appointment_date::text AS appointment_date,
                reason,
                status
            FROM appointments
            ORDER BY appointment_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, InfraError> {
        let row = sqlx::query_as::<_, AppointmentRow>(
            r#"
            SELECT
                appointment_id,
                patient_id,
                doctor_id,
                appointment_date::text AS appointment_date,
                reason,
                status
            FROM appointments
            WHERE appointment_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Appointment::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        id: AppointmentId,
        details: &AppointmentDetails,
    ) -> Result<Option<Appointment>, InfraError> {
        let status = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE appointments
            SET patient_id = $2, doctor_id = $3, appointment_date = $4::timestamp, reason = $5
            WHERE appointment_id = $1
            RETURNING status
            "#,
        )
        .bind(id.as_i64())
        .bind(details.patient_id().as_i64())
        .bind(details.doctor_id().as_i64())
        .bind(details.appointment_date())
        .bind(details.reason())
        .fetch_optional(&self.pool)
        .await?;

        Ok(status.map(|status| Appointment::new(id, details.clone(), status)))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: AppointmentId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM appointments
            WHERE appointment_id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        match result.rows_affected() {
            0 => Ok(false),
            1 => Ok(true),
            n => Err(InfraError::unexpected(format!(
                "主キー指定の削除で {n} 行が削除されました（appointments）"
            ))),
        }
    }
}
