//! # 予約ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /appointments` - 予約作成（ステータスは `Scheduled`）
//! - `GET /appointments` - 予約一覧
//! - `GET /appointments/{id}` - 予約取得
//! - `PUT /appointments/{id}` - 予約の属性更新（ステータスは変更しない）
//! - `DELETE /appointments/{id}` - 予約削除
//!
//! `patient_id` / `doctor_id` は数値と文字列のどちらでも受け付ける。
//! 数値として解釈できない文字列は、存在しない参照として 404 になる。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use clinic_domain::{
    appointment::{Appointment, AppointmentDraft, AppointmentFields, AppointmentId},
    doctor::DoctorId,
    patient::PatientId,
    value_objects::{RawId, RawText},
};
use clinic_shared::MessageResponse;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, messages},
    extract::JsonBody,
    usecase::AppointmentUseCaseImpl,
};

/// 予約 API の共有状態
pub struct AppointmentState {
    pub usecase: AppointmentUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 予約の作成・更新リクエスト
#[derive(Debug, Deserialize)]
pub struct AppointmentRequest {
    pub patient_id:       Option<RawId>,
    pub doctor_id:        Option<RawId>,
    pub appointment_date: Option<RawText>,
    pub reason:           Option<RawText>,
}

impl From<AppointmentRequest> for AppointmentFields {
    fn from(req: AppointmentRequest) -> Self {
        Self {
            patient_id:       req.patient_id,
            doctor_id:        req.doctor_id,
            appointment_date: req.appointment_date.and_then(RawText::into_text),
            reason:           req.reason.and_then(RawText::into_text),
        }
    }
}

/// 予約 DTO
#[derive(Debug, Serialize)]
pub struct AppointmentDto {
    pub appointment_id:   AppointmentId,
    pub patient_id:       PatientId,
    pub doctor_id:        DoctorId,
    pub appointment_date: String,
    pub reason:           String,
    pub status:           String,
}

impl From<&Appointment> for AppointmentDto {
    fn from(appointment: &Appointment) -> Self {
        let details = appointment.details();
        Self {
            appointment_id:   appointment.id(),
            patient_id:       details.patient_id(),
            doctor_id:        details.doctor_id(),
            appointment_date: details.appointment_date().to_string(),
            reason:           details.reason().to_string(),
            status:           appointment.status().to_string(),
        }
    }
}

fn parse_appointment_id(raw: &str) -> Result<AppointmentId, CoreError> {
    AppointmentId::parse(raw).ok_or_else(|| CoreError::not_found(messages::APPOINTMENT_NOT_FOUND))
}

// --- ハンドラ ---

/// POST /appointments
///
/// ## レスポンス
///
/// - `201 Created`: 作成された予約
/// - `400 Bad Request`: 必須項目の欠落、同一医師・同一日時の予約
/// - `404 Not Found`: 患者または医師が見つからない（患者を先に確認する）
#[tracing::instrument(skip_all)]
pub async fn create_appointment(
    State(state): State<Arc<AppointmentState>>,
    JsonBody(req): JsonBody<AppointmentRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let draft = AppointmentDraft::new(req.into())?;

    let appointment = state.usecase.create_appointment(draft).await?;
    tracing::info!(appointment_id = %appointment.id(), "予約を作成しました");

    Ok((StatusCode::CREATED, Json(AppointmentDto::from(&appointment))))
}

/// GET /appointments
#[tracing::instrument(skip_all)]
pub async fn list_appointments(
    State(state): State<Arc<AppointmentState>>,
) -> Result<impl IntoResponse, CoreError> {
    let appointments = state.usecase.list_appointments().await?;
    let items: Vec<AppointmentDto> = appointments.iter().map(AppointmentDto::from).collect();

    Ok(Json(items))
}

/// GET /appointments/{id}
#[tracing::instrument(skip_all, fields(appointment_id = %raw_id))]
pub async fn get_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let id = parse_appointment_id(&raw_id)?;
    let appointment = state.usecase.get_appointment(id).await?;

    Ok(Json(AppointmentDto::from(&appointment)))
}

/// PUT /appointments/{id}
///
/// 検証順: 必須項目 → 患者 → 医師 → 予約。
/// レスポンスの `status` は保存済みの値をそのまま返す。
#[tracing::instrument(skip_all, fields(appointment_id = %raw_id))]
pub async fn update_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(raw_id): Path<String>,
    JsonBody(req): JsonBody<AppointmentRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let draft = AppointmentDraft::new(req.into())?;
    // 数値でない ID でも参照先の確認は先に済ませる
    let id = AppointmentId::parse(&raw_id);

    let appointment = match id {
        Some(id) => state.usecase.update_appointment(id, draft).await?,
        None => {
            state.usecase.resolve_references(draft).await?;
            return Err(CoreError::not_found(messages::APPOINTMENT_NOT_FOUND));
        }
    };

    Ok(Json(AppointmentDto::from(&appointment)))
}

/// DELETE /appointments/{id}
#[tracing::instrument(skip_all, fields(appointment_id = %raw_id))]
pub async fn delete_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let id = parse_appointment_id(&raw_id)?;
    state.usecase.delete_appointment(id).await?;
    tracing::info!("予約を削除しました");

    Ok(Json(MessageResponse::new(messages::APPOINTMENT_DELETED)))
}
