//! # 医師ハンドラ
//!
//! - `POST /doctors` - 医師登録

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use clinic_domain::{
    doctor::{Doctor, DoctorDetails, DoctorFields, DoctorId},
    value_objects::RawText,
};
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, extract::JsonBody, usecase::DoctorUseCaseImpl};

/// 医師 API の共有状態
pub struct DoctorState {
    pub usecase: DoctorUseCaseImpl,
}

/// 医師登録リクエスト
#[derive(Debug, Deserialize)]
pub struct DoctorRequest {
    pub first_name: Option<RawText>,
    pub last_name:  Option<RawText>,
    pub specialty:  Option<RawText>,
    pub email:      Option<RawText>,
    pub phone:      Option<RawText>,
}

impl From<DoctorRequest> for DoctorFields {
    fn from(req: DoctorRequest) -> Self {
        Self {
            first_name: req.first_name.and_then(RawText::into_text),
            last_name:  req.last_name.and_then(RawText::into_text),
            specialty:  req.specialty.and_then(RawText::into_text),
            email:      req.email.and_then(RawText::into_text),
            phone:      req.phone.and_then(RawText::into_text),
        }
    }
}

/// 医師 DTO
#[derive(Debug, Serialize)]
pub struct DoctorDto {
    pub doctor_id:  DoctorId,
    pub first_name: String,
    pub last_name:  String,
    pub specialty:  String,
    pub email:      String,
    pub phone:      String,
}

impl From<&Doctor> for DoctorDto {
    fn from(doctor: &Doctor) -> Self {
        let details = doctor.details();
        Self {
            doctor_id:  doctor.id(),
            first_name: details.first_name().to_string(),
            last_name:  details.last_name().to_string(),
            specialty:  details.specialty().to_string(),
            email:      details.email().to_string(),
            phone:      details.phone().to_string(),
        }
    }
}

/// POST /doctors
///
/// ## レスポンス
///
/// - `201 Created`: 採番された `doctor_id` を含む医師
/// - `400 Bad Request`: 必須項目の欠落、`email` / `phone` の重複
#[tracing::instrument(skip_all)]
pub async fn create_doctor(
    State(state): State<Arc<DoctorState>>,
    JsonBody(req): JsonBody<DoctorRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let details = DoctorDetails::new(req.into())?;

    let doctor = state.usecase.create_doctor(details).await?;
    tracing::info!(doctor_id = %doctor.id(), "医師を登録しました");

    Ok((StatusCode::CREATED, Json(DoctorDto::from(&doctor))))
}
