//! # 患者ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /patients` - 患者登録
//! - `GET /patients` - 患者一覧
//! - `GET /patients/{id}` - 患者取得
//! - `PUT /patients/{id}` - 患者の全属性更新
//! - `DELETE /patients/{id}` - 患者削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use clinic_domain::{
    patient::{Patient, PatientDetails, PatientFields, PatientId},
    value_objects::RawText,
};
use clinic_shared::MessageResponse;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, messages},
    extract::JsonBody,
    usecase::PatientUseCaseImpl,
};

/// 患者 API の共有状態
pub struct PatientState {
    pub usecase: PatientUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 患者の登録・更新リクエスト
///
/// 欠落判定はドメイン層で行うため、すべて `Option` で受け取る。
/// 数値や真偽値も文字列に変換して受け付ける。
#[derive(Debug, Deserialize)]
pub struct PatientRequest {
    pub first_name:    Option<RawText>,
    pub last_name:     Option<RawText>,
    pub email:         Option<RawText>,
    pub phone:         Option<RawText>,
    pub date_of_birth: Option<RawText>,
}

impl From<PatientRequest> for PatientFields {
    fn from(req: PatientRequest) -> Self {
        Self {
            first_name:    req.first_name.and_then(RawText::into_text),
            last_name:     req.last_name.and_then(RawText::into_text),
            email:         req.email.and_then(RawText::into_text),
            phone:         req.phone.and_then(RawText::into_text),
            date_of_birth: req.date_of_birth.and_then(RawText::into_text),
        }
    }
}

/// 患者 DTO
#[derive(Debug, Serialize)]
pub struct PatientDto {
    pub patient_id:    PatientId,
    pub first_name:    String,
    pub last_name:     String,
    pub email:         String,
    pub phone:         String,
    pub date_of_birth: String,
}

impl From<&Patient> for PatientDto {
    fn from(patient: &Patient) -> Self {
        let details = patient.details();
        Self {
            patient_id:    patient.id(),
            first_name:    details.first_name().to_string(),
            last_name:     details.last_name().to_string(),
            email:         details.email().to_string(),
            phone:         details.phone().to_string(),
            date_of_birth: details.date_of_birth().to_string(),
        }
    }
}

/// 数値でない ID はどの行にも一致しないので、存在しない場合と同じ 404 にする
fn parse_patient_id(raw: &str) -> Result<PatientId, CoreError> {
    PatientId::parse(raw).ok_or_else(|| CoreError::not_found(messages::PATIENT_NOT_FOUND))
}

// --- ハンドラ ---

/// POST /patients
///
/// ## レスポンス
///
/// - `201 Created`: 採番された `patient_id` を含む患者
/// - `400 Bad Request`: 必須項目の欠落、`email` / `phone` の重複
#[tracing::instrument(skip_all)]
pub async fn create_patient(
    State(state): State<Arc<PatientState>>,
    JsonBody(req): JsonBody<PatientRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let details = PatientDetails::new(req.into())?;

    let patient = state.usecase.create_patient(details).await?;
    tracing::info!(patient_id = %patient.id(), "患者を登録しました");

    Ok((StatusCode::CREATED, Json(PatientDto::from(&patient))))
}

/// GET /patients
#[tracing::instrument(skip_all)]
pub async fn list_patients(
    State(state): State<Arc<PatientState>>,
) -> Result<impl IntoResponse, CoreError> {
    let patients = state.usecase.list_patients().await?;
    let items: Vec<PatientDto> = patients.iter().map(PatientDto::from).collect();

    Ok(Json(items))
}

/// GET /patients/{id}
#[tracing::instrument(skip_all, fields(patient_id = %raw_id))]
pub async fn get_patient(
    State(state): State<Arc<PatientState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let id = parse_patient_id(&raw_id)?;
    let patient = state.usecase.get_patient(id).await?;

    Ok(Json(PatientDto::from(&patient)))
}

/// PUT /patients/{id}
///
/// 本文の検証を ID の解決より先に行う。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の患者
/// - `400 Bad Request`: 必須項目の欠落、他の患者との重複
/// - `404 Not Found`: 患者が見つからない
#[tracing::instrument(skip_all, fields(patient_id = %raw_id))]
pub async fn update_patient(
    State(state): State<Arc<PatientState>>,
    Path(raw_id): Path<String>,
    JsonBody(req): JsonBody<PatientRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let details = PatientDetails::new(req.into())?;
    let id = parse_patient_id(&raw_id)?;

    let patient = state.usecase.update_patient(id, details).await?;

    Ok(Json(PatientDto::from(&patient)))
}

/// DELETE /patients/{id}
#[tracing::instrument(skip_all, fields(patient_id = %raw_id))]
pub async fn delete_patient(
    State(state): State<Arc<PatientState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let id = parse_patient_id(&raw_id)?;
    state.usecase.delete_patient(id).await?;
    tracing::info!("患者を削除しました");

    Ok(Json(MessageResponse::new(messages::PATIENT_DELETED)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_dtoのキーはテーブルの列名と一致する() {
        let patient = Patient::from_db(
            PatientId::from_i64(7),
            "A".to_string(),
            "B".to_string(),
            "a@b.com".to_string(),
            "123".to_string(),
            "2000-01-01".to_string(),
        );

        let json = serde_json::to_value(PatientDto::from(&patient)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "patient_id": 7,
                "first_name": "A",
                "last_name": "B",
                "email": "a@b.com",
                "phone": "123",
                "date_of_birth": "2000-01-01"
            })
        );
    }

    #[test]
    fn test_数値の電話番号は文字列に変換し偽の値は未入力とする() {
        let req: PatientRequest = serde_json::from_value(serde_json::json!({
            "first_name": "A",
            "last_name": false,
            "email": "a@b.com",
            "phone": 5551234,
            "date_of_birth": 0
        }))
        .unwrap();

        let fields = PatientFields::from(req);

        assert_eq!(fields.phone.as_deref(), Some("5551234"));
        assert_eq!(fields.last_name, None);
        assert_eq!(fields.date_of_birth, None);
    }

    #[test]
    fn test_数値でないidはnot_found() {
        assert!(matches!(
            parse_patient_id("abc"),
            Err(CoreError::NotFound(ref m)) if m == messages::PATIENT_NOT_FOUND
        ));
        assert_eq!(parse_patient_id(" 3 ").unwrap(), PatientId::from_i64(3));
    }
}
