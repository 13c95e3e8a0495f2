//! 患者管理ユースケース

use std::sync::Arc;

use clinic_domain::patient::{Patient, PatientDetails, PatientId};
use clinic_infra::repository::PatientRepository;

use crate::error::{CoreError, messages};

/// 患者管理ユースケース
pub struct PatientUseCaseImpl {
    patient_repository: Arc<dyn PatientRepository>,
}

impl PatientUseCaseImpl {
    pub fn new(patient_repository: Arc<dyn PatientRepository>) -> Self {
        Self { patient_repository }
    }

    /// 患者を登録する
    ///
    /// 重複チェックは行わず、`email` / `phone` の一意制約違反を Conflict に変換する。
    pub async fn create_patient(&self, details: PatientDetails) -> Result<Patient, CoreError> {
        self.patient_repository
            .insert(&details)
            .await
            .map_err(|e| CoreError::from_write(e, messages::EMAIL_OR_PHONE_EXISTS))
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, CoreError> {
        Ok(self.patient_repository.find_all().await?)
    }

    pub async fn get_patient(&self, id: PatientId) -> Result<Patient, CoreError> {
        self.patient_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(messages::PATIENT_NOT_FOUND))
    }

    /// 患者の全属性を置き換える
    pub async fn update_patient(
        &self,
        id: PatientId,
        details: PatientDetails,
    ) -> Result<Patient, CoreError> {
        self.patient_repository
            .update(id, &details)
            .await
            .map_err(|e| CoreError::from_write(e, messages::EMAIL_OR_PHONE_EXISTS))?
            .ok_or_else(|| CoreError::not_found(messages::PATIENT_NOT_FOUND))
    }

    /// 患者を削除する
    ///
    /// 予約から参照されている患者は外部キー違反となり Database エラーになる。
    pub async fn delete_patient(&self, id: PatientId) -> Result<(), CoreError> {
        if self.patient_repository.delete(id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found(messages::PATIENT_NOT_FOUND))
        }
    }
}
