//! 医師管理ユースケース

use std::sync::Arc;

use clinic_domain::doctor::{Doctor, DoctorDetails};
use clinic_infra::repository::DoctorRepository;

use crate::error::{CoreError, messages};

/// 医師管理ユースケース
///
/// 医師は登録のみ。参照は予約の存在確認からだけ行われる。
pub struct DoctorUseCaseImpl {
    doctor_repository: Arc<dyn DoctorRepository>,
}

impl DoctorUseCaseImpl {
    pub fn new(doctor_repository: Arc<dyn DoctorRepository>) -> Self {
        Self { doctor_repository }
    }

    pub async fn create_doctor(&self, details: DoctorDetails) -> Result<Doctor, CoreError> {
        self.doctor_repository
            .insert(&details)
            .await
            .map_err(|e| CoreError::from_write(e, messages::EMAIL_OR_PHONE_EXISTS))
    }
}

#[cfg(test)]
mod tests {
    use clinic_domain::doctor::DoctorFields;
    use clinic_infra::fake::FakeDoctorRepository;

    use super::*;

    fn details(email: &str, phone: &str) -> DoctorDetails {
        DoctorDetails::new(DoctorFields {
            first_name: Some("Gregory".to_string()),
            last_name:  Some("House".to_string()),
            specialty:  Some("Diagnostics".to_string()),
            email:      Some(email.to_string()),
            phone:      Some(phone.to_string()),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_電話番号の重複はconflict() {
        let repo = FakeDoctorRepository::new();
        let sut = DoctorUseCaseImpl::new(Arc::new(repo.clone()));
        sut.create_doctor(details("house@example.com", "555"))
            .await
            .unwrap();

        let result = sut.create_doctor(details("wilson@example.com", "555")).await;

        assert!(matches!(result, Err(CoreError::Conflict(_))));
        assert_eq!(repo.count(), 1);
    }
}
