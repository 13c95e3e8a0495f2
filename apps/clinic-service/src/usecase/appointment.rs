//! 予約管理ユースケース
//!
//! 作成・更新では書き込み前に患者、医師の順で存在を確認する。
//! 数値として解釈できない参照 ID は問い合わせずに見つからない扱いとする。
//! 確認と書き込みはトランザクションで囲まない。間に参照先が削除されると
//! 外部キー違反となり Database エラーとして返る。

use std::sync::Arc;

use clinic_domain::{
    appointment::{Appointment, AppointmentDetails, AppointmentDraft, AppointmentId},
    value_objects::Reference,
};
use clinic_infra::repository::{AppointmentRepository, DoctorRepository, PatientRepository};

use crate::error::{CoreError, messages};

/// 予約管理ユースケース
pub struct AppointmentUseCaseImpl {
    appointment_repository: Arc<dyn AppointmentRepository>,
    patient_repository:     Arc<dyn PatientRepository>,
    doctor_repository:      Arc<dyn DoctorRepository>,
}

impl AppointmentUseCaseImpl {
    pub fn new(
        appointment_repository: Arc<dyn AppointmentRepository>,
        patient_repository: Arc<dyn PatientRepository>,
        doctor_repository: Arc<dyn DoctorRepository>,
    ) -> Self {
        Self {
            appointment_repository,
            patient_repository,
            doctor_repository,
        }
    }

    /// 予約を `Scheduled` で作成する
    pub async fn create_appointment(
        &self,
        draft: AppointmentDraft,
    ) -> Result<Appointment, CoreError> {
        let details = self.resolve_references(draft).await?;

        self.appointment_repository
            .insert(&details)
            .await
            .map_err(|e| CoreError::from_write(e, messages::CONFLICTING_APPOINTMENT))
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, CoreError> {
        Ok(self.appointment_repository.find_all().await?)
    }

    pub async fn get_appointment(&self, id: AppointmentId) -> Result<Appointment, CoreError> {
        self.appointment_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(messages::APPOINTMENT_NOT_FOUND))
    }

    /// 予約の属性を置き換える
    ///
    /// ステータスは変更しない。返り値のステータスは保存済みの値。
    pub async fn update_appointment(
        &self,
        id: AppointmentId,
        draft: AppointmentDraft,
    ) -> Result<Appointment, CoreError> {
        let details = self.resolve_references(draft).await?;

        self.appointment_repository
            .update(id, &details)
            .await
            .map_err(|e| CoreError::from_write(e, messages::CONFLICTING_APPOINTMENT))?
            .ok_or_else(|| CoreError::not_found(messages::APPOINTMENT_NOT_FOUND))
    }

    pub async fn delete_appointment(&self, id: AppointmentId) -> Result<(), CoreError> {
        if self.appointment_repository.delete(id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found(messages::APPOINTMENT_NOT_FOUND))
        }
    }

    /// 参照先の患者・医師が存在することを確認し、予約属性を確定する
    ///
    /// 両方存在しない場合は患者を報告する。
    pub async fn resolve_references(
        &self,
        draft: AppointmentDraft,
    ) -> Result<AppointmentDetails, CoreError> {
        let patient_id = match draft.patient_id() {
            Reference::Id(id) if self.patient_repository.exists(id).await? => id,
            _ => return Err(CoreError::not_found(messages::PATIENT_NOT_FOUND)),
        };
        let doctor_id = match draft.doctor_id() {
            Reference::Id(id) if self.doctor_repository.exists(id).await? => id,
            _ => return Err(CoreError::not_found(messages::DOCTOR_NOT_FOUND)),
        };
        Ok(draft.into_details(patient_id, doctor_id))
    }
}

#[cfg(test)]
mod tests {
    use clinic_domain::{
        appointment::AppointmentFields,
        doctor::{Doctor, DoctorDetails, DoctorFields, DoctorId},
        patient::{Patient, PatientDetails, PatientFields, PatientId},
        value_objects::RawId,
    };
    use clinic_infra::fake::{
        FakeAppointmentRepository,
        FakeDoctorRepository,
        FakePatientRepository,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    struct Fixture {
        sut:          AppointmentUseCaseImpl,
        appointments: FakeAppointmentRepository,
    }

    fn fixture() -> Fixture {
        let patients = FakePatientRepository::new();
        patients.add_patient(Patient::new(
            PatientId::from_i64(1),
            PatientDetails::new(PatientFields {
                first_name:    Some("A".to_string()),
                last_name:     Some("B".to_string()),
                email:         Some("a@b.com".to_string()),
                phone:         Some("123".to_string()),
                date_of_birth: Some("2000-01-01".to_string()),
            })
            .unwrap(),
        ));
        let doctors = FakeDoctorRepository::new();
        doctors.add_doctor(Doctor::new(
            DoctorId::from_i64(1),
            DoctorDetails::new(DoctorFields {
                first_name: Some("Gregory".to_string()),
                last_name:  Some("House".to_string()),
                specialty:  Some("Diagnostics".to_string()),
                email:      Some("house@example.com".to_string()),
                phone:      Some("555".to_string()),
            })
            .unwrap(),
        ));
        let appointments = FakeAppointmentRepository::new();
        let sut = AppointmentUseCaseImpl::new(
            Arc::new(appointments.clone()),
            Arc::new(patients),
            Arc::new(doctors),
        );
        Fixture { sut, appointments }
    }

    fn draft(patient_id: RawId, doctor_id: RawId) -> AppointmentDraft {
        AppointmentDraft::new(AppointmentFields {
            patient_id:       Some(patient_id),
            doctor_id:        Some(doctor_id),
            appointment_date: Some("2025-03-01 09:30:00".to_string()),
            reason:           Some("Checkup".to_string()),
        })
        .unwrap()
    }

    fn ids(patient_id: i64, doctor_id: i64) -> AppointmentDraft {
        draft(RawId::Number(patient_id), RawId::Number(doctor_id))
    }

    #[tokio::test]
    async fn test_作成した予約はscheduledになる() {
        let Fixture { sut, .. } = fixture();

        let appointment = sut.create_appointment(ids(1, 1)).await.unwrap();

        assert_eq!(appointment.status(), "Scheduled");
    }

    #[tokio::test]
    async fn test_患者と医師の両方が存在しない場合は患者を先に報告する() {
        let Fixture { sut, appointments } = fixture();

        let result = sut.create_appointment(ids(99, 99)).await;

        assert!(matches!(result, Err(CoreError::NotFound(ref m)) if m == messages::PATIENT_NOT_FOUND));
        assert_eq!(appointments.count(), 0);
    }

    #[tokio::test]
    async fn test_医師が存在しない場合は書き込まない() {
        let Fixture { sut, appointments } = fixture();

        let result = sut.create_appointment(ids(1, 99)).await;

        assert!(matches!(result, Err(CoreError::NotFound(ref m)) if m == messages::DOCTOR_NOT_FOUND));
        assert_eq!(appointments.count(), 0);
    }

    #[tokio::test]
    async fn test_参照先の確認は予約の存在確認より先に行う() {
        let Fixture { sut, .. } = fixture();

        let result = sut
            .update_appointment(AppointmentId::from_i64(5), ids(99, 1))
            .await;

        assert!(matches!(result, Err(CoreError::NotFound(ref m)) if m == messages::PATIENT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_数値でない参照idは問い合わせずに見つからない扱い() {
        let Fixture { sut, appointments } = fixture();

        let patient_result = sut
            .create_appointment(draft(RawId::Text("abc".to_string()), RawId::Number(1)))
            .await;
        let doctor_result = sut
            .create_appointment(draft(RawId::Number(1), RawId::Text("abc".to_string())))
            .await;

        assert!(
            matches!(patient_result, Err(CoreError::NotFound(ref m)) if m == messages::PATIENT_NOT_FOUND)
        );
        assert!(
            matches!(doctor_result, Err(CoreError::NotFound(ref m)) if m == messages::DOCTOR_NOT_FOUND)
        );
        assert_eq!(appointments.count(), 0);
    }

    #[tokio::test]
    async fn test_文字列のゼロは存在しない患者として扱う() {
        let Fixture { sut, .. } = fixture();

        let result = sut
            .create_appointment(draft(RawId::Text("0".to_string()), RawId::Number(1)))
            .await;

        assert!(matches!(result, Err(CoreError::NotFound(ref m)) if m == messages::PATIENT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_同一医師同一日時はconflict() {
        let Fixture { sut, appointments } = fixture();
        sut.create_appointment(ids(1, 1)).await.unwrap();

        let result = sut.create_appointment(ids(1, 1)).await;

        assert!(
            matches!(result, Err(CoreError::Conflict(ref m)) if m == messages::CONFLICTING_APPOINTMENT)
        );
        assert_eq!(appointments.count(), 1);
    }
}
