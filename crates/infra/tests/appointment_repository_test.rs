//! AppointmentRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p clinic-infra --test appointment_repository_test -- --ignored
//! ```

mod common;

use clinic_domain::appointment::AppointmentId;
use clinic_infra::{
    InfraErrorKind,
    repository::{
        AppointmentRepository,
        PatientRepository,
        PostgresAppointmentRepository,
        PostgresPatientRepository,
    },
};
use common::{appointment_details, count_rows, setup_patient_and_doctor};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_insertでステータスはscheduledになる(pool: PgPool) {
    let (patient, doctor) = setup_patient_and_doctor(&pool).await;
    let sut = PostgresAppointmentRepository::new(pool);

    let appointment = sut
        .insert(&appointment_details(&patient, &doctor, "2025-03-01 09:30:00", "Checkup"))
        .await
        .unwrap();

    assert!(appointment.id().as_i64() > 0);
    assert_eq!(appointment.status(), "Scheduled");
    assert_eq!(appointment.details().appointment_date(), "2025-03-01 09:30:00");
    assert_eq!(appointment.details().patient_id(), patient.id());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_insertは入力の日時をそのまま返し読み出しはストアの表記になる(pool: PgPool) {
    let (patient, doctor) = setup_patient_and_doctor(&pool).await;
    let sut = PostgresAppointmentRepository::new(pool);

    let created = sut
        .insert(&appointment_details(&patient, &doctor, "2025-03-01T09:30", "Checkup"))
        .await
        .unwrap();
    let found = sut.find_by_id(created.id()).await.unwrap().unwrap();

    assert_eq!(created.details().appointment_date(), "2025-03-01T09:30");
    assert_eq!(found.details().appointment_date(), "2025-03-01 09:30:00");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_同一医師同一日時の予約は一意制約違反(pool: PgPool) {
    let (patient, doctor) = setup_patient_and_doctor(&pool).await;
    let sut = PostgresAppointmentRepository::new(pool.clone());
    let details = appointment_details(&patient, &doctor, "2025-03-01 09:30:00", "Checkup");
    sut.insert(&details).await.unwrap();

    let err = sut.insert(&details).await.unwrap_err();

    assert!(err.is_unique_violation());
    assert_eq!(count_rows(&pool, "appointments").await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_参照先の患者が消えていれば外部キー違反はデータベースエラー(pool: PgPool) {
    let (patient, doctor) = setup_patient_and_doctor(&pool).await;
    PostgresPatientRepository::new(pool.clone())
        .delete(patient.id())
        .await
        .unwrap();
    let sut = PostgresAppointmentRepository::new(pool);

    let err = sut
        .insert(&appointment_details(&patient, &doctor, "2025-03-01 09:30:00", "Checkup"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_updateは保存済みのステータスを返す(pool: PgPool) {
    let (patient, doctor) = setup_patient_and_doctor(&pool).await;
    let sut = PostgresAppointmentRepository::new(pool.clone());
    let created = sut
        .insert(&appointment_details(&patient, &doctor, "2025-03-01 09:30:00", "Checkup"))
        .await
        .unwrap();
    sqlx::query("UPDATE appointments SET status = 'Completed' WHERE appointment_id = $1")
        .bind(created.id().as_i64())
        .execute(&pool)
        .await
        .unwrap();

    let updated = sut
        .update(
            created.id(),
            &appointment_details(&patient, &doctor, "2025-03-02 10:00:00", "Follow-up"),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status(), "Completed");
    assert_eq!(updated.details().reason(), "Follow-up");
    assert_eq!(updated.details().appointment_date(), "2025-03-02 10:00:00");
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_存在しない予約の更新と削除(pool: PgPool) {
    let (patient, doctor) = setup_patient_and_doctor(&pool).await;
    let sut = PostgresAppointmentRepository::new(pool);
    let missing = AppointmentId::from_i64(999);

    let updated = sut
        .update(
            missing,
            &appointment_details(&patient, &doctor, "2025-03-01 09:30:00", "Checkup"),
        )
        .await
        .unwrap();
    let deleted = sut.delete(missing).await.unwrap();

    assert!(updated.is_none());
    assert!(!deleted);
    assert!(sut.find_by_id(missing).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "PostgreSQL（DATABASE_URL）が必要"]
async fn test_find_allと削除(pool: PgPool) {
    let (patient, doctor) = setup_patient_and_doctor(&pool).await;
    let sut = PostgresAppointmentRepository::new(pool);
    let first = sut
        .insert(&appointment_details(&patient, &doctor, "2025-03-01 09:30:00", "Checkup"))
        .await
        .unwrap();
    let second = sut
        .insert(&appointment_details(&patient, &doctor, "2025-03-01 10:30:00", "Checkup"))
        .await
        .unwrap();

    assert_eq!(sut.find_all().await.unwrap(), vec![first.clone(), second.clone()]);

    assert!(sut.delete(first.id()).await.unwrap());
    assert_eq!(sut.find_all().await.unwrap(), vec![second]);
}
