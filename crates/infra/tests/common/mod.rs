//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use clinic_domain::{
    appointment::AppointmentDetails,
    doctor::{Doctor, DoctorDetails, DoctorFields},
    patient::{Patient, PatientDetails, PatientFields},
};
use clinic_infra::repository::{
    DoctorRepository,
    PatientRepository,
    PostgresDoctorRepository,
    PostgresPatientRepository,
};
use sqlx::PgPool;

/// 患者属性を作成
pub fn patient_details(email: &str, phone: &str) -> PatientDetails {
    PatientDetails::new(PatientFields {
        first_name:    Some("A".to_string()),
        last_name:     Some("B".to_string()),
        email:         Some(email.to_string()),
        phone:         Some(phone.to_string()),
        date_of_birth: Some("2000-01-01".to_string()),
    })
    .unwrap()
}

/// 医師属性を作成
pub fn doctor_details(email: &str, phone: &str) -> DoctorDetails {
    DoctorDetails::new(DoctorFields {
        first_name: Some("Gregory".to_string()),
        last_name:  Some("House".to_string()),
        specialty:  Some("Diagnostics".to_string()),
        email:      Some(email.to_string()),
        phone:      Some(phone.to_string()),
    })
    .unwrap()
}

/// 予約属性を作成
pub fn appointment_details(
    patient: &Patient,
    doctor: &Doctor,
    date: &str,
    reason: &str,
) -> AppointmentDetails {
    AppointmentDetails::new(patient.id(), doctor.id(), date, reason)
}

/// 予約の参照先となる患者と医師を DB に作成
pub async fn setup_patient_and_doctor(pool: &PgPool) -> (Patient, Doctor) {
    let patient = PostgresPatientRepository::new(pool.clone())
        .insert(&patient_details("patient@example.com", "100"))
        .await
        .expect("患者作成に失敗");
    let doctor = PostgresDoctorRepository::new(pool.clone())
        .insert(&doctor_details("doctor@example.com", "200"))
        .await
        .expect("医師作成に失敗");
    (patient, doctor)
}

/// テーブルの行数を数える
pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("行数の取得に失敗")
}
