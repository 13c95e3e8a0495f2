//! # 予約
//!
//! 患者と医師を結び付ける予約を表現する。
//!
//! ## 不変条件
//!
//! - 作成・更新の時点で、参照先の患者と医師がストアに存在する
//!   （ユースケース層で書き込み前に存在確認する。トランザクションでは保護しない）
//! - `status` は作成時に [`Appointment::DEFAULT_STATUS`] で初期化され、
//!   どの操作でも変更されない
//! - 同一医師・同一日時の予約はストアの一意制約で拒否される

use crate::{
    DomainError,
    doctor::DoctorId,
    patient::PatientId,
    value_objects::{RawId, Reference, required_reference, required_text},
};

define_serial_id! {
    /// 予約 ID（ストア採番）
    pub struct AppointmentId;
}

/// 予約の生入力
#[derive(Debug, Clone, Default)]
pub struct AppointmentFields {
    pub patient_id:       Option<RawId>,
    pub doctor_id:        Option<RawId>,
    pub appointment_date: Option<String>,
    pub reason:           Option<String>,
}

/// 必須項目の検証を通過した予約入力
///
/// 参照 ID は入力済みだが、参照先の存在は未確認。
/// [`AppointmentDraft::into_details`] で確認済みの ID に置き換える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    patient_id:       Reference<PatientId>,
    doctor_id:        Reference<DoctorId>,
    appointment_date: String,
    reason:           String,
}

impl AppointmentDraft {
    /// 生入力を検証する
    ///
    /// いずれかのフィールドが未入力の場合は `DomainError::Validation`。
    pub fn new(fields: AppointmentFields) -> Result<Self, DomainError> {
        Ok(Self {
            patient_id:       required_reference(fields.patient_id)?.map(PatientId::from_i64),
            doctor_id:        required_reference(fields.doctor_id)?.map(DoctorId::from_i64),
            appointment_date: required_text(fields.appointment_date)?,
            reason:           required_text(fields.reason)?,
        })
    }

    pub fn patient_id(&self) -> Reference<PatientId> {
        self.patient_id
    }

    pub fn doctor_id(&self) -> Reference<DoctorId> {
        self.doctor_id
    }

    /// 存在を確認した参照 ID で予約属性を確定する
    pub fn into_details(self, patient_id: PatientId, doctor_id: DoctorId) -> AppointmentDetails {
        AppointmentDetails::new(patient_id, doctor_id, self.appointment_date, self.reason)
    }
}

/// 予約属性
///
/// 参照先の患者・医師の存在確認を経た値として扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetails {
    patient_id:       PatientId,
    doctor_id:        DoctorId,
    appointment_date: String,
    reason:           String,
}

impl AppointmentDetails {
    pub fn new(
        patient_id: PatientId,
        doctor_id: DoctorId,
        appointment_date: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            doctor_id,
            appointment_date: appointment_date.into(),
            reason: reason.into(),
        }
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    pub fn appointment_date(&self) -> &str {
        &self.appointment_date
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// 予約エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    id:      AppointmentId,
    details: AppointmentDetails,
    status:  String,
}

impl Appointment {
    /// 新規予約のステータス
    pub const DEFAULT_STATUS: &'static str = "Scheduled";

    /// ストアの行から予約を復元する
    pub fn from_db(
        id: AppointmentId,
        patient_id: PatientId,
        doctor_id: DoctorId,
        appointment_date: String,
        reason: String,
        status: String,
    ) -> Self {
        Self {
            id,
            details: AppointmentDetails::new(patient_id, doctor_id, appointment_date, reason),
            status,
        }
    }

    /// 採番済み ID と属性から予約を組み立てる
    pub fn new(id: AppointmentId, details: AppointmentDetails, status: impl Into<String>) -> Self {
        Self {
            id,
            details,
            status: status.into(),
        }
    }

    /// 属性を差し替えた予約を返す
    ///
    /// ステータスは引き継ぐ。
    pub fn with_details(self, details: AppointmentDetails) -> Self {
        Self { details, ..self }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn details(&self) -> &AppointmentDetails {
        &self.details
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}
