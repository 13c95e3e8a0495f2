//! # 医師
//!
//! 予約の担当となる医師を表現する。
//! 現時点では作成と、予約時の存在確認のみを行う。

use crate::{DomainError, value_objects::required_text};

define_serial_id! {
    /// 医師 ID（ストア採番）
    pub struct DoctorId;
}

/// 医師の生入力
#[derive(Debug, Clone, Default)]
pub struct DoctorFields {
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
    pub specialty:  Option<String>,
    pub email:      Option<String>,
    pub phone:      Option<String>,
}

/// 検証済みの医師属性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDetails {
    first_name: String,
    last_name:  String,
    specialty:  String,
    email:      String,
    phone:      String,
}

impl DoctorDetails {
    /// 生入力を検証する
    ///
    /// いずれかのフィールドが未入力の場合は `DomainError::Validation`。
    pub fn new(fields: DoctorFields) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: required_text(fields.first_name)?,
            last_name:  required_text(fields.last_name)?,
            specialty:  required_text(fields.specialty)?,
            email:      required_text(fields.email)?,
            phone:      required_text(fields.phone)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// 医師エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    id:      DoctorId,
    details: DoctorDetails,
}

impl Doctor {
    pub fn new(id: DoctorId, details: DoctorDetails) -> Self {
        Self { id, details }
    }

    pub fn id(&self) -> DoctorId {
        self.id
    }

    pub fn details(&self) -> &DoctorDetails {
        &self.details
    }
}
