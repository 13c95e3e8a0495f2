//! # 患者
//!
//! クリニックに登録された患者を表現する。
//!
//! ## ライフサイクル
//!
//! 作成 → 参照・一覧 → 上書き更新 → ID 指定で削除。
//! 他のエンティティを所有しない。
//!
//! ## 一意性
//!
//! `email` と `phone` はストアの一意制約で保護される。
//! アプリケーション側で事前の重複チェックは行わない。

use crate::{DomainError, value_objects::required_text};

define_serial_id! {
    /// 患者 ID（ストア採番）
    pub struct PatientId;
}

/// 患者の生入力
///
/// リクエストボディから取り出したままの値。未検証。
#[derive(Debug, Clone, Default)]
pub struct PatientFields {
    pub first_name:    Option<String>,
    pub last_name:     Option<String>,
    pub email:         Option<String>,
    pub phone:         Option<String>,
    pub date_of_birth: Option<String>,
}

/// 検証済みの患者属性
///
/// 5 フィールドすべてが入力済みであることを保証する。
/// 作成と更新の両方で使用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDetails {
    first_name:    String,
    last_name:     String,
    email:         String,
    phone:         String,
    date_of_birth: String,
}

impl PatientDetails {
    /// 生入力を検証する
    ///
    /// # エラー
    ///
    /// いずれかのフィールドが未入力の場合は `DomainError::Validation`。
    pub fn new(fields: PatientFields) -> Result<Self, DomainError> {
        Ok(Self {
            first_name:    required_text(fields.first_name)?,
            last_name:     required_text(fields.last_name)?,
            email:         required_text(fields.email)?,
            phone:         required_text(fields.phone)?,
            date_of_birth: required_text(fields.date_of_birth)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }
}

/// 患者エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id:      PatientId,
    details: PatientDetails,
}

impl Patient {
    /// 採番済み ID と属性から患者を組み立てる
    pub fn new(id: PatientId, details: PatientDetails) -> Self {
        Self { id, details }
    }

    /// ストアの行から患者を復元する
    ///
    /// ストアに保存済みの値は検証済みとみなす。
    pub fn from_db(
        id: PatientId,
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        date_of_birth: String,
    ) -> Self {
        Self {
            id,
            details: PatientDetails {
                first_name,
                last_name,
                email,
                phone,
                date_of_birth,
            },
        }
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn details(&self) -> &PatientDetails {
        &self.details
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::value_objects::missing_fields;

    fn valid_fields() -> PatientFields {
        PatientFields {
            first_name:    Some("A".to_string()),
            last_name:     Some("B".to_string()),
            email:         Some("a@b.com".to_string()),
            phone:         Some("123".to_string()),
            date_of_birth: Some("2000-01-01".to_string()),
        }
    }

    #[test]
    fn test_全フィールド入力済みなら検証に成功する() {
        let details = PatientDetails::new(valid_fields()).unwrap();

        assert_eq!(details.first_name(), "A");
        assert_eq!(details.last_name(), "B");
        assert_eq!(details.email(), "a@b.com");
        assert_eq!(details.phone(), "123");
        assert_eq!(details.date_of_birth(), "2000-01-01");
    }

    #[rstest]
    #[case::first_name(|f: &mut PatientFields| f.first_name = None)]
    #[case::last_name(|f: &mut PatientFields| f.last_name = None)]
    #[case::email(|f: &mut PatientFields| f.email = Some(String::new()))]
    #[case::phone(|f: &mut PatientFields| f.phone = None)]
    #[case::date_of_birth(|f: &mut PatientFields| f.date_of_birth = Some(String::new()))]
    fn test_いずれかのフィールドが未入力なら検証に失敗する(
        #[case] clear: fn(&mut PatientFields),
    ) {
        let mut fields = valid_fields();
        clear(&mut fields);

        assert_eq!(PatientDetails::new(fields), Err(missing_fields()));
    }

    #[test]
    fn test_書式は検証しない() {
        let fields = PatientFields {
            email: Some("not-an-email".to_string()),
            date_of_birth: Some("someday".to_string()),
            ..valid_fields()
        };

        assert!(PatientDetails::new(fields).is_ok());
    }

    #[test]
    fn test_from_dbで復元した患者の属性() {
        let patient = Patient::from_db(
            PatientId::from_i64(3),
            "A".to_string(),
            "B".to_string(),
            "a@b.com".to_string(),
            "123".to_string(),
            "2000-01-01".to_string(),
        );

        assert_eq!(patient.id(), PatientId::from_i64(3));
        assert_eq!(patient.details(), &PatientDetails::new(valid_fields()).unwrap());
    }
}
