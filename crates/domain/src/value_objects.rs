//! # 共通値オブジェクト
//!
//! 複数のエンティティで共有される入力値の判定を定義する。
//!
//! ## 必須フィールドの判定
//!
//! 次のいずれかに該当するフィールドは「未入力」とみなす:
//!
//! | 入力 | 判定 |
//! |------|------|
//! | キーなし / `null` | 未入力 |
//! | 空文字列 `""` | 未入力 |
//! | 数値の `0` / `false` | 未入力 |
//!
//! 型と書式（メールアドレス形式、日付形式など）は検証しない。
//! テキストフィールドに数値や真偽値が来た場合は文字列にして受け付ける。
//! 参照 ID に数値として解釈できない文字列が来た場合は、どの行にも
//! 一致しない参照（[`Reference::Unresolvable`]）として扱う。

use serde::Deserialize;

use crate::DomainError;

/// 必須フィールド欠落時のメッセージ
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// 必須フィールド欠落エラーを生成する
pub fn missing_fields() -> DomainError {
    DomainError::Validation(ALL_FIELDS_REQUIRED.to_string())
}

/// 必須のテキストフィールドを取り出す
///
/// `None` と空文字列は未入力として扱う。
pub fn required_text(value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing_fields()),
    }
}

/// テキストフィールドの入力値
///
/// JSON の文字列・数値・真偽値を受け付ける。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawText {
    /// 文字列に変換する
    ///
    /// `0` と `false` は未入力として `None`。
    pub fn into_text(self) -> Option<String> {
        match self {
            RawText::Text(s) => Some(s),
            RawText::Integer(0) | RawText::Bool(false) => None,
            RawText::Float(f) if f == 0.0 => None,
            RawText::Integer(n) => Some(n.to_string()),
            RawText::Float(f) => Some(f.to_string()),
            RawText::Bool(true) => Some("true".to_string()),
        }
    }
}

/// 他エンティティへの参照 ID の入力値
///
/// JSON の数値と文字列の両方を受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// 参照として解釈する
    ///
    /// 数値の `0` と空文字列は未入力として `None`。
    /// 文字列の `"0"` は入力済みで、`Id(0)` になる。
    pub fn reference(&self) -> Option<Reference<i64>> {
        match self {
            RawId::Number(0) => None,
            RawId::Number(n) => Some(Reference::Id(*n)),
            RawId::Text(s) if s.is_empty() => None,
            RawId::Text(s) => Some(
                s.trim()
                    .parse::<i64>()
                    .map_or(Reference::Unresolvable, Reference::Id),
            ),
        }
    }
}

/// 入力済みの参照 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<Id> {
    /// ストアの ID として問い合わせられる値
    Id(Id),
    /// 数値として解釈できず、どの行にも一致し得ない値
    Unresolvable,
}

impl<Id> Reference<Id> {
    pub fn map<U>(self, f: impl FnOnce(Id) -> U) -> Reference<U> {
        match self {
            Reference::Id(id) => Reference::Id(f(id)),
            Reference::Unresolvable => Reference::Unresolvable,
        }
    }
}

/// 必須の参照 ID フィールドを取り出す
pub fn required_reference(value: Option<RawId>) -> Result<Reference<i64>, DomainError> {
    value
        .as_ref()
        .and_then(RawId::reference)
        .ok_or_else(missing_fields)
}
