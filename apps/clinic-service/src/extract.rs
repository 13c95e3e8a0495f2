//! # リクエストボディの抽出
//!
//! JSON ボディを読み取るエクストラクタ。
//!
//! | リクエスト | 扱い |
//! |-----------|------|
//! | JSON の Content-Type かつボディあり | JSON として解釈（失敗は 400 "Invalid JSON body"） |
//! | ボディが空 | `{}` として解釈 |
//! | Content-Type が JSON 以外・なし | ボディを読まず `{}` として解釈 |
//!
//! `{}` はすべてのフィールドが欠落した入力になり、検証で
//! "All fields are required" が返る。

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use crate::error::CoreError;

const EMPTY_OBJECT: &[u8] = b"{}";

/// JSON ボディ
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            let Json(value) = Json::<T>::from_bytes(EMPTY_OBJECT)?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(JsonRejection::from)?;
        let body: &[u8] = if bytes.is_empty() { EMPTY_OBJECT } else { &bytes };
        let Json(value) = Json::<T>::from_bytes(body)?;

        Ok(Self(value))
    }
}

/// `application/json` と `application/*+json` を JSON として扱う
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
