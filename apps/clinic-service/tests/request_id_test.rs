//! # Request ID レイヤーのテスト
//!
//! `build_app` のレイヤー構成（SetRequestIdLayer + TraceLayer +
//! PropagateRequestIdLayer）が正しく動作することを検証する。

use std::sync::Arc;

use axum::{Router, body::Body};
use clinic_infra::fake::{
    FakeAppointmentRepository,
    FakeDatabaseHealth,
    FakeDoctorRepository,
    FakePatientRepository,
};
use clinic_service::{AppDependencies, build_app};
use http::{Request, StatusCode};
use tower::ServiceExt;

fn test_app() -> Router {
    build_app(AppDependencies {
        patient_repository:     Arc::new(FakePatientRepository::new()),
        doctor_repository:      Arc::new(FakeDoctorRepository::new()),
        appointment_repository: Arc::new(FakeAppointmentRepository::new()),
        database_health:        Arc::new(FakeDatabaseHealth::healthy()),
    })
}

#[tokio::test]
async fn test_自動生成のx_request_idがuuid_v7形式である() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id ヘッダーが存在すること")
        .to_str()
        .unwrap();
    let uuid = uuid::Uuid::parse_str(request_id)
        .unwrap_or_else(|_| panic!("有効な UUID であること: {request_id}"));
    assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let app = test_app();
    let custom_id = "client-provided-request-id-123";

    let response = app
        .oneshot(
            Request::builder()
                .uri("/patients")
                .header("x-request-id", custom_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        custom_id,
        "クライアント提供の Request ID がそのまま返されること"
    );
}

#[tokio::test]
async fn test_エラーレスポンスにもx_request_idが付与される() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/patients/404")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
}
