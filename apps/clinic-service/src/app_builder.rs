//! # アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//! テストはフェイクリポジトリを渡して同じルーターを組み立てる。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use clinic_infra::{
    db::DatabaseHealth,
    repository::{AppointmentRepository, DoctorRepository, PatientRepository},
};
use clinic_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        AppointmentState,
        DoctorState,
        PatientState,
        ReadinessState,
        create_appointment,
        create_doctor,
        create_patient,
        delete_appointment,
        delete_patient,
        fallback,
        get_appointment,
        get_patient,
        health_check,
        list_appointments,
        list_patients,
        readiness_check,
        root,
        update_appointment,
        update_patient,
    },
    usecase::{AppointmentUseCaseImpl, DoctorUseCaseImpl, PatientUseCaseImpl},
};

/// ルーターが必要とする外部依存
#[derive(Clone)]
pub struct AppDependencies {
    pub patient_repository:     Arc<dyn PatientRepository>,
    pub doctor_repository:      Arc<dyn DoctorRepository>,
    pub appointment_repository: Arc<dyn AppointmentRepository>,
    pub database_health:        Arc<dyn DatabaseHealth>,
}

/// DI コンテナの構築とルーター定義を行う
///
/// リポジトリ → ユースケース → State → Router の順に組み立てる。
pub fn build_app(deps: AppDependencies) -> Router {
    let patient_state = Arc::new(PatientState {
        usecase: PatientUseCaseImpl::new(deps.patient_repository.clone()),
    });
    let doctor_state = Arc::new(DoctorState {
        usecase: DoctorUseCaseImpl::new(deps.doctor_repository.clone()),
    });
    let appointment_state = Arc::new(AppointmentState {
        usecase: AppointmentUseCaseImpl::new(
            deps.appointment_repository,
            deps.patient_repository,
            deps.doctor_repository,
        ),
    });
    let readiness_state = Arc::new(ReadinessState {
        database: deps.database_health,
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/patients", get(list_patients).post(create_patient))
                .route(
                    "/patients/{id}",
                    get(get_patient).put(update_patient).delete(delete_patient),
                )
                .with_state(patient_state),
        )
        .merge(
            Router::new()
                .route("/doctors", post(create_doctor))
                .with_state(doctor_state),
        )
        .merge(
            Router::new()
                .route(
                    "/appointments",
                    get(list_appointments).post(create_appointment),
                )
                .route(
                    "/appointments/{id}",
                    get(get_appointment)
                        .put(update_appointment)
                        .delete(delete_appointment),
                )
                .with_state(appointment_state),
        )
        .fallback(fallback)
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使用）
        // 2. TraceLayer: request_id を含むスパンを張り、ハンドラ内のログに継承させる
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
