//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、存在確認やエラー分類はユースケースに委譲
//! - 成功レスポンスはエンティティをそのまま JSON にする（エンベロープなし）

pub mod appointment;
pub mod doctor;
pub mod health;
pub mod patient;
pub mod root;

pub use appointment::{
    AppointmentState,
    create_appointment,
    delete_appointment,
    get_appointment,
    list_appointments,
    update_appointment,
};
pub use doctor::{DoctorState, create_doctor};
pub use health::{ReadinessState, health_check, readiness_check};
pub use patient::{
    PatientState,
    create_patient,
    delete_patient,
    get_patient,
    list_patients,
    update_patient,
};
pub use root::{fallback, root};
