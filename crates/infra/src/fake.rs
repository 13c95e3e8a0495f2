//! # テスト用フェイクリポジトリ
//!
//! ハンドラ・ユースケースのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! clinic-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じ制約を再現する:
//!
//! - 採番は 1 から始まる連番
//! - 患者・医師の `email` / `phone` の一意制約
//! - 予約の `(doctor_id, appointment_date)` の一意制約
//!
//! `failing()` で作成したインスタンスは、すべての操作でデータベースエラーを返す。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, AtomicI64, Ordering},
};

use async_trait::async_trait;
use clinic_domain::{
    appointment::{Appointment, AppointmentDetails, AppointmentId},
    doctor::{Doctor, DoctorDetails, DoctorId},
    patient::{Patient, PatientDetails, PatientId},
};

use crate::{
    db::DatabaseHealth,
    error::InfraError,
    repository::{AppointmentRepository, DoctorRepository, PatientRepository},
};

/// 連番の採番と障害注入を共通化する
#[derive(Debug, Clone, Default)]
struct FakeTable {
    last_id: Arc<AtomicI64>,
    failing: Arc<AtomicBool>,
}

impl FakeTable {
    fn next_id(&self) -> i64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn observe_id(&self, id: i64) {
        self.last_id.fetch_max(id, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

// ===== FakePatientRepository =====

#[derive(Debug, Clone, Default)]
pub struct FakePatientRepository {
    table:    FakeTable,
    patients: Arc<Mutex<Vec<Patient>>>,
}

impl FakePatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての操作でデータベースエラーを返すインスタンスを作成する
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.table.failing.store(true, Ordering::SeqCst);
        repo
    }

    /// テストデータを直接追加する
    pub fn add_patient(&self, patient: Patient) {
        self.table.observe_id(patient.id().as_i64());
        self.patients.lock().unwrap().push(patient);
    }

    /// 保存されている件数
    pub fn count(&self) -> usize {
        self.patients.lock().unwrap().len()
    }

    fn conflicts(patients: &[Patient], details: &PatientDetails, except: Option<PatientId>) -> bool {
        patients.iter().any(|p| {
            Some(p.id()) != except
                && (p.details().email() == details.email()
                    || p.details().phone() == details.phone())
        })
    }
}

#[async_trait]
impl PatientRepository for FakePatientRepository {
    async fn insert(&self, details: &PatientDetails) -> Result<Patient, InfraError> {
        self.table.check()?;
        let mut patients = self.patients.lock().unwrap();
        if Self::conflicts(&patients, details, None) {
            return Err(InfraError::unique_violation(Some("patients_email_key")));
        }
        let patient = Patient::new(PatientId::from_i64(self.table.next_id()), details.clone());
        patients.push(patient.clone());
        Ok(patient)
    }

    async fn find_all(&self) -> Result<Vec<Patient>, InfraError> {
        self.table.check()?;
        Ok(self.patients.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, InfraError> {
        self.table.check()?;
        Ok(self
            .patients
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn update(
        &self,
        id: PatientId,
        details: &PatientDetails,
    ) -> Result<Option<Patient>, InfraError> {
        self.table.check()?;
        let mut patients = self.patients.lock().unwrap();
        let Some(pos) = patients.iter().position(|p| p.id() == id) else {
            return Ok(None);
        };
        if Self::conflicts(&patients, details, Some(id)) {
            return Err(InfraError::unique_violation(Some("patients_email_key")));
        }
        patients[pos] = Patient::new(id, details.clone());
        Ok(Some(patients[pos].clone()))
    }

    async fn delete(&self, id: PatientId) -> Result<bool, InfraError> {
        self.table.check()?;
        let mut patients = self.patients.lock().unwrap();
        let before = patients.len();
        patients.retain(|p| p.id() != id);
        Ok(patients.len() < before)
    }

    async fn exists(&self, id: PatientId) -> Result<bool, InfraError> {
        self.table.check()?;
        Ok(self.patients.lock().unwrap().iter().any(|p| p.id() == id))
    }
}

// ===== FakeDoctorRepository =====

#[derive(Debug, Clone, Default)]
pub struct FakeDoctorRepository {
    table:   FakeTable,
    doctors: Arc<Mutex<Vec<Doctor>>>,
}

impl FakeDoctorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての操作でデータベースエラーを返すインスタンスを作成する
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.table.failing.store(true, Ordering::SeqCst);
        repo
    }

    /// テストデータを直接追加する
    pub fn add_doctor(&self, doctor: Doctor) {
        self.table.observe_id(doctor.id().as_i64());
        self.doctors.lock().unwrap().push(doctor);
    }

    /// 保存されている件数
    pub fn count(&self) -> usize {
        self.doctors.lock().unwrap().len()
    }
}

#[async_trait]
impl DoctorRepository for FakeDoctorRepository {
    async fn insert(&self, details: &DoctorDetails) -> Result<Doctor, InfraError> {
        self.table.check()?;
        let mut doctors = self.doctors.lock().unwrap();
        let duplicated = doctors.iter().any(|d| {
            d.details().email() == details.email() || d.details().phone() == details.phone()
        });
        if duplicated {
            return Err(InfraError::unique_violation(Some("doctors_email_key")));
        }
        let doctor = Doctor::new(DoctorId::from_i64(self.table.next_id()), details.clone());
        doctors.push(doctor.clone());
        Ok(doctor)
    }

    async fn exists(&self, id: DoctorId) -> Result<bool, InfraError> {
        self.table.check()?;
        Ok(self.doctors.lock().unwrap().iter().any(|d| d.id() == id))
    }
}

// ===== FakeAppointmentRepository =====

#[derive(Debug, Clone, Default)]
pub struct FakeAppointmentRepository {
    table:        FakeTable,
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl FakeAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての操作でデータベースエラーを返すインスタンスを作成する
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.table.failing.store(true, Ordering::SeqCst);
        repo
    }

    /// テストデータを直接追加する
    pub fn add_appointment(&self, appointment: Appointment) {
        self.table.observe_id(appointment.id().as_i64());
        self.appointments.lock().unwrap().push(appointment);
    }

    /// 保存されている件数
    pub fn count(&self) -> usize {
        self.appointments.lock().unwrap().len()
    }

    fn conflicts(
        appointments: &[Appointment],
        details: &AppointmentDetails,
        except: Option<AppointmentId>,
    ) -> bool {
        appointments.iter().any(|a| {
            Some(a.id()) != except
                && a.details().doctor_id() == details.doctor_id()
                && a.details().appointment_date() == details.appointment_date()
        })
    }
}

#[async_trait]
impl AppointmentRepository for FakeAppointmentRepository {
    async fn insert(&self, details: &AppointmentDetails) -> Result<Appointment, InfraError> {
        self.table.check()?;
        let mut appointments = self.appointments.lock().unwrap();
        if Self::conflicts(&appointments, details, None) {
            return Err(InfraError::unique_violation(Some(
                "appointments_doctor_id_appointment_date_key",
            )));
        }
        let appointment = Appointment::new(
            AppointmentId::from_i64(self.table.next_id()),
            details.clone(),
            Appointment::DEFAULT_STATUS,
        );
        appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_all(&self) -> Result<Vec<Appointment>, InfraError> {
        self.table.check()?;
        Ok(self.appointments.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, InfraError> {
        self.table.check()?;
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }

    async fn update(
        &self,
        id: AppointmentId,
        details: &AppointmentDetails,
    ) -> Result<Option<Appointment>, InfraError> {
        self.table.check()?;
        let mut appointments = self.appointments.lock().unwrap();
        let Some(pos) = appointments.iter().position(|a| a.id() == id) else {
            return Ok(None);
        };
        if Self::conflicts(&appointments, details, Some(id)) {
            return Err(InfraError::unique_violation(Some(
                "appointments_doctor_id_appointment_date_key",
            )));
        }
        let updated = appointments[pos].clone().with_details(details.clone());
        appointments[pos] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: AppointmentId) -> Result<bool, InfraError> {
        self.table.check()?;
        let mut appointments = self.appointments.lock().unwrap();
        let before = appointments.len();
        appointments.retain(|a| a.id() != id);
        Ok(appointments.len() < before)
    }
}

// ===== FakeDatabaseHealth =====

/// 疎通結果を固定で返す Readiness Check 用フェイク
#[derive(Debug, Clone, Copy)]
pub struct FakeDatabaseHealth {
    healthy: bool,
}

impl FakeDatabaseHealth {
    pub fn healthy() -> Self {
        Self { healthy: true }
    }

    pub fn unreachable() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl DatabaseHealth for FakeDatabaseHealth {
    async fn ping(&self) -> Result<(), InfraError> {
        if self.healthy {
            Ok(())
        } else {
            Err(sqlx::Error::PoolTimedOut.into())
        }
    }
}
