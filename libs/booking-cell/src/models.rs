use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One screen of the multi-step booking flow, each gated by its own
/// validation predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    ClinicSelection,
    TimeAndDentistSelection,
    ServiceDetails,
    PatientInfo,
    Confirmation,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Routine,
    Soon,
    Urgent,
}

/// Contact details collected from callers booking without an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Transient wizard state. Reset to defaults after a successful submission;
/// preserved on failure so the caller can correct and resubmit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub clinic_id: Option<String>,
    pub dentist_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub slot_start: Option<NaiveTime>,
    pub slot_end: Option<NaiveTime>,
    pub service_key: Option<String>,
    pub reason: Option<String>,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub urgency: Urgency,
    pub patient: Option<PatientContact>,
}

/// Static catalog entry mapping a human-facing service key to the numeric
/// backend service identifier. The duration drives slot-window sizing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ServiceType {
    pub key: &'static str,
    pub display_name: &'static str,
    pub service_id: i32,
    pub duration_minutes: i64,
}

/// The fully composed appointment submission. Kept as options so the
/// pre-flight completeness check can enumerate exactly which required
/// fields are absent instead of failing generically.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentPayload {
    pub patient_id: Option<String>,
    pub dentist_id: Option<String>,
    pub clinic_id: Option<String>,
    pub created_by: Option<String>,
    pub service_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: Option<String>,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub urgency: Urgency,
}

impl AppointmentPayload {
    /// Names of required fields that are missing or blank. Symptoms, notes
    /// and urgency are optional and never reported.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();

        let mut check = |name: &str, present: bool| {
            if !present {
                missing.push(name.to_string());
            }
        };

        check("patient_id", is_present(&self.patient_id));
        check("dentist_id", is_present(&self.dentist_id));
        check("clinic_id", is_present(&self.clinic_id));
        check("created_by", is_present(&self.created_by));
        check("service_id", self.service_id.is_some());
        check("date", self.date.is_some());
        check("start_time", self.start_time.is_some());
        check("end_time", self.end_time.is_some());
        check("reason", is_present(&self.reason));

        missing
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Appointment as confirmed by the clinic backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    pub dentist_id: String,
    pub clinic_id: String,
    pub service_id: i32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
}
