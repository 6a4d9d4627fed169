use crate::error::BookingError;
use crate::models::{BookingDraft, WizardStep};

/// Booking wizard state machine:
/// `ClinicSelection -> TimeAndDentistSelection -> ServiceDetails ->
/// PatientInfo (anonymous callers only) -> Confirmation -> Submitted`.
/// Advancing past a step is blocked until its predicate passes.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    pub draft: BookingDraft,
    pub step: WizardStep,
    authenticated: bool,
}

impl BookingWizard {
    pub fn new(draft: BookingDraft, authenticated: bool) -> Self {
        Self {
            draft,
            step: WizardStep::ClinicSelection,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Validate the current step and move to the next. `PatientInfo` is
    /// skipped entirely for authenticated callers.
    pub fn advance(&mut self) -> Result<WizardStep, BookingError> {
        self.validate_step(self.step)?;
        self.step = self.next_step(self.step);
        Ok(self.step)
    }

    /// Re-check every gating predicate in order. Run before submission so a
    /// draft assembled in one shot gets the same scrutiny as a stepped one.
    pub fn validate_all(&self) -> Result<(), BookingError> {
        let mut step = WizardStep::ClinicSelection;
        while step != WizardStep::Confirmation {
            self.validate_step(step)?;
            step = self.next_step(step);
        }
        Ok(())
    }

    pub fn validate_step(&self, step: WizardStep) -> Result<(), BookingError> {
        match step {
            WizardStep::ClinicSelection => {
                require("clinic selection", "a clinic must be chosen", present(&self.draft.clinic_id))
            }
            WizardStep::TimeAndDentistSelection => {
                require(
                    "time selection",
                    "dentist, date and slot must be chosen",
                    present(&self.draft.dentist_id)
                        && self.draft.date.is_some()
                        && self.draft.slot_start.is_some()
                        && self.draft.slot_end.is_some(),
                )?;
                require(
                    "time selection",
                    "slot must end after it starts",
                    self.draft.slot_start < self.draft.slot_end,
                )
            }
            WizardStep::ServiceDetails => require(
                "service details",
                "a service and a reason for the visit are required",
                present(&self.draft.service_key) && present(&self.draft.reason),
            ),
            WizardStep::PatientInfo => {
                if self.authenticated {
                    return Ok(());
                }
                let contact_ok = self.draft.patient.as_ref().is_some_and(|contact| {
                    !contact.first_name.trim().is_empty()
                        && !contact.last_name.trim().is_empty()
                        && !contact.email.trim().is_empty()
                });
                require(
                    "patient info",
                    "name and email are required to book without an account",
                    contact_ok,
                )
            }
            WizardStep::Confirmation | WizardStep::Submitted => Ok(()),
        }
    }

    fn next_step(&self, step: WizardStep) -> WizardStep {
        match step {
            WizardStep::ClinicSelection => WizardStep::TimeAndDentistSelection,
            WizardStep::TimeAndDentistSelection => WizardStep::ServiceDetails,
            WizardStep::ServiceDetails => {
                if self.authenticated {
                    WizardStep::Confirmation
                } else {
                    WizardStep::PatientInfo
                }
            }
            WizardStep::PatientInfo => WizardStep::Confirmation,
            WizardStep::Confirmation | WizardStep::Submitted => WizardStep::Submitted,
        }
    }

    /// Destroy the draft after a successful submission.
    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
        self.step = WizardStep::ClinicSelection;
    }
}

fn require(step: &'static str, message: &str, ok: bool) -> Result<(), BookingError> {
    if ok {
        Ok(())
    } else {
        Err(BookingError::StepValidation {
            step,
            message: message.to_string(),
        })
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
