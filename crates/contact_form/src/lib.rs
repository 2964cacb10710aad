use serde::Serialize;
use shared::{
    error::FieldParseError,
    form::{Field, FormFields},
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{error, info, warn};

pub mod transport;
pub mod validation;

pub use transport::{FormKeys, FormPostTransport, SubmissionError, SubmissionTransport};
pub use validation::{validate_fields, ValidationErrors};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(ValidationErrors),
    AlreadySubmitting,
    Sent,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    StatusChanged(SubmissionStatus),
    ErrorsChanged(ValidationErrors),
    FieldsCleared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub fields: FormFields,
    pub errors: ValidationErrors,
    pub status: SubmissionStatus,
}

#[derive(Default)]
struct FormState {
    fields: FormFields,
    errors: ValidationErrors,
    status: SubmissionStatus,
}

/// The state lock is never held across the transport call.
pub struct ContactFormController<T: SubmissionTransport> {
    transport: T,
    inner: Mutex<FormState>,
    events: broadcast::Sender<FormEvent>,
}

impl<T: SubmissionTransport> ContactFormController<T> {
    pub fn new(transport: T) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transport,
            inner: Mutex::new(FormState::default()),
            events,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub async fn update_field(&self, field: Field, value: impl Into<String>) {
        let mut state = self.state();
        state.fields.set(field, value);
        if state.errors.clear_field(field) {
            self.emit(FormEvent::ErrorsChanged(state.errors.clone()));
        }
    }

    pub async fn update_field_by_name(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FieldParseError> {
        let field = name.parse::<Field>()?;
        self.update_field(field, value).await;
        Ok(())
    }

    pub async fn validate(&self) -> ValidationErrors {
        let mut state = self.state();
        let errors = validate_fields(&state.fields);
        state.errors = errors.clone();
        self.emit(FormEvent::ErrorsChanged(errors.clone()));
        errors
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let fields = {
            let mut state = self.state();
            if state.status == SubmissionStatus::Submitting {
                warn!("contact: submit ignored, a submission is already in flight");
                return SubmitOutcome::AlreadySubmitting;
            }

            let errors = validate_fields(&state.fields);
            state.errors = errors.clone();
            self.emit(FormEvent::ErrorsChanged(errors.clone()));
            if !errors.is_empty() {
                info!(
                    invalid_fields = errors.len(),
                    "contact: submit blocked by validation"
                );
                return SubmitOutcome::Invalid(errors);
            }

            self.set_status(&mut state, SubmissionStatus::Submitting);
            state.fields.clone()
        };

        let mut in_flight = InFlight {
            form: self,
            settled: false,
        };
        let result = self.transport.submit(&fields).await;

        let mut state = self.state();
        in_flight.settled = true;
        match result {
            Ok(()) => {
                state.fields.clear();
                state.errors.clear();
                self.emit(FormEvent::FieldsCleared);
                self.set_status(&mut state, SubmissionStatus::Success);
                info!("contact: message sent");
                SubmitOutcome::Sent
            }
            Err(err) => {
                error!("contact: form submission failed: {err}");
                self.set_status(&mut state, SubmissionStatus::Error);
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn reset(&self) {
        let mut state = self.state();
        if state.status == SubmissionStatus::Submitting {
            warn!("contact: reset ignored while a submission is in flight");
            return;
        }
        self.set_status(&mut state, SubmissionStatus::Idle);
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.state().status
    }

    pub async fn is_submitting(&self) -> bool {
        self.status().await == SubmissionStatus::Submitting
    }

    pub async fn fields(&self) -> FormFields {
        self.state().fields.clone()
    }

    pub async fn errors(&self) -> ValidationErrors {
        self.state().errors.clone()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.state();
        FormSnapshot {
            fields: state.fields.clone(),
            errors: state.errors.clone(),
            status: state.status,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status(&self, state: &mut FormState, status: SubmissionStatus) {
        if state.status != status {
            state.status = status;
            self.emit(FormEvent::StatusChanged(status));
        }
    }

    fn emit(&self, event: FormEvent) {
        // Send only fails when nobody is subscribed.
        let _ = self.events.send(event);
    }
}

/// Marks an abandoned submission as failed when the `submit` future is dropped mid-flight.
struct InFlight<'a, T: SubmissionTransport> {
    form: &'a ContactFormController<T>,
    settled: bool,
}

impl<T: SubmissionTransport> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.form.state();
        if state.status == SubmissionStatus::Submitting {
            warn!("contact: submission dropped before the endpoint answered");
            self.form.set_status(&mut state, SubmissionStatus::Error);
        }
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
