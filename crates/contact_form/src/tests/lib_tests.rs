use super::*;
use crate::{
    test_support::{closed_endpoint, spawn_endpoint},
    transport::DEFAULT_REQUEST_TIMEOUT,
    validation::{EMAIL_INVALID, MESSAGE_REQUIRED, NAME_REQUIRED},
};
use async_trait::async_trait;
use axum::http::StatusCode;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::{Mutex, Notify};

struct TestTransport {
    calls: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<FormFields>>>,
    fail_with: Option<u16>,
    gate: Option<Arc<Gate>>,
}

#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
}

impl TestTransport {
    fn ok() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            gate: None,
        }
    }

    fn rejecting(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::ok()
        }
    }

    fn gated(gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::ok()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionTransport for TestTransport {
    async fn submit(&self, fields: &FormFields) -> Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().await.push(fields.clone());

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        match self.fail_with {
            Some(status) => Err(SubmissionError::Rejected { status }),
            None => Ok(()),
        }
    }
}

async fn filled_form<T: SubmissionTransport>(transport: T) -> ContactFormController<T> {
    let form = ContactFormController::new(transport);
    form.update_field(Field::Name, "Ada").await;
    form.update_field(Field::Email, "ada@x.co").await;
    form.update_field(Field::Message, "Hi").await;
    form
}

#[tokio::test]
async fn starts_idle_and_empty() {
    let form = ContactFormController::new(TestTransport::ok());
    let snapshot = form.snapshot().await;
    assert_eq!(snapshot, FormSnapshot::default());
    assert!(!form.is_submitting().await);
}

#[tokio::test]
async fn valid_submit_sends_once_and_clears_fields() {
    let form = filled_form(TestTransport::ok()).await;
    assert!(form.validate().await.is_empty());

    assert_eq!(form.submit().await, SubmitOutcome::Sent);

    assert_eq!(form.status().await, SubmissionStatus::Success);
    assert_eq!(form.fields().await, FormFields::default());
    assert_eq!(form.transport().calls(), 1);
    assert_eq!(
        form.transport().received.lock().await.as_slice(),
        &[FormFields::new("Ada", "ada@x.co", "Hi")]
    );
}

#[tokio::test]
async fn invalid_submit_never_reaches_transport() {
    let form = ContactFormController::new(TestTransport::ok());
    form.update_field(Field::Email, "bad").await;

    let SubmitOutcome::Invalid(errors) = form.submit().await else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.get(Field::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
    assert_eq!(errors.get(Field::Message), Some(MESSAGE_REQUIRED));
    assert_eq!(form.errors().await, errors);
    assert_eq!(form.status().await, SubmissionStatus::Idle);
    assert_eq!(form.transport().calls(), 0);
}

#[tokio::test]
async fn editing_a_field_clears_only_its_error() {
    let form = ContactFormController::new(TestTransport::ok());
    form.validate().await;

    form.update_field(Field::Name, "A").await;

    let errors = form.errors().await;
    assert!(!errors.contains(Field::Name));
    assert!(errors.contains(Field::Email));
    assert!(errors.contains(Field::Message));
}

#[tokio::test]
async fn failed_submit_keeps_fields() {
    let form = filled_form(TestTransport::rejecting(500)).await;

    assert_eq!(form.submit().await, SubmitOutcome::Failed);

    assert_eq!(form.status().await, SubmissionStatus::Error);
    assert_eq!(form.fields().await, FormFields::new("Ada", "ada@x.co", "Hi"));
}

#[tokio::test]
async fn reset_returns_to_idle_without_clearing_fields() {
    let form = filled_form(TestTransport::rejecting(503)).await;
    form.submit().await;

    form.reset().await;

    assert_eq!(form.status().await, SubmissionStatus::Idle);
    assert_eq!(form.fields().await.name, "Ada");
}

#[tokio::test]
async fn retry_after_error_submits_again() {
    let form = filled_form(TestTransport::rejecting(500)).await;
    assert_eq!(form.submit().await, SubmitOutcome::Failed);
    form.reset().await;
    assert_eq!(form.submit().await, SubmitOutcome::Failed);
    assert_eq!(form.transport().calls(), 2);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_a_no_op() {
    let gate = Arc::new(Gate::default());
    let form = Arc::new(filled_form(TestTransport::gated(gate.clone())).await);

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    gate.entered.notified().await;

    assert!(form.is_submitting().await);
    assert_eq!(form.submit().await, SubmitOutcome::AlreadySubmitting);
    form.reset().await;
    assert_eq!(form.status().await, SubmissionStatus::Submitting);

    gate.release.notify_one();
    assert_eq!(first.await.expect("join"), SubmitOutcome::Sent);
    assert_eq!(form.transport().calls(), 1);
    assert_eq!(form.status().await, SubmissionStatus::Success);
}

#[tokio::test]
async fn dropped_submit_settles_as_error_and_allows_retry() {
    let gate = Arc::new(Gate::default());
    let form = filled_form(TestTransport::gated(gate.clone())).await;

    let cancelled = tokio::time::timeout(Duration::from_millis(50), form.submit()).await;
    assert!(cancelled.is_err(), "gated submit should still be pending");

    assert_eq!(form.status().await, SubmissionStatus::Error);
    assert_eq!(form.fields().await, FormFields::new("Ada", "ada@x.co", "Hi"));

    form.reset().await;
    assert_eq!(form.status().await, SubmissionStatus::Idle);

    gate.release.notify_one();
    assert_eq!(form.submit().await, SubmitOutcome::Sent);
    assert_eq!(form.transport().calls(), 2);
}

#[tokio::test]
async fn fields_stay_editable_while_submitting() {
    let gate = Arc::new(Gate::default());
    let form = Arc::new(filled_form(TestTransport::gated(gate.clone())).await);

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    gate.entered.notified().await;

    tokio::time::timeout(
        Duration::from_secs(1),
        form.update_field(Field::Message, "Hi again"),
    )
    .await
    .expect("state lock is free during the transport call");

    gate.release.notify_one();
    first.await.expect("join");
}

#[tokio::test]
async fn update_field_by_name_rejects_unknown_field() {
    let form = ContactFormController::new(TestTransport::ok());
    form.update_field_by_name("email", "ada@x.co")
        .await
        .expect("known field");
    assert_eq!(form.fields().await.email, "ada@x.co");

    let err = form
        .update_field_by_name("phone", "123")
        .await
        .expect_err("unknown field");
    assert_eq!(err, FieldParseError::UnknownField("phone".to_string()));
}

#[tokio::test]
async fn broadcasts_status_transitions() {
    let form = filled_form(TestTransport::ok()).await;
    let mut events = form.subscribe();

    form.submit().await;

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(
        seen,
        vec![
            FormEvent::ErrorsChanged(ValidationErrors::default()),
            FormEvent::StatusChanged(SubmissionStatus::Submitting),
            FormEvent::FieldsCleared,
            FormEvent::StatusChanged(SubmissionStatus::Success),
        ]
    );
}

#[tokio::test]
async fn submits_to_http_endpoint() {
    let (endpoint, mut received) = spawn_endpoint(StatusCode::OK).await;
    let transport = FormPostTransport::new(endpoint, FormKeys::default(), DEFAULT_REQUEST_TIMEOUT)
        .expect("client");
    let form = filled_form(transport).await;

    assert_eq!(form.submit().await, SubmitOutcome::Sent);

    let body = received.recv().await.expect("form body");
    assert_eq!(body["email"], "ada@x.co");
    assert!(form.fields().await.is_empty());
}

#[tokio::test]
async fn network_failure_maps_to_error_status() {
    let transport = FormPostTransport::new(
        closed_endpoint().await,
        FormKeys::default(),
        DEFAULT_REQUEST_TIMEOUT,
    )
    .expect("client");
    let form = filled_form(transport).await;

    assert_eq!(form.submit().await, SubmitOutcome::Failed);
    assert_eq!(form.status().await, SubmissionStatus::Error);
    assert_eq!(form.fields().await.message, "Hi");
}
