use super::*;
use crate::ui::render::{ERROR_MESSAGE, SENDING_LABEL, SUCCESS_MESSAGE, SUCCESS_TITLE};
use async_trait::async_trait;
use contact_form::SubmissionError;
use shared::form::FormFields;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
    reject: bool,
}

#[async_trait]
impl SubmissionTransport for CountingTransport {
    async fn submit(&self, _fields: &FormFields) -> Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            Err(SubmissionError::Rejected { status: 500 })
        } else {
            Ok(())
        }
    }
}

fn input(name: &str, email: &str, message: &str) -> [(&'static str, String); 3] {
    [
        ("name", name.to_string()),
        ("email", email.to_string()),
        ("message", message.to_string()),
    ]
}

#[tokio::test]
async fn successful_submission_prints_thank_you() {
    let form = ContactFormController::new(CountingTransport::default());
    let (status, lines) = run_submission(&form, &input("Ada", "ada@x.co", "Hi"))
        .await
        .expect("known fields");

    assert_eq!(status, SubmissionStatus::Success);
    assert_eq!(
        lines,
        vec![
            SENDING_LABEL.to_string(),
            SUCCESS_TITLE.to_string(),
            SUCCESS_MESSAGE.to_string(),
        ]
    );
    assert_eq!(form.transport().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_input_prints_field_errors_without_sending() {
    let form = ContactFormController::new(CountingTransport::default());
    let (status, lines) = run_submission(&form, &input("Ada", "bad", ""))
        .await
        .expect("known fields");

    assert_eq!(status, SubmissionStatus::Idle);
    assert_eq!(
        lines,
        vec![
            "email: Please enter a valid email".to_string(),
            "message: Message is required".to_string(),
        ]
    );
    assert_eq!(form.transport().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_submission_prints_retry_hint() {
    let form = ContactFormController::new(CountingTransport {
        reject: true,
        ..CountingTransport::default()
    });
    let (status, lines) = run_submission(&form, &input("Ada", "ada@x.co", "Hi"))
        .await
        .expect("known fields");

    assert_eq!(status, SubmissionStatus::Error);
    assert_eq!(lines[0], SENDING_LABEL);
    assert_eq!(lines[2], ERROR_MESSAGE);
    assert_eq!(form.fields().await.name, "Ada");
}

#[tokio::test]
async fn unknown_field_name_fails_before_sending() {
    let form = ContactFormController::new(CountingTransport::default());
    let err = run_submission(&form, &[("phone", "555".to_string())])
        .await
        .expect_err("unknown field");

    assert!(err.to_string().contains("cannot fill contact field 'phone'"));
    assert_eq!(form.transport().calls.load(Ordering::SeqCst), 0);
    assert_eq!(form.status().await, SubmissionStatus::Idle);
}

#[test]
fn build_form_requires_endpoint() {
    let err = build_form(&Settings::default()).err().expect("missing endpoint");
    assert!(err.to_string().contains("no form endpoint configured"));
}
