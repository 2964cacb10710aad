use anyhow::Context;
use contact_form::{
    ContactFormController, FormEvent, FormPostTransport, SubmissionStatus, SubmissionTransport,
    SubmitOutcome,
};
use tracing::debug;

use crate::{
    config::Settings,
    ui::render::{field_error_lines, status_message, SENDING_LABEL},
};

pub fn build_form(settings: &Settings) -> anyhow::Result<ContactFormController<FormPostTransport>> {
    let endpoint = settings.form_endpoint_url()?;
    let transport = FormPostTransport::new(
        endpoint,
        settings.form_keys.clone(),
        settings.request_timeout(),
    )
    .context("failed to set up form transport")?;
    Ok(ContactFormController::new(transport))
}

pub async fn run_submission<T: SubmissionTransport>(
    form: &ContactFormController<T>,
    input: &[(&str, String)],
) -> anyhow::Result<(SubmissionStatus, Vec<String>)> {
    for (name, value) in input {
        form.update_field_by_name(name, value.as_str())
            .await
            .with_context(|| format!("cannot fill contact field '{name}'"))?;
    }

    let mut events = form.subscribe();
    let outcome = form.submit().await;

    let mut lines = Vec::new();
    while let Ok(event) = events.try_recv() {
        debug!(?event, "contact: form event");
        if event == FormEvent::StatusChanged(SubmissionStatus::Submitting) {
            lines.push(SENDING_LABEL.to_string());
        }
    }

    let snapshot = form.snapshot().await;
    match outcome {
        SubmitOutcome::Invalid(_) => lines.extend(field_error_lines(&snapshot.errors)),
        SubmitOutcome::AlreadySubmitting => {
            lines.push("A message is already being sent.".to_string())
        }
        SubmitOutcome::Sent | SubmitOutcome::Failed => {
            if let Some((title, body)) = status_message(snapshot.status) {
                lines.push(title.to_string());
                lines.push(body.to_string());
            }
        }
    }

    Ok((snapshot.status, lines))
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
