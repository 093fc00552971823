use std::{sync::Arc, time::Duration};

use folio_notification::{Delivery, MailDelivery};
use folio_shared::{
    Error,
    contact::{Field, FieldErrors, FormFields, SubmissionStatus},
};
use serde::Serialize;
use tokio::sync::{Mutex, watch};

use crate::validate;

pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors above and try again.";
pub const SENDING_MESSAGE: &str = "Sending your message...";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// How long a success or error banner stays before the status returns to idle.
pub const RESET_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub fields: FormFields,
    pub errors: FieldErrors,
    pub status: SubmissionStatus,
}

#[derive(Default)]
struct FormState {
    fields: FormFields,
    errors: FieldErrors,
    status: SubmissionStatus,
    /// Bumped on every status transition. A reset timer only fires if the
    /// generation it captured is still current.
    generation: u64,
}

impl FormState {
    fn set_status(
        &mut self,
        status: SubmissionStatus,
        status_tx: &watch::Sender<SubmissionStatus>,
    ) -> u64 {
        self.status = status;
        self.generation += 1;
        status_tx.send_replace(self.status.clone());

        self.generation
    }
}

/// Owns the contact form and drives submissions through `D`.
///
/// Cloning yields another handle to the same form.
pub struct ContactForm<D: ?Sized> {
    state: Arc<Mutex<FormState>>,
    status_tx: Arc<watch::Sender<SubmissionStatus>>,
    delivery: Arc<D>,
    reset_after: Duration,
}

impl<D: ?Sized> Clone for ContactForm<D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            status_tx: self.status_tx.clone(),
            delivery: self.delivery.clone(),
            reset_after: self.reset_after,
        }
    }
}

impl<D: MailDelivery + 'static> ContactForm<D> {
    pub fn new(delivery: D) -> Self {
        Self::from_arc(Arc::new(delivery))
    }
}

impl<D: MailDelivery + ?Sized + 'static> ContactForm<D> {
    pub fn from_arc(delivery: Arc<D>) -> Self {
        let (status_tx, _) = watch::channel(SubmissionStatus::idle());

        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            status_tx: Arc::new(status_tx),
            delivery,
            reset_after: RESET_AFTER,
        }
    }

    pub fn reset_after(mut self, delay: Duration) -> Self {
        self.reset_after = delay;
        self
    }

    /// Updates one field and drops its pending error, if any. The field is
    /// re-validated on the next submit.
    pub async fn change(&self, field: Field, value: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.fields.set(field, value);

        if state.errors.remove(field).is_some() {
            tracing::debug!(%field, "Cleared field error after edit");
        }
    }

    pub async fn fields(&self) -> FormFields {
        self.state.lock().await.fields.clone()
    }

    pub async fn errors(&self) -> FieldErrors {
        self.state.lock().await.errors.clone()
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.state.lock().await.status.clone()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.state.lock().await;

        FormSnapshot {
            fields: state.fields.clone(),
            errors: state.errors.clone(),
            status: state.status.clone(),
        }
    }

    /// Receives every status transition, including the delayed reset.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status_tx.subscribe()
    }

    /// Validates and sends the form.
    ///
    /// Returns the settled status (success or error). Fails with
    /// [`Error::SubmissionInFlight`] without touching any state when a
    /// previous submit is still loading.
    ///
    /// The send and the status update after it run on a spawned task, so a
    /// caller that stops waiting does not leave the form loading.
    #[tracing::instrument(skip_all)]
    pub async fn submit(&self) -> folio_shared::Result<SubmissionStatus> {
        let payload = {
            let mut state = self.state.lock().await;

            if state.status.is_loading() {
                tracing::warn!("Submit rejected, a message is already being sent");
                return Err(Error::SubmissionInFlight);
            }

            state.errors = validate(&state.fields);

            if !state.errors.is_empty() {
                tracing::info!(
                    invalid = state.errors.len(),
                    "Contact form rejected by validation"
                );

                let status = SubmissionStatus::error(INVALID_FORM_MESSAGE);
                let generation = state.set_status(status.clone(), &self.status_tx);
                drop(state);
                schedule_reset(
                    self.state.clone(),
                    self.status_tx.clone(),
                    self.reset_after,
                    generation,
                );

                return Ok(status);
            }

            state.set_status(SubmissionStatus::loading(SENDING_MESSAGE), &self.status_tx);
            state.fields.clone()
        };

        let settle = tokio::spawn(send_and_settle(
            self.state.clone(),
            self.status_tx.clone(),
            self.delivery.clone(),
            self.reset_after,
            payload,
        ));

        let status = match settle.await {
            Ok(status) => status,
            Err(err) => {
                tracing::error!(error = %err, "Contact form task failed");
                SubmissionStatus::error(UNEXPECTED_ERROR_MESSAGE)
            }
        };

        Ok(status)
    }
}

async fn send_and_settle<D: MailDelivery + ?Sized + 'static>(
    state: Arc<Mutex<FormState>>,
    status_tx: Arc<watch::Sender<SubmissionStatus>>,
    delivery: Arc<D>,
    reset_after: Duration,
    payload: FormFields,
) -> SubmissionStatus {
    let send = tokio::spawn(async move { delivery.send(&payload).await });

    let delivery = match send.await {
        Ok(delivery) => delivery,
        Err(err) => {
            if err.is_panic() {
                tracing::error!("Mail delivery panicked");
            } else {
                tracing::error!(error = %err, "Mail delivery task cancelled");
            }

            Delivery {
                success: false,
                message: UNEXPECTED_ERROR_MESSAGE.to_owned(),
            }
        }
    };

    let mut guard = state.lock().await;
    let status = if delivery.success {
        tracing::info!("Contact form sent");
        guard.fields.clear();
        guard.errors.clear();
        SubmissionStatus::success(delivery.message)
    } else {
        tracing::warn!("Contact form delivery failed");
        let message = if delivery.message.is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_owned()
        } else {
            delivery.message
        };
        SubmissionStatus::error(message)
    };

    let generation = guard.set_status(status.clone(), &status_tx);
    drop(guard);
    schedule_reset(state, status_tx, reset_after, generation);

    status
}

fn schedule_reset(
    state: Arc<Mutex<FormState>>,
    status_tx: Arc<watch::Sender<SubmissionStatus>>,
    delay: Duration,
    generation: u64,
) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let mut state = state.lock().await;
        if state.generation != generation {
            tracing::debug!(
                generation,
                current = state.generation,
                "Skipping stale status reset"
            );
            return;
        }

        state.set_status(SubmissionStatus::idle(), &status_tx);
    });
}
