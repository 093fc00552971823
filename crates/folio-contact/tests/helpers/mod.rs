use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use folio_contact::ContactForm;
use folio_notification::{Delivery, MailDelivery};
use folio_shared::contact::{Field, FormFields};
use tokio::sync::{Mutex, Notify};

/// Answers every send with a fixed outcome after `delay`.
#[derive(Default)]
pub struct StubDelivery {
    pub fail: bool,
    pub delay: Duration,
    pub calls: AtomicUsize,
    pub last: Mutex<Option<FormFields>>,
}

#[allow(dead_code)]
impl StubDelivery {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailDelivery for StubDelivery {
    async fn send(&self, payload: &FormFields) -> Delivery {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().await = Some(payload.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fail {
            Delivery::failed()
        } else {
            Delivery::sent(&payload.first_name)
        }
    }
}

/// Blocks every send until `open` is notified.
#[allow(dead_code)]
#[derive(Default)]
pub struct GatedDelivery {
    pub open: Notify,
}

#[async_trait]
impl MailDelivery for GatedDelivery {
    async fn send(&self, payload: &FormFields) -> Delivery {
        self.open.notified().await;

        Delivery::sent(&payload.first_name)
    }
}

#[allow(dead_code)]
pub struct PanickingDelivery;

#[allow(unreachable_code)]
#[async_trait]
impl MailDelivery for PanickingDelivery {
    async fn send(&self, _payload: &FormFields) -> Delivery {
        panic!("transport exploded");
    }
}

pub fn valid_fields() -> FormFields {
    FormFields {
        first_name: "Jane".to_owned(),
        last_name: "Doe".to_owned(),
        email: "jane@example.com".to_owned(),
        subject: "Freelance project".to_owned(),
        message: "I'd like to discuss a mobile app.".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn fill<D: MailDelivery + ?Sized + 'static>(form: &ContactForm<D>, fields: &FormFields) {
    for (field, value) in [
        (Field::FirstName, &fields.first_name),
        (Field::LastName, &fields.last_name),
        (Field::Email, &fields.email),
        (Field::Subject, &fields.subject),
        (Field::Message, &fields.message),
    ] {
        form.change(field, value.as_str()).await;
    }
}

#[allow(dead_code)]
pub fn shared<D: MailDelivery + 'static>(delivery: D) -> (ContactForm<D>, Arc<D>) {
    let delivery = Arc::new(delivery);

    (ContactForm::from_arc(delivery.clone()), delivery)
}
