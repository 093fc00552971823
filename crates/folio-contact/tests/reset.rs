use std::time::Duration;

use folio_contact::{ContactForm, INVALID_FORM_MESSAGE, RESET_AFTER};
use folio_shared::contact::{Status, SubmissionStatus};
use tokio::time::sleep;

mod helpers;

use helpers::{StubDelivery, fill, valid_fields};

#[tokio::test(start_paused = true)]
async fn test_success_returns_to_idle_after_five_seconds() -> anyhow::Result<()> {
    let form = ContactForm::new(StubDelivery::ok());
    fill(&form, &valid_fields()).await;

    assert_eq!(form.submit().await?.status, Status::Success);

    sleep(RESET_AFTER - Duration::from_millis(100)).await;
    assert_eq!(form.status().await.status, Status::Success);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(form.status().await, SubmissionStatus::idle());
    assert_eq!(form.status().await.message, "");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_error_returns_to_idle_after_five_seconds() -> anyhow::Result<()> {
    let form = ContactForm::new(StubDelivery::failing());
    fill(&form, &valid_fields()).await;

    assert_eq!(form.submit().await?.status, Status::Error);

    sleep(RESET_AFTER + Duration::from_millis(100)).await;
    assert_eq!(form.status().await, SubmissionStatus::idle());
    assert_eq!(form.fields().await, valid_fields());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stale_reset_does_not_clobber_newer_submission() -> anyhow::Result<()> {
    let form = ContactForm::new(StubDelivery::delayed(Duration::from_secs(2)));

    // t=0: invalid submit, first reset due at t=5.
    assert_eq!(
        form.submit().await?,
        SubmissionStatus::error(INVALID_FORM_MESSAGE)
    );

    // t=4: valid submit, delivery resolves at t=6.
    sleep(Duration::from_secs(4)).await;
    fill(&form, &valid_fields()).await;
    let task = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(form.status().await.status, Status::Loading);

    assert_eq!(task.await??.status, Status::Success);

    // The second reset is due at t=11.
    sleep(Duration::from_millis(4800)).await;
    assert_eq!(form.status().await.status, Status::Success);

    sleep(Duration::from_millis(300)).await;
    assert_eq!(form.status().await.status, Status::Idle);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_delay_is_configurable() -> anyhow::Result<()> {
    let form = ContactForm::new(StubDelivery::ok()).reset_after(Duration::from_secs(1));
    let mut rx = form.subscribe();

    form.submit().await?;
    assert_eq!(rx.borrow_and_update().status, Status::Error);

    rx.changed().await?;
    assert_eq!(*rx.borrow(), SubmissionStatus::idle());

    Ok(())
}
