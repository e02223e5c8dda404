//! Email recipient rules observed through full transitions.

use oshapp_service::appointment::requests::{
    CancelRequest, CreateAppointmentRequest, ProposeSlotRequest,
};

use crate::helpers::{TestApp, at};

#[tokio::test]
async fn test_acting_employee_gets_no_email() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(
            &app.employee_ctx(),
            CreateAppointmentRequest {
                requested_date: at(10, 9),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.service
        .propose_slot(
            &app.ctx(&c.nurse),
            view.id,
            ProposeSlotRequest {
                proposed_date: at(12, 14),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.transport.clear().await;

    app.service.confirm(&app.employee_ctx(), view.id).await.unwrap();

    assert!(app.emails_to(&c.employee_user).await.is_empty());
    // The in-app row is still written.
    let row = app.row_for(&c.employee_user, view.id).await.unwrap();
    assert_eq!(row.title, "Visite médicale confirmée");
    assert_eq!(app.emails_to(&c.doctor).await.len(), 1);
}

#[tokio::test]
async fn test_acting_rh_still_gets_email() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(
            &app.employee_ctx(),
            CreateAppointmentRequest {
                requested_date: at(10, 9),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.transport.clear().await;

    app.service
        .cancel(
            &app.ctx(&c.rh),
            view.id,
            CancelRequest {
                reason: Some("Doublon".into()),
            },
        )
        .await
        .unwrap();

    let rh_mails = app.emails_to(&c.rh).await;
    assert_eq!(rh_mails.len(), 1);
    assert_eq!(rh_mails[0].template, "appointment-cancellation-rh-template");
    assert!(rh_mails[0].subject.starts_with("Annulation"));

    let employee_mails = app.emails_to(&c.employee_user).await;
    assert_eq!(employee_mails.len(), 1);
    assert_eq!(employee_mails[0].template, "appointment-cancellation-medical-template");
}
