//! Who hears about cancellations.

use oshapp_entity::appointment::{AppointmentStatus, AppointmentType};
use oshapp_entity::notification::{NotificationScenario, ScenarioTag};
use oshapp_service::appointment::requests::{
    CancelRequest, CreateAppointmentRequest, CreateObligatoryRequest,
};

use crate::helpers::{TestApp, at, ids};

#[tokio::test]
async fn test_obligatory_cancel_by_employee_skips_managers() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .create_obligatory(
            &app.ctx(&c.rh),
            CreateObligatoryRequest {
                employee_id: c.employee.id,
                kind: AppointmentType::Periodic,
                requested_date: None,
                notes: None,
            },
        )
        .await
        .unwrap();
    app.take_dispatched();

    let cancelled = app
        .service
        .cancel(
            &app.employee_ctx(),
            view.id,
            CancelRequest {
                reason: Some("En congé".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    let audience = app.take_audience();
    assert_eq!(audience, ids(&[&c.rh, &c.nurse, &c.nurse2, &c.doctor]));
    assert!(app.row_for(&c.manager1, view.id).await.is_none());
    assert!(app.row_for(&c.manager2, view.id).await.is_none());
}

#[tokio::test]
async fn test_regular_cancel_includes_both_managers() {
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
    app.take_dispatched();

    app.service
        .cancel(&app.ctx(&c.rh), view.id, CancelRequest::default())
        .await
        .unwrap();

    let dispatched = app.take_dispatched();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(
        dispatched[0].scenario,
        ScenarioTag::Known(NotificationScenario::AppointmentCancelled)
    );
    let audience = ids(&dispatched[0].recipients.iter().collect::<Vec<_>>());
    assert!(audience.contains(&c.manager1.id));
    assert!(audience.contains(&c.manager2.id));

    let row = app.row_for(&c.manager2, view.id).await.unwrap();
    assert_eq!(row.title, "Rendez-vous annulé");
}
