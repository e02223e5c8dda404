//! End-to-end workflow tests: transitions, audiences and phrasing.

use oshapp_core::error::ErrorKind;
use oshapp_database::AppointmentRepository;
use oshapp_entity::appointment::{AppointmentStatus, AppointmentType, VisitMode};
use oshapp_entity::notification::ScenarioTag;
use oshapp_service::appointment::requests::{
    CancelRequest, CreateAppointmentRequest, CreateObligatoryRequest, ProposeSlotRequest,
};
use oshapp_service::appointment::service::OBLIGATORY_CREATED_MESSAGE;

use crate::helpers::{TestApp, at, ids};

fn spontaneous_request() -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        kind: Some(AppointmentType::Spontaneous),
        requested_date: at(10, 9),
        visit_mode: Some(VisitMode::InPerson),
        motif: Some("Douleurs dorsales".into()),
        notes: Some("Depuis lundi".into()),
    }
}

fn proposal() -> ProposeSlotRequest {
    ProposeSlotRequest {
        proposed_date: at(12, 14),
        medical_instructions: Some("Venir à jeun".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_employee_request_reaches_full_audience() {
    let app = TestApp::new();
    let c = &app.cast;

    let view = app
        .service
        .request(&app.employee_ctx(), spontaneous_request())
        .await
        .unwrap();
    assert_eq!(view.status, AppointmentStatus::RequestedEmployee);

    let audience = app.take_audience();
    assert_eq!(
        audience,
        ids(&[
            &c.employee_user,
            &c.manager1,
            &c.manager2,
            &c.rh,
            &c.nurse,
            &c.nurse2,
            &c.doctor,
        ])
    );

    let rh_row = app.row_for(&c.rh, view.id).await.unwrap();
    assert!(!rh_row.message.contains("Douleurs dorsales"));
    assert!(!rh_row.message.contains("Depuis lundi"));

    let nurse_row = app.row_for(&c.nurse, view.id).await.unwrap();
    assert!(nurse_row.message.contains("Motif : Douleurs dorsales"));
    assert!(nurse_row.message.contains("Notes : Depuis lundi"));

    let own_row = app.row_for(&c.employee_user, view.id).await.unwrap();
    assert_eq!(own_row.title, "Demande envoyée");
    assert!(app.emails_to(&c.employee_user).await.is_empty());
}

#[tokio::test]
async fn test_proposal_excludes_the_proposer() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(&app.employee_ctx(), spontaneous_request())
        .await
        .unwrap();
    app.take_dispatched();

    let proposed = app
        .service
        .propose_slot(&app.ctx(&c.nurse), view.id, proposal())
        .await
        .unwrap();
    assert_eq!(proposed.status, AppointmentStatus::ProposedMedecin);
    assert_eq!(proposed.proposed_date, at(12, 14));

    let audience = app.take_audience();
    assert!(!audience.contains(&c.nurse.id));
    assert!(audience.contains(&c.nurse2.id));
    assert!(audience.contains(&c.employee_user.id));

    let row = app.row_for(&c.employee_user, view.id).await.unwrap();
    assert_eq!(row.title, "Créneau proposé");
    assert!(row.action_url.as_deref().unwrap().ends_with("&action=confirm"));

    let emails = app.emails_to(&c.employee_user).await;
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].template, "appointment-proposal-template");
}

#[tokio::test]
async fn test_employee_confirms_proposed_slot() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(&app.employee_ctx(), spontaneous_request())
        .await
        .unwrap();
    app.service
        .propose_slot(&app.ctx(&c.nurse), view.id, proposal())
        .await
        .unwrap();
    app.transport.clear().await;

    let confirmed = app.service.confirm(&app.employee_ctx(), view.id).await.unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
    assert_eq!(confirmed.scheduled_time, at(12, 14));

    let rh_row = app.row_for(&c.rh, view.id).await.unwrap();
    let nurse_row = app.row_for(&c.nurse, view.id).await.unwrap();
    assert_eq!(rh_row.title, "Visite médicale confirmée");
    assert_ne!(rh_row.message, nurse_row.message);
    assert!(rh_row.message.contains("Sara Alaoui"));

    let rh_mail = &app.emails_to(&c.rh).await[0];
    assert_eq!(rh_mail.template, "medical-visit-confirmed-rh-template");
    assert!(rh_mail.subject.starts_with("Rendez-vous confirmé"));

    let nurse_mail = &app.emails_to(&c.nurse).await[0];
    assert_eq!(nurse_mail.template, "medical-visit-confirmed-medical-template");
    assert!(nurse_mail.subject.starts_with("Confirmation de visite médicale"));
}

#[tokio::test]
async fn test_rh_creates_obligatory_visit_for_medical_staff_only() {
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
    assert_eq!(view.status, AppointmentStatus::Obligatory);
    assert!(view.is_obligatory);

    assert_eq!(app.take_audience(), ids(&[&c.nurse, &c.nurse2, &c.doctor]));

    let row = app.row_for(&c.doctor, view.id).await.unwrap();
    assert!(row.message.contains(OBLIGATORY_CREATED_MESSAGE));
    assert!(app.row_for(&c.employee_user, view.id).await.is_none());
    assert!(app.row_for(&c.rh, view.id).await.is_none());
}

#[tokio::test]
async fn test_rejected_transition_changes_nothing() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(&app.employee_ctx(), spontaneous_request())
        .await
        .unwrap();
    app.take_dispatched();

    let err = app
        .service
        .propose_slot(&app.employee_ctx(), view.id, proposal())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let err = app
        .service
        .confirm(&app.employee_ctx(), view.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidStateTransition);

    let err = app
        .service
        .propose_slot(&app.ctx(&c.nurse), view.id, ProposeSlotRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let stored = app.appointments.find_by_id(view.id).await.unwrap().unwrap();
    assert_eq!(stored.status, AppointmentStatus::RequestedEmployee);
    assert!(app.take_dispatched().is_empty());
}

#[tokio::test]
async fn test_authorization_precedes_payload_validation() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(&app.employee_ctx(), spontaneous_request())
        .await
        .unwrap();
    app.take_dispatched();

    let err = app
        .service
        .propose_slot(&app.employee_ctx(), view.id, ProposeSlotRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let err = app
        .service
        .cancel(
            &app.ctx(&c.manager1),
            view.id,
            CancelRequest {
                reason: Some("x".repeat(3000)),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    app.service
        .cancel(&app.employee_ctx(), view.id, CancelRequest::default())
        .await
        .unwrap();
    app.take_dispatched();
    let err = app
        .service
        .propose_slot(&app.ctx(&c.nurse), view.id, ProposeSlotRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidStateTransition);

    assert!(app.take_dispatched().is_empty());
}

#[tokio::test]
async fn test_unknown_scenario_falls_back_to_status_notice() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(&app.employee_ctx(), spontaneous_request())
        .await
        .unwrap();
    let mut request = app.take_dispatched().remove(0);
    request.scenario = ScenarioTag::parse("APPOINTMENT_RESCHEDULED");

    let report = app.router.dispatch(&request).await;
    assert_eq!(report.recipients, request.recipients.len());
    assert_eq!(report.in_app_stored, request.recipients.len());

    let row = app.row_for(&c.doctor, view.id).await.unwrap();
    assert_eq!(row.title, "Statut mis à jour");
    assert_eq!(row.message, "Statut mis à jour.");
}
