//! RH and managers never see medical details, in the feed or by email.

use oshapp_entity::appointment::{AppointmentType, VisitMode};
use oshapp_service::appointment::requests::{CreateAppointmentRequest, ProposeSlotRequest};

use crate::helpers::{TestApp, at};

const MOTIF: &str = "Douleurs dorsales";
const NOTES: &str = "Depuis lundi";
const INSTRUCTIONS: &str = "Venir à jeun";

async fn run_flow(app: &TestApp) {
    let view = app
        .service
        .request(
            &app.employee_ctx(),
            CreateAppointmentRequest {
                kind: Some(AppointmentType::ReturnToWork),
                requested_date: at(10, 9),
                visit_mode: Some(VisitMode::Remote),
                motif: Some(MOTIF.into()),
                notes: Some(NOTES.into()),
            },
        )
        .await
        .unwrap();
    app.service
        .propose_slot(
            &app.ctx(&app.cast.doctor),
            view.id,
            ProposeSlotRequest {
                proposed_date: at(12, 14),
                medical_instructions: Some(INSTRUCTIONS.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.service.confirm(&app.employee_ctx(), view.id).await.unwrap();
}

#[tokio::test]
async fn test_restricted_audience_never_sees_medical_details() {
    let app = TestApp::new();
    run_flow(&app).await;
    let c = &app.cast;

    for user in [&c.rh, &c.manager1, &c.manager2] {
        for row in app.feed_of(user).await {
            for secret in [MOTIF, NOTES, INSTRUCTIONS] {
                assert!(
                    !row.message.contains(secret),
                    "{secret} leaked to {} in {:?}",
                    user.email,
                    row.title
                );
            }
        }

        let emails = app.emails_to(user).await;
        assert!(!emails.is_empty());
        for mail in emails {
            for secret in [MOTIF, NOTES, INSTRUCTIONS] {
                assert!(!mail.mentions(secret), "{secret} leaked to {} by email", user.email);
            }
            for key in oshapp_service::policy::RESTRICTED_VARS {
                assert!(!mail.has_var(key));
            }
            assert!(mail.primary_cta.is_none());
            assert!(mail.secondary_cta.is_none());
        }
    }
}

#[tokio::test]
async fn test_employee_and_medical_staff_see_instructions() {
    let app = TestApp::new();
    run_flow(&app).await;
    let c = &app.cast;

    let doctor_feed = app.feed_of(&c.doctor).await;
    assert!(doctor_feed.iter().any(|n| n.message.contains(INSTRUCTIONS)));

    let proposal = app
        .emails_to(&c.employee_user)
        .await
        .into_iter()
        .find(|m| m.template == "appointment-proposal-template")
        .unwrap();
    assert!(proposal.has_var("medicalInstructions"));
    assert_eq!(proposal.primary_cta.unwrap().label, "Confirmer le créneau");
    assert!(proposal.secondary_cta.unwrap().url.ends_with("&action=cancel"));
}
