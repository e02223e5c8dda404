//! One feed row per recipient and appointment, resurfaced on each event.

use oshapp_core::error::ErrorKind;
use oshapp_service::appointment::requests::{CreateAppointmentRequest, ProposeSlotRequest};

use crate::helpers::{TestApp, at};

#[tokio::test]
async fn test_row_is_resurfaced_not_duplicated() {
    let app = TestApp::new();
    let c = &app.cast;
    let ctx = app.employee_ctx();
    let view = app
        .service
        .request(
            &ctx,
            CreateAppointmentRequest {
                requested_date: at(10, 9),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let first = app.row_for(&c.employee_user, view.id).await.unwrap();
    app.feed.mark_read(&ctx, first.id).await.unwrap();
    assert_eq!(app.feed.unread_count(&ctx).await.unwrap(), 0);

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

    let feed = app.feed_of(&c.employee_user).await;
    assert_eq!(feed.len(), 1);
    let second = &feed[0];
    assert_eq!(second.id, first.id);
    assert_eq!(second.title, "Créneau proposé");
    assert!(second.is_unread());
    assert!(second.created_at >= first.created_at);
    assert_eq!(app.feed.unread_count(&ctx).await.unwrap(), 1);
}

#[tokio::test]
async fn test_feed_rows_are_private() {
    let app = TestApp::new();
    let c = &app.cast;
    let view = app
        .service
        .request(&app.employee_ctx(), CreateAppointmentRequest::default())
        .await
        .unwrap();

    let rh_row = app.row_for(&c.rh, view.id).await.unwrap();
    let err = app
        .feed
        .mark_read(&app.ctx(&c.nurse), rh_row.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    app.feed.delete(&app.ctx(&c.rh), rh_row.id).await.unwrap();
    assert!(app.row_for(&c.rh, view.id).await.is_none());
    assert!(app.row_for(&c.nurse, view.id).await.is_some());
}
