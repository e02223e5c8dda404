//! Shared test helpers for integration tests.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use oshapp_core::config::AppConfig;
use oshapp_core::result::AppResult;
use oshapp_core::types::id::{AppointmentId, UserId};
use oshapp_database::{MemoryAppointmentRepository, MemoryDirectory, MemoryNotificationRepository};
use oshapp_entity::notification::Notification;
use oshapp_entity::user::{Employee, Role, User};
use oshapp_notify::email::EmailMessage;
use oshapp_notify::{EmailGateway, InlineDispatch, MemoryTransport, NotificationRouter};
use oshapp_service::{
    AppointmentService, DispatchRequest, DispatchSink, NotificationService, RequestContext,
};

/// Inline sink that also keeps a copy of every request.
#[derive(Debug)]
pub struct TappedSink {
    inner: InlineDispatch,
    seen: Mutex<Vec<DispatchRequest>>,
}

#[async_trait]
impl DispatchSink for TappedSink {
    async fn submit(&self, request: DispatchRequest) -> AppResult<()> {
        self.seen.lock().unwrap().push(request.clone());
        self.inner.submit(request).await
    }
}

/// Seeded users.
pub struct Cast {
    pub employee_user: User,
    pub employee: Employee,
    pub manager1: User,
    pub manager2: User,
    pub rh: User,
    pub nurse: User,
    pub nurse2: User,
    pub doctor: User,
}

/// Test application context
pub struct TestApp {
    /// Workflow entry point
    pub service: AppointmentService,
    /// In-app feed
    pub feed: NotificationService,
    /// Recording email transport
    pub transport: MemoryTransport,
    /// Router, for dispatching hand-built requests
    pub router: NotificationRouter,
    /// Appointment store
    pub appointments: Arc<MemoryAppointmentRepository>,
    /// Seeded users
    pub cast: Cast,
    sink: Arc<TappedSink>,
}

impl TestApp {
    /// Create a new test application with inline dispatch
    pub fn new() -> Self {
        let config = AppConfig::default();
        let directory = Arc::new(MemoryDirectory::new());
        let cast = seed(&directory);

        let feed = NotificationService::new(
            Arc::new(MemoryNotificationRepository::new()),
            config.notifications.clone(),
        );
        let transport = MemoryTransport::new();
        let gateway = EmailGateway::new(Arc::new(transport.clone()), config.email.clone());
        let router = NotificationRouter::new(
            feed.clone(),
            gateway,
            &config.notifications,
            &config.dispatch,
        );
        let sink = Arc::new(TappedSink {
            inner: InlineDispatch::new(router.clone()),
            seen: Mutex::new(Vec::new()),
        });
        let appointments = Arc::new(MemoryAppointmentRepository::new());
        let service = AppointmentService::new(
            appointments.clone(),
            directory,
            sink.clone(),
            config.workflow.clone(),
        );

        Self {
            service,
            feed,
            transport,
            router,
            appointments,
            cast,
            sink,
        }
    }

    /// Context of the employee, linked to their profile
    pub fn employee_ctx(&self) -> RequestContext {
        RequestContext::for_user(&self.cast.employee_user, Some(&self.cast.employee))
    }

    /// Context of any seeded user
    pub fn ctx(&self, user: &User) -> RequestContext {
        RequestContext::for_user(user, None)
    }

    /// Requests dispatched since the last call
    pub fn take_dispatched(&self) -> Vec<DispatchRequest> {
        std::mem::take(&mut *self.sink.seen.lock().unwrap())
    }

    /// Recipient ids of every request dispatched since the last call
    pub fn take_audience(&self) -> BTreeSet<UserId> {
        self.take_dispatched()
            .into_iter()
            .flat_map(|r| r.recipients.into_iter().map(|u| u.id))
            .collect()
    }

    /// A user's feed, newest first
    pub async fn feed_of(&self, user: &User) -> Vec<Notification> {
        self.feed
            .list_notifications(&self.ctx(user), None)
            .await
            .unwrap()
    }

    /// A user's row for one appointment
    pub async fn row_for(&self, user: &User, id: AppointmentId) -> Option<Notification> {
        self.feed_of(user)
            .await
            .into_iter()
            .find(|n| n.is_for_appointment(*id.as_uuid()))
    }

    /// Emails sent to a user
    pub async fn emails_to(&self, user: &User) -> Vec<EmailMessage> {
        self.transport.sent_to(&user.email).await
    }
}

fn seed(directory: &MemoryDirectory) -> Cast {
    let employee_user = directory.insert_user(
        User::new("sara.alaoui@corp.test", [Role::Employee]).with_display_name("Sara Alaoui"),
    );
    let manager1 = directory.insert_user(User::new("karim@corp.test", [Role::Employee]));
    let manager2 = directory.insert_user(User::new("leila@corp.test", [Role::Employee]));
    let rh = directory.insert_user(User::new("rh@corp.test", [Role::Rh]));
    let nurse = directory.insert_user(
        User::new("nurse@corp.test", [Role::Nurse]).with_phone("+212 522 00 00 00"),
    );
    let nurse2 = directory.insert_user(User::new("nurse2@corp.test", [Role::Nurse]));
    let doctor = directory.insert_user(User::new("doctor@corp.test", [Role::Doctor]));
    let employee = directory.insert_employee(
        Employee::new(employee_user.id, "Sara", "Alaoui")
            .with_managers(Some(manager1.id), Some(manager2.id)),
    );

    Cast {
        employee_user,
        employee,
        manager1,
        manager2,
        rh,
        nurse,
        nurse2,
        doctor,
    }
}

/// A date in January 2025.
pub fn at(day: u32, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2025, 1, day).and_then(|d| d.and_hms_opt(hour, 0, 0))
}

/// Ids of the given users.
pub fn ids(users: &[&User]) -> BTreeSet<UserId> {
    users.iter().map(|u| u.id).collect()
}
