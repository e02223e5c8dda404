//! End-to-end workflow demo against in-memory stores.
//!
//! Seeds a small directory, walks one appointment from request to
//! confirmation, has RH create a mandatory visit, then prints every user's
//! feed and the emails handed to the transport.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use oshapp_core::config::AppConfig;
use oshapp_core::error::AppError;
use oshapp_database::{MemoryAppointmentRepository, MemoryDirectory, MemoryNotificationRepository};
use oshapp_entity::appointment::{AppointmentType, VisitMode};
use oshapp_entity::user::{Employee, Role, User};
use oshapp_notify::{EmailGateway, MemoryTransport, NotificationRouter, sink_for};
use oshapp_service::appointment::requests::{
    CreateAppointmentRequest, CreateObligatoryRequest, ProposeSlotRequest,
};
use oshapp_service::{AppointmentService, AppointmentView, NotificationService, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for the demo command
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Only show the feed of this email address
    #[arg(short, long)]
    pub user: Option<String>,

    /// Also list the emails handed to the transport
    #[arg(long)]
    pub emails: bool,
}

/// One workflow step
#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    /// Step label
    step: String,
    /// Who acted
    actor: String,
    /// Resulting status
    status: String,
    /// Authoritative date
    date: String,
}

/// One feed entry
#[derive(Debug, Serialize, Tabled)]
struct FeedRow {
    /// Recipient email
    recipient: String,
    /// Title
    title: String,
    /// Message body
    message: String,
    /// Read flag
    read: bool,
}

/// One email
#[derive(Debug, Serialize, Tabled)]
struct EmailRow {
    /// Recipient addresses
    to: String,
    /// Subject
    subject: String,
    /// Template name
    template: String,
}

/// JSON rendering of the whole run
#[derive(Debug, Serialize)]
struct DemoReport {
    steps: Vec<StepRow>,
    feeds: Vec<FeedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emails: Option<Vec<EmailRow>>,
}

/// Seeded directory.
struct Cast {
    employee_user: User,
    employee: Employee,
    nurse: User,
    rh: User,
    everyone: Vec<User>,
}

fn seed(directory: &MemoryDirectory) -> Cast {
    let employee_user = directory.insert_user(
        User::new("sara.alaoui@corp.test", [Role::Employee]).with_display_name("Sara Alaoui"),
    );
    let manager1 = directory.insert_user(
        User::new("karim.bennani@corp.test", [Role::Employee]).with_display_name("Karim Bennani"),
    );
    let manager2 = directory.insert_user(
        User::new("leila.amrani@corp.test", [Role::Employee]).with_display_name("Leila Amrani"),
    );
    let rh = directory
        .insert_user(User::new("rh@corp.test", [Role::Rh]).with_display_name("Service RH"));
    let nurse = directory.insert_user(
        User::new("nurse@corp.test", [Role::Nurse])
            .with_display_name("Infirmière")
            .with_phone("+212 522 00 00 00"),
    );
    let doctor = directory
        .insert_user(User::new("doctor@corp.test", [Role::Doctor]).with_display_name("Dr. Idrissi"));

    let employee = directory.insert_employee(
        Employee::new(employee_user.id, "Sara", "Alaoui")
            .with_managers(Some(manager1.id), Some(manager2.id)),
    );

    let everyone = vec![
        employee_user.clone(),
        manager1,
        manager2,
        rh.clone(),
        nurse.clone(),
        doctor,
    ];
    Cast {
        employee_user,
        employee,
        nurse,
        rh,
        everyone,
    }
}

fn at(day: u32, hour: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2025, 1, day).and_then(|d| d.and_hms_opt(hour, 0, 0))
}

fn step(label: &str, actor: &User, view: &AppointmentView) -> StepRow {
    StepRow {
        step: label.to_string(),
        actor: actor.email.clone(),
        status: view.status_label.to_string(),
        date: view
            .date
            .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default(),
    }
}

/// Execute the demo
pub async fn execute(args: &DemoArgs, config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
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
    let (sink, worker) = sink_for(router, &config.dispatch);
    let service = AppointmentService::new(
        Arc::new(MemoryAppointmentRepository::new()),
        directory.clone(),
        sink,
        config.workflow.clone(),
    );

    let employee_ctx = RequestContext::for_user(&cast.employee_user, Some(&cast.employee));
    let nurse_ctx = RequestContext::for_user(&cast.nurse, None);
    let rh_ctx = RequestContext::for_user(&cast.rh, None);
    let mut steps = Vec::new();

    let requested = service
        .request(
            &employee_ctx,
            CreateAppointmentRequest {
                kind: Some(AppointmentType::Spontaneous),
                requested_date: at(10, 9),
                visit_mode: Some(VisitMode::InPerson),
                motif: Some("Douleurs dorsales".into()),
                notes: Some("Depuis lundi".into()),
            },
        )
        .await?;
    steps.push(step("request", &cast.employee_user, &requested));

    let proposed = service
        .propose_slot(
            &nurse_ctx,
            requested.id,
            ProposeSlotRequest {
                proposed_date: at(12, 14),
                medical_instructions: Some("Venir à jeun".into()),
                ..Default::default()
            },
        )
        .await?;
    steps.push(step("propose slot", &cast.nurse, &proposed));

    let confirmed = service.confirm(&employee_ctx, requested.id).await?;
    steps.push(step("confirm", &cast.employee_user, &confirmed));

    let obligatory = service
        .create_obligatory(
            &rh_ctx,
            CreateObligatoryRequest {
                employee_id: cast.employee.id,
                kind: AppointmentType::Periodic,
                requested_date: None,
                notes: None,
            },
        )
        .await?;
    steps.push(step("create obligatory", &cast.rh, &obligatory));

    if let Some(worker) = worker {
        worker.shutdown().await?;
    }

    let mut feeds = Vec::new();
    for user in &cast.everyone {
        if args.user.as_deref().is_some_and(|u| u != user.email) {
            continue;
        }
        let ctx = RequestContext::for_user(user, None);
        for n in feed.list_notifications(&ctx, None).await? {
            feeds.push(FeedRow {
                recipient: user.email.clone(),
                title: n.title,
                message: n.message,
                read: n.read,
            });
        }
    }

    let emails = if args.emails {
        Some(
            transport
                .sent()
                .await
                .into_iter()
                .map(|m| EmailRow {
                    to: m.to.join(", "),
                    subject: m.subject,
                    template: m.template,
                })
                .collect::<Vec<_>>(),
        )
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            output::print_item(&DemoReport { steps, feeds, emails }, format);
        }
        OutputFormat::Table => {
            output::print_heading("Workflow", format);
            output::print_list(&steps, format);
            output::print_heading("Notification feeds", format);
            output::print_list(&feeds, format);
            if let Some(emails) = emails {
                output::print_heading("Emails", format);
                output::print_list(&emails, format);
            }
        }
    }

    Ok(())
}
