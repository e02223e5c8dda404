//! Appointment workflow service: validate, transition, commit, then dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use oshapp_core::config::WorkflowConfig;
use oshapp_core::error::AppError;
use oshapp_core::types::id::{AppointmentId, EmployeeId};
use oshapp_database::repositories::{AppointmentRepository, DirectoryRepository};
use oshapp_entity::appointment::{Appointment, AppointmentStatus};
use oshapp_entity::notification::{NotificationActor, NotificationScenario};
use oshapp_entity::user::{Employee, Role, User};

use crate::context::RequestContext;
use crate::notification::rules::{Audience, RecipientResolver};
use crate::policy::VisibilityPolicy;

use super::dispatch::{DispatchRequest, DispatchSink};
use super::machine::Transition;
use super::requests::{
    CancelRequest, CreateAppointmentRequest, CreateObligatoryRequest, PlanVisitRequest,
    ProposeSlotRequest, non_blank,
};
use super::view::AppointmentView;

/// Extra message attached when RH creates a mandatory visit.
pub const OBLIGATORY_CREATED_MESSAGE: &str = "Une visite médicale obligatoire a été programmée.";

/// What to tell whom after a commit.
#[derive(Debug, Clone)]
struct Notice {
    scenario: NotificationScenario,
    audience: Audience,
    actor: Option<NotificationActor>,
    extra_message: Option<String>,
}

impl Notice {
    fn new(scenario: NotificationScenario, audience: Audience) -> Self {
        Self {
            scenario,
            audience,
            actor: None,
            extra_message: None,
        }
    }

    fn actor(mut self, actor: NotificationActor) -> Self {
        self.actor = Some(actor);
        self
    }
}

/// Drives the appointment workflow.
#[derive(Debug, Clone)]
pub struct AppointmentService {
    /// Appointment store.
    appointments: Arc<dyn AppointmentRepository>,
    /// User and employee directory.
    directory: Arc<dyn DirectoryRepository>,
    /// Audience computation.
    resolver: RecipientResolver,
    /// Where committed events are sent.
    sink: Arc<dyn DispatchSink>,
    /// Workflow settings.
    config: WorkflowConfig,
}

impl AppointmentService {
    /// Creates a new appointment service.
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        directory: Arc<dyn DirectoryRepository>,
        sink: Arc<dyn DispatchSink>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            resolver: RecipientResolver::new(Arc::clone(&directory)),
            appointments,
            directory,
            sink,
            config,
        }
    }

    // ── Creation ───────────────────────────────────────────────────────

    /// Employee requests a visit for themselves.
    pub async fn request(
        &self,
        ctx: &RequestContext,
        req: CreateAppointmentRequest,
    ) -> Result<AppointmentView, AppError> {
        req.validate()?;
        let employee = self.caller_employee(ctx).await?;

        let mut appt = Appointment::new(
            employee.id,
            req.kind.unwrap_or_default(),
            AppointmentStatus::RequestedEmployee,
            ctx.user_id,
        );
        appt.requested_date_employee = req.requested_date;
        appt.visit_mode = req.visit_mode;
        appt.motif = non_blank(req.motif);
        appt.notes = non_blank(req.notes);

        let stored = self.appointments.insert(&appt).await?;
        info!(
            appointment_id = %stored.id,
            employee_id = %employee.id,
            kind = %stored.kind,
            "Appointment requested"
        );

        self.notify(
            ctx,
            &stored,
            &employee,
            Notice::new(NotificationScenario::AppointmentRequested, Audience::Default)
                .actor(NotificationActor::Employee),
        )
        .await;
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    /// RH summons an employee to a mandatory visit.
    pub async fn create_obligatory(
        &self,
        ctx: &RequestContext,
        req: CreateObligatoryRequest,
    ) -> Result<AppointmentView, AppError> {
        if !ctx.is_rh() {
            return Err(AppError::unauthorized(
                "Only RH can create obligatory visits",
            ));
        }
        req.validate()?;
        let employee = self.load_employee(req.employee_id).await?;

        let mut appt = Appointment::new(
            employee.id,
            req.kind,
            AppointmentStatus::Obligatory,
            ctx.user_id,
        );
        appt.is_obligatory = true;
        appt.requested_date_employee = req.requested_date;
        appt.notes = non_blank(req.notes);

        let stored = self.appointments.insert(&appt).await?;
        info!(
            appointment_id = %stored.id,
            employee_id = %employee.id,
            created_by = %ctx.user_id,
            "Obligatory visit created"
        );

        let mut notice = Notice::new(
            NotificationScenario::AppointmentRequested,
            Audience::ObligatoryCreation,
        )
        .actor(NotificationActor::Rh);
        notice.extra_message = Some(OBLIGATORY_CREATED_MESSAGE.to_string());

        self.notify(ctx, &stored, &employee, notice).await;
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    /// Medical staff plan a visit without a prior request.
    pub async fn plan_directly(
        &self,
        ctx: &RequestContext,
        req: PlanVisitRequest,
    ) -> Result<AppointmentView, AppError> {
        if !ctx.is_medical_staff() {
            return Err(AppError::unauthorized(
                "Only medical staff can plan a visit",
            ));
        }
        req.validate()?;
        let employee = self.load_employee(req.employee_id).await?;

        let mut appt = Appointment::new(
            employee.id,
            req.kind,
            AppointmentStatus::PlannedByMedicalStaff,
            ctx.user_id,
        );
        appt.scheduled_time = req.scheduled_time;
        appt.visit_mode = req.visit_mode;
        appt.medical_instructions = non_blank(req.medical_instructions);
        assign_staff(&mut appt, ctx, true);
        appt.medical_service_phone = Some(self.resolve_phone(&appt, ctx).await);

        let stored = self.appointments.insert(&appt).await?;
        info!(
            appointment_id = %stored.id,
            employee_id = %employee.id,
            planned_by = %ctx.user_id,
            "Medical visit planned"
        );

        self.notify(
            ctx,
            &stored,
            &employee,
            Notice::new(NotificationScenario::MedicalVisitPlanned, Audience::Default)
                .actor(NotificationActor::MedicalStaff),
        )
        .await;
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    // ── Transitions ────────────────────────────────────────────────────

    /// Medical staff propose a slot.
    pub async fn propose_slot(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
        req: ProposeSlotRequest,
    ) -> Result<AppointmentView, AppError> {
        let (mut appt, employee) = self.load(id).await?;
        Transition::ProposeSlot.guard(ctx, &appt, &employee)?;
        req.validate()?;

        let proposed = req
            .proposed_date
            .ok_or_else(|| AppError::validation("A proposed date is required"))?;
        appt.proposed_date = Some(proposed);
        if req.visit_mode.is_some() {
            appt.visit_mode = req.visit_mode;
        }
        if let Some(instructions) = non_blank(req.medical_instructions) {
            appt.medical_instructions = Some(instructions);
        }
        if let Some(comment) = non_blank(req.comment) {
            appt.add_comment(ctx.user_id, comment);
        }
        assign_staff(&mut appt, ctx, false);
        appt.medical_service_phone = Some(self.resolve_phone(&appt, ctx).await);
        appt.status = AppointmentStatus::ProposedMedecin;
        appt.touch(ctx.user_id);

        let stored = self.appointments.update(&appt).await?;
        info!(
            appointment_id = %stored.id,
            proposed_date = %proposed,
            proposed_by = %ctx.user_id,
            "Slot proposed"
        );

        let audience = if stored.is_obligatory {
            Audience::ObligatoryProposal { proposer: ctx.user_id }
        } else {
            Audience::Proposal { proposer: ctx.user_id }
        };
        self.notify(
            ctx,
            &stored,
            &employee,
            Notice::new(NotificationScenario::AppointmentSlotProposed, audience),
        )
        .await;
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    /// Confirm, routed to the employee or medical-staff branch.
    pub async fn confirm(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
    ) -> Result<AppointmentView, AppError> {
        let (appt, employee) = self.load(id).await?;
        match Transition::route_confirm(ctx, &appt, &employee)? {
            Transition::ConfirmByMedicalStaff => {
                self.apply_staff_confirm(ctx, appt, employee).await
            }
            _ => self.apply_employee_confirm(ctx, appt, employee).await,
        }
    }

    /// The employee accepts a proposed or planned visit.
    pub async fn confirm_by_employee(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
    ) -> Result<AppointmentView, AppError> {
        let (appt, employee) = self.load(id).await?;
        self.apply_employee_confirm(ctx, appt, employee).await
    }

    /// Medical staff accept the employee's requested date.
    pub async fn confirm_by_medical_staff(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
    ) -> Result<AppointmentView, AppError> {
        let (appt, employee) = self.load(id).await?;
        self.apply_staff_confirm(ctx, appt, employee).await
    }

    async fn apply_employee_confirm(
        &self,
        ctx: &RequestContext,
        mut appt: Appointment,
        employee: Employee,
    ) -> Result<AppointmentView, AppError> {
        Transition::ConfirmByEmployee.guard(ctx, &appt, &employee)?;

        let scheduled = match appt.status {
            AppointmentStatus::ProposedMedecin => appt.proposed_date,
            _ => appt.scheduled_time.or(appt.proposed_date),
        }
        .ok_or_else(|| AppError::validation("No date to confirm"))?;
        appt.scheduled_time = Some(scheduled);
        appt.status = AppointmentStatus::Confirmed;
        appt.touch(ctx.user_id);

        let stored = self.appointments.update(&appt).await?;
        info!(
            appointment_id = %stored.id,
            scheduled_time = %scheduled,
            "Visit confirmed by employee"
        );

        let audience = if stored.is_obligatory {
            Audience::ObligatoryEmployeeAction
        } else {
            Audience::Default
        };
        self.notify(
            ctx,
            &stored,
            &employee,
            Notice::new(NotificationScenario::MedicalVisitConfirmedByEmployee, audience)
                .actor(NotificationActor::Employee),
        )
        .await;
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    async fn apply_staff_confirm(
        &self,
        ctx: &RequestContext,
        mut appt: Appointment,
        employee: Employee,
    ) -> Result<AppointmentView, AppError> {
        Transition::ConfirmByMedicalStaff.guard(ctx, &appt, &employee)?;

        let scheduled = appt
            .requested_date_employee
            .ok_or_else(|| AppError::validation("The request carries no date to confirm"))?;
        appt.scheduled_time = Some(scheduled);
        assign_staff(&mut appt, ctx, false);
        appt.medical_service_phone = Some(self.resolve_phone(&appt, ctx).await);
        appt.status = AppointmentStatus::Confirmed;
        appt.touch(ctx.user_id);

        let stored = self.appointments.update(&appt).await?;
        info!(
            appointment_id = %stored.id,
            scheduled_time = %scheduled,
            confirmed_by = %ctx.user_id,
            "Appointment confirmed by medical staff"
        );

        // RH recipients get their own scenario; everyone else the standard one.
        if let Some(recipients) = self.recipients(&stored, &employee, Audience::Default).await {
            let (rh, others) = RecipientResolver::split_rh(recipients);
            let employee_user = self.employee_user(&employee).await;
            if !rh.is_empty() {
                let request = DispatchRequest::new(
                    NotificationScenario::AppointmentConfirmedRh,
                    stored.clone(),
                    employee.clone(),
                    rh,
                )
                .with_employee_user(employee_user.clone())
                .with_actor(ctx.user_id);
                self.submit(request).await;
            }
            if !others.is_empty() {
                let request = DispatchRequest::new(
                    NotificationScenario::AppointmentConfirmed,
                    stored.clone(),
                    employee.clone(),
                    others,
                )
                .with_employee_user(employee_user)
                .with_actor(ctx.user_id)
                .with_actor_override(Some(NotificationActor::MedicalStaff));
                self.submit(request).await;
            }
        }
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    /// Cancel a non-terminal appointment.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
        req: CancelRequest,
    ) -> Result<AppointmentView, AppError> {
        let (mut appt, employee) = self.load(id).await?;
        Transition::Cancel.guard(ctx, &appt, &employee)?;
        req.validate()?;

        let previous = appt.status;
        appt.status = AppointmentStatus::Cancelled;
        appt.cancellation_reason = non_blank(req.reason);
        appt.touch(ctx.user_id);

        let stored = self.appointments.update(&appt).await?;
        info!(
            appointment_id = %stored.id,
            previous_status = %previous,
            cancelled_by = %ctx.user_id,
            "Appointment cancelled"
        );

        let by_owner = ctx.owns(&employee);
        let scenario = cancellation_scenario(previous, &stored);
        let audience = if stored.is_obligatory && by_owner {
            Audience::ObligatoryEmployeeAction
        } else {
            Audience::Default
        };
        let actor = if by_owner {
            NotificationActor::Employee
        } else if ctx.is_medical_staff() {
            NotificationActor::MedicalStaff
        } else {
            NotificationActor::Rh
        };

        self.notify(ctx, &stored, &employee, Notice::new(scenario, audience).actor(actor))
            .await;
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    /// Medical staff record that a confirmed visit took place.
    pub async fn complete(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
    ) -> Result<AppointmentView, AppError> {
        let (mut appt, employee) = self.load(id).await?;
        Transition::Complete.guard(ctx, &appt, &employee)?;

        appt.status = AppointmentStatus::Completed;
        appt.touch(ctx.user_id);
        let stored = self.appointments.update(&appt).await?;

        info!(appointment_id = %stored.id, completed_by = %ctx.user_id, "Appointment completed");
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    // ── Thread and housekeeping ────────────────────────────────────────

    /// Append a comment to the thread.
    pub async fn add_comment(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
        text: &str,
    ) -> Result<AppointmentView, AppError> {
        let (mut appt, employee) = self.load(id).await?;
        if !VisibilityPolicy::can_comment(ctx, &employee) {
            return Err(AppError::unauthorized(format!(
                "User {} may not comment on appointment {id}",
                ctx.user_id
            )));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("Comment must not be blank"));
        }
        if text.chars().count() as u64 > self.config.max_text_length {
            return Err(AppError::validation(format!(
                "Comment exceeds {} characters",
                self.config.max_text_length
            )));
        }

        appt.add_comment(ctx.user_id, text);
        appt.touch(ctx.user_id);
        let stored = self.appointments.update(&appt).await?;
        Ok(AppointmentView::project(&stored, &employee, ctx))
    }

    /// Delete a cancelled appointment. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, id: AppointmentId) -> Result<(), AppError> {
        let (appt, employee) = self.load(id).await?;
        if !ctx.owns(&employee) {
            return Err(AppError::unauthorized(
                "Only the employee can delete their appointment",
            ));
        }
        if appt.status != AppointmentStatus::Cancelled {
            return Err(AppError::invalid_transition(appt.status, "DELETED"));
        }

        self.appointments.delete(id).await?;
        info!(appointment_id = %id, deleted_by = %ctx.user_id, "Appointment deleted");
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Get one appointment, projected for the caller.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: AppointmentId,
    ) -> Result<AppointmentView, AppError> {
        let (appt, employee) = self.load(id).await?;
        if !VisibilityPolicy::can_view(ctx, &employee) {
            return Err(AppError::unauthorized(format!(
                "User {} may not view appointment {id}",
                ctx.user_id
            )));
        }
        Ok(AppointmentView::project(&appt, &employee, ctx))
    }

    /// The caller's own appointments, newest first.
    ///
    /// Plain employees do not see mandatory visits still waiting for a slot.
    pub async fn list_for_employee(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<AppointmentView>, AppError> {
        let employee = self.caller_employee(ctx).await?;
        let hide_pending_obligatory = ctx.is_employee_only();

        let items = self.appointments.find_by_employee(employee.id).await?;
        Ok(items
            .iter()
            .filter(|a| !(hide_pending_obligatory && a.status == AppointmentStatus::Obligatory))
            .map(|a| AppointmentView::project(a, &employee, ctx))
            .collect())
    }

    /// Every appointment, for medical staff and RH.
    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<AppointmentView>, AppError> {
        if !ctx.is_medical_staff() && !ctx.is_rh() {
            return Err(AppError::unauthorized(
                "Only medical staff and RH can list all appointments",
            ));
        }

        let items = self.appointments.find_all().await?;
        let mut employees: HashMap<EmployeeId, Employee> = HashMap::new();
        let mut views = Vec::with_capacity(items.len());

        for appt in &items {
            if !employees.contains_key(&appt.employee_id) {
                match self.directory.find_employee(appt.employee_id).await? {
                    Some(employee) => {
                        employees.insert(employee.id, employee);
                    }
                    None => {
                        warn!(
                            appointment_id = %appt.id,
                            employee_id = %appt.employee_id,
                            "Skipping appointment with unknown employee"
                        );
                        continue;
                    }
                }
            }
            if let Some(employee) = employees.get(&appt.employee_id) {
                views.push(AppointmentView::project(appt, employee, ctx));
            }
        }
        Ok(views)
    }

    // ── Helpers ────────────────────────────────────────────────────────

    async fn load(&self, id: AppointmentId) -> Result<(Appointment, Employee), AppError> {
        let appt = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Appointment {id} not found")))?;
        let employee = self.load_employee(appt.employee_id).await?;
        Ok((appt, employee))
    }

    async fn load_employee(&self, id: EmployeeId) -> Result<Employee, AppError> {
        self.directory
            .find_employee(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))
    }

    async fn caller_employee(&self, ctx: &RequestContext) -> Result<Employee, AppError> {
        let employee_id = ctx.employee_id.ok_or_else(|| {
            AppError::unauthorized("No employee profile is linked to this account")
        })?;
        let employee = self.load_employee(employee_id).await?;
        if !ctx.owns(&employee) {
            return Err(AppError::unauthorized(
                "Linked employee profile belongs to another account",
            ));
        }
        Ok(employee)
    }

    async fn employee_user(&self, employee: &Employee) -> Option<User> {
        match self.directory.find_user(employee.user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(employee_id = %employee.id, error = %e, "Employee account lookup failed");
                None
            }
        }
    }

    /// First present value: assigned nurse, current value, actor, fallback.
    async fn resolve_phone(&self, appt: &Appointment, ctx: &RequestContext) -> String {
        if let Some(nurse_id) = appt.nurse_id {
            if let Ok(Some(nurse)) = self.directory.find_user(nurse_id).await {
                if let Some(phone) = non_blank(nurse.phone) {
                    return phone;
                }
            }
        }
        if let Some(phone) = non_blank(appt.medical_service_phone.clone()) {
            return phone;
        }
        if let Ok(Some(actor)) = self.directory.find_user(ctx.user_id).await {
            if let Some(phone) = non_blank(actor.phone) {
                return phone;
            }
        }
        self.config.fallback_phone.clone()
    }

    async fn recipients(
        &self,
        appt: &Appointment,
        employee: &Employee,
        audience: Audience,
    ) -> Option<Vec<User>> {
        match self.resolver.resolve(appt, employee, audience).await {
            Ok(recipients) => Some(recipients),
            Err(e) => {
                warn!(
                    appointment_id = %appt.id,
                    error = %e,
                    "Recipient resolution failed; notifications skipped"
                );
                None
            }
        }
    }

    async fn notify(
        &self,
        ctx: &RequestContext,
        appt: &Appointment,
        employee: &Employee,
        notice: Notice,
    ) {
        let Some(recipients) = self.recipients(appt, employee, notice.audience).await else {
            return;
        };
        let request = DispatchRequest::new(notice.scenario, appt.clone(), employee.clone(), recipients)
            .with_employee_user(self.employee_user(employee).await)
            .with_actor(ctx.user_id)
            .with_actor_override(notice.actor)
            .with_extra_message(notice.extra_message);
        self.submit(request).await;
    }

    async fn submit(&self, request: DispatchRequest) {
        let appointment_id = request.appointment.id;
        let scenario = request.scenario.clone();
        if let Err(e) = self.sink.submit(request).await {
            warn!(
                appointment_id = %appointment_id,
                scenario = ?scenario,
                error = %e,
                "Dispatch request rejected"
            );
        }
    }
}

/// Visit-level wording when the medical service had already set a date or
/// instructions; request-level wording otherwise.
fn cancellation_scenario(previous: AppointmentStatus, appt: &Appointment) -> NotificationScenario {
    let medical_visit = matches!(
        previous,
        AppointmentStatus::PlannedByMedicalStaff | AppointmentStatus::ProposedMedecin
    ) || appt.medical_instructions.is_some();

    if medical_visit {
        NotificationScenario::MedicalVisitCancelled
    } else {
        NotificationScenario::AppointmentCancelled
    }
}

/// Record the acting nurse/doctor on the appointment.
fn assign_staff(appt: &mut Appointment, ctx: &RequestContext, force: bool) {
    if ctx.has_role(Role::Nurse) && (force || appt.nurse_id.is_none()) {
        appt.nurse_id = Some(ctx.user_id);
    }
    if ctx.has_role(Role::Doctor) && (force || appt.doctor_id.is_none()) {
        appt.doctor_id = Some(ctx.user_id);
    }
}
