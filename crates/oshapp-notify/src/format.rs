//! Shared formatting helpers for notification content.

use chrono::NaiveDateTime;

use oshapp_entity::appointment::{Appointment, AppointmentType, VisitMode};
use oshapp_entity::user::{Employee, User};

/// `dd/MM/yyyy HH:mm`.
pub const DATE_TIME: &str = "%d/%m/%Y %H:%M";

/// Placeholder for empty free-text fields.
pub const NONE_TEXT: &str = "Néant";

/// Name used when the employee has neither a full name nor an account.
pub const ANONYMOUS_EMPLOYEE: &str = "Collaborateur";

/// Separator between message segments.
pub const SEP: &str = " – ";

/// Format a date, or an empty string.
pub fn date_time(value: Option<NaiveDateTime>) -> String {
    value
        .map(|d| d.format(DATE_TIME).to_string())
        .unwrap_or_default()
}

/// Split a formatted date into its date and time parts.
pub fn split_date_time(value: Option<NaiveDateTime>) -> (String, String) {
    match value {
        Some(d) => (d.format("%d/%m/%Y").to_string(), d.format("%H:%M").to_string()),
        None => (String::new(), String::new()),
    }
}

/// Join a base URL and a path, with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Front-end deep link for an action on an appointment.
pub fn action_link(base: &str, appointment: &Appointment, action: &str) -> String {
    let mut path = format!("appointment_action?id={}", appointment.id);
    if !action.trim().is_empty() {
        path.push_str("&action=");
        path.push_str(action);
    }
    join_url(base, &path)
}

/// Employee display name: full name, else account email, else a placeholder.
pub fn employee_name(employee: &Employee, user: Option<&User>) -> String {
    employee
        .full_name()
        .or_else(|| user.map(|u| u.email.clone()).filter(|e| !e.trim().is_empty()))
        .unwrap_or_else(|| ANONYMOUS_EMPLOYEE.to_string())
}

/// Employee account email, or an empty string.
pub fn employee_email(user: Option<&User>) -> String {
    user.map(|u| u.email.trim().to_string()).unwrap_or_default()
}

/// `Name (email)`, or just the name when there is no email.
pub fn name_with_email(name: &str, email: &str) -> String {
    if email.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({email})")
    }
}

/// `Name – email`, or just the name when there is no email.
pub fn name_dash_email(name: &str, email: &str) -> String {
    if email.is_empty() {
        name.to_string()
    } else {
        format!("{name}{SEP}{email}")
    }
}

/// Free text or the "Néant" placeholder.
pub fn or_none(text: Option<&str>) -> &str {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(NONE_TEXT)
}

/// Visit mode text; on-site when unspecified.
pub fn mode_text(mode: Option<VisitMode>) -> &'static str {
    mode.unwrap_or(VisitMode::InPerson).label()
}

/// Append a non-blank extra message after a separator.
pub fn with_extra(message: String, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|e| !e.is_empty()) {
        Some(extra) => format!("{message}{SEP}{extra}"),
        None => message,
    }
}

/// Subject followed by the most authoritative date, when there is one.
pub fn enrich_subject(base: &str, appointment: &Appointment) -> String {
    match appointment.effective_date() {
        Some(date) => format!("{base}{SEP}{}", date.format(DATE_TIME)),
        None => base.to_string(),
    }
}

/// Whether the employee originated the visit.
///
/// SPONTANEOUS visits always are; periodic, special-surveillance and
/// doctor-called visits never are. For the remaining types the creator
/// decides.
pub fn is_employee_initiated(appointment: &Appointment, employee: &Employee) -> bool {
    match appointment.kind {
        AppointmentType::Spontaneous => true,
        AppointmentType::Periodic
        | AppointmentType::SurveillanceParticuliere
        | AppointmentType::MedicalCall => false,
        AppointmentType::PreRecruitment | AppointmentType::ReturnToWork | AppointmentType::Other => {
            appointment.created_by == Some(employee.user_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use oshapp_core::types::id::UserId;
    use oshapp_entity::appointment::AppointmentStatus;
    use oshapp_entity::user::Role;

    #[test]
    fn test_join_url_slashes() {
        assert_eq!(join_url("http://app/", "x?id=1"), "http://app/x?id=1");
        assert_eq!(join_url("http://app", "/x"), "http://app/x");
        assert_eq!(join_url("http://app", "x"), "http://app/x");
    }

    #[test]
    fn test_action_link() {
        let employee = Employee::new(UserId::new(), "Sara", "Alaoui");
        let appt = Appointment::new(
            employee.id,
            AppointmentType::Spontaneous,
            AppointmentStatus::RequestedEmployee,
            employee.user_id,
        );
        let link = action_link("http://localhost:3000/", &appt, "confirm");
        assert_eq!(
            link,
            format!("http://localhost:3000/appointment_action?id={}&action=confirm", appt.id)
        );
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 12).and_then(|d| d.and_hms_opt(14, 0, 0));
        assert_eq!(date_time(d), "12/01/2025 14:00");
        assert_eq!(split_date_time(d), ("12/01/2025".into(), "14:00".into()));
        assert_eq!(date_time(None), "");
    }

    #[test]
    fn test_employee_name_fallbacks() {
        let user = User::new("sara@corp.test", [Role::Employee]);
        let named = Employee::new(user.id, "Sara", "Alaoui");
        assert_eq!(employee_name(&named, Some(&user)), "Sara Alaoui");

        let unnamed = Employee::new(user.id, "", "Alaoui");
        assert_eq!(employee_name(&unnamed, Some(&user)), "sara@corp.test");
        assert_eq!(employee_name(&unnamed, None), ANONYMOUS_EMPLOYEE);
    }

    #[test]
    fn test_employee_initiated_heuristic() {
        let employee = Employee::new(UserId::new(), "Sara", "Alaoui");
        let rh = UserId::new();
        let mut appt = Appointment::new(
            employee.id,
            AppointmentType::ReturnToWork,
            AppointmentStatus::RequestedEmployee,
            employee.user_id,
        );
        assert!(is_employee_initiated(&appt, &employee));

        appt.created_by = Some(rh);
        assert!(!is_employee_initiated(&appt, &employee));

        appt.kind = AppointmentType::Spontaneous;
        assert!(is_employee_initiated(&appt, &employee));

        appt.kind = AppointmentType::Periodic;
        appt.created_by = Some(employee.user_id);
        assert!(!is_employee_initiated(&appt, &employee));
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(or_none(Some("  ")), NONE_TEXT);
        assert_eq!(or_none(Some("dos")), "dos");
        assert_eq!(with_extra("a".into(), Some("b")), "a – b");
        assert_eq!(with_extra("a".into(), Some(" ")), "a");
        assert_eq!(name_with_email("Sara", ""), "Sara");
    }
}
