//! Recipient resolution rules: determines who hears about an appointment event.

use std::collections::HashSet;
use std::sync::Arc;

use oshapp_core::error::AppError;
use oshapp_core::types::id::UserId;
use oshapp_database::repositories::DirectoryRepository;
use oshapp_entity::appointment::Appointment;
use oshapp_entity::user::{Employee, Role, User};

/// Which audience an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Employee, assigned staff, managers, all nurses, doctors and RH.
    Default,
    /// Employee confirms or cancels an obligatory visit: RH and medical staff.
    ObligatoryEmployeeAction,
    /// Slot proposed on an obligatory visit: employee, RH and the proposer.
    ObligatoryProposal {
        /// The proposing staff member.
        proposer: UserId,
    },
    /// RH created an obligatory visit: medical staff only.
    ObligatoryCreation,
    /// Slot proposed on a regular visit: the default audience minus the proposer.
    Proposal {
        /// The proposing staff member.
        proposer: UserId,
    },
}

/// Resolves which users should receive notifications for an appointment.
///
/// Role membership is queried against the directory on every call.
#[derive(Debug, Clone)]
pub struct RecipientResolver {
    /// Directory for users and role lookups.
    directory: Arc<dyn DirectoryRepository>,
}

impl RecipientResolver {
    /// Creates a new resolver.
    pub fn new(directory: Arc<dyn DirectoryRepository>) -> Self {
        Self { directory }
    }

    /// Resolve the deduplicated recipient list for an audience.
    pub async fn resolve(
        &self,
        appointment: &Appointment,
        employee: &Employee,
        audience: Audience,
    ) -> Result<Vec<User>, AppError> {
        let mut set = RecipientSet::default();

        match audience {
            Audience::Default => {
                self.add_default(&mut set, appointment, employee).await?;
            }
            Audience::Proposal { proposer } => {
                self.add_default(&mut set, appointment, employee).await?;
                set.remove(proposer);
            }
            Audience::ObligatoryEmployeeAction => {
                set.extend(self.role(Role::Rh).await?);
                set.extend(self.role(Role::Nurse).await?);
                set.extend(self.role(Role::Doctor).await?);
            }
            Audience::ObligatoryProposal { proposer } => {
                set.extend(self.users(&[employee.user_id]).await?);
                set.extend(self.role(Role::Rh).await?);
                set.extend(self.users(&[proposer]).await?);
            }
            Audience::ObligatoryCreation => {
                set.extend(self.role(Role::Nurse).await?);
                set.extend(self.role(Role::Doctor).await?);
            }
        }

        Ok(set.into_vec())
    }

    async fn add_default(
        &self,
        set: &mut RecipientSet,
        appointment: &Appointment,
        employee: &Employee,
    ) -> Result<(), AppError> {
        let direct: Vec<UserId> = std::iter::once(employee.user_id)
            .chain(appointment.nurse_id)
            .chain(appointment.doctor_id)
            .chain(employee.managers())
            .collect();

        set.extend(self.users(&direct).await?);
        set.extend(self.role(Role::Nurse).await?);
        set.extend(self.role(Role::Doctor).await?);
        set.extend(self.role(Role::Rh).await?);
        Ok(())
    }

    async fn users(&self, ids: &[UserId]) -> Result<Vec<User>, AppError> {
        self.directory
            .find_users(ids)
            .await
            .map_err(|e| AppError::internal(format!("Recipient lookup failed: {e}")))
    }

    async fn role(&self, role: Role) -> Result<Vec<User>, AppError> {
        self.directory
            .find_users_by_role(role)
            .await
            .map_err(|e| AppError::internal(format!("Role lookup failed for {role}: {e}")))
    }

    /// Split recipients into (RH, everyone else).
    pub fn split_rh(recipients: Vec<User>) -> (Vec<User>, Vec<User>) {
        recipients.into_iter().partition(User::is_rh)
    }
}

/// Insertion-ordered set of users keyed by id.
#[derive(Debug, Default)]
struct RecipientSet {
    seen: HashSet<UserId>,
    users: Vec<User>,
}

impl RecipientSet {
    fn extend(&mut self, users: impl IntoIterator<Item = User>) {
        for user in users {
            if self.seen.insert(user.id) {
                self.users.push(user);
            }
        }
    }

    fn remove(&mut self, id: UserId) {
        if self.seen.remove(&id) {
            self.users.retain(|u| u.id != id);
        }
    }

    fn into_vec(self) -> Vec<User> {
        self.users
    }
}
