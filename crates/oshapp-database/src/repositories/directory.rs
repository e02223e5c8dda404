//! User and employee directory contract.

use async_trait::async_trait;

use oshapp_core::result::AppResult;
use oshapp_core::types::id::{EmployeeId, UserId};
use oshapp_entity::user::{Employee, Role, User};

/// Read access to HR master data. Role membership is queried on every call;
/// implementations must not serve stale role sets.
#[async_trait]
pub trait DirectoryRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by id.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find several users; unknown ids are skipped.
    async fn find_users(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// All active users holding the role.
    async fn find_users_by_role(&self, role: Role) -> AppResult<Vec<User>>;

    /// Find an employee profile by id.
    async fn find_employee(&self, id: EmployeeId) -> AppResult<Option<Employee>>;

    /// Find the employee profile linked to a user account.
    async fn find_employee_by_user(&self, user_id: UserId) -> AppResult<Option<Employee>>;
}
