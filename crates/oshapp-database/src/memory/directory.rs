//! In-memory user and employee directory.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use oshapp_core::result::AppResult;
use oshapp_core::types::id::{EmployeeId, UserId};
use oshapp_entity::user::{Employee, Role, User};

use crate::repositories::DirectoryRepository;

/// Directory backed by concurrent maps, seeded by the caller.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    users: Arc<DashMap<UserId, User>>,
    employees: Arc<DashMap<EmployeeId, Employee>>,
    /// User id → employee id.
    by_user: Arc<DashMap<UserId, EmployeeId>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn insert_user(&self, user: User) -> User {
        self.users.insert(user.id, user.clone());
        user
    }

    /// Add or replace an employee profile.
    pub fn insert_employee(&self, employee: Employee) -> Employee {
        self.by_user.insert(employee.user_id, employee.id);
        self.employees.insert(employee.id, employee.clone());
        employee
    }

    /// Replace a user's role set.
    pub fn set_roles(&self, user_id: UserId, roles: impl IntoIterator<Item = Role>) -> bool {
        match self.users.get_mut(&user_id) {
            Some(mut user) => {
                user.roles = roles.into_iter().collect();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl DirectoryRepository for MemoryDirectory {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_users(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| u.value().clone()))
            .collect())
    }

    async fn find_users_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| u.active && u.has_role(role))
            .map(|u| u.value().clone())
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn find_employee(&self, id: EmployeeId) -> AppResult<Option<Employee>> {
        Ok(self.employees.get(&id).map(|e| e.value().clone()))
    }

    async fn find_employee_by_user(&self, user_id: UserId) -> AppResult<Option<Employee>> {
        let employee_id = match self.by_user.get(&user_id) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.find_employee(employee_id).await
    }
}
