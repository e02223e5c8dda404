//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can hold. A user holds a set of roles; an RH officer is
/// usually also an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Any staff member with an employee profile.
    Employee,
    /// Occupational-health nurse.
    Nurse,
    /// Occupational doctor.
    Doctor,
    /// Human resources.
    Rh,
    /// Platform administrator.
    Admin,
}

impl Role {
    /// Return the role as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Nurse => "NURSE",
            Self::Doctor => "DOCTOR",
            Self::Rh => "RH",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether this role belongs to the medical service.
    pub fn is_medical(&self) -> bool {
        matches!(self, Self::Nurse | Self::Doctor)
    }

    /// Whether this role still receives email about its own actions.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Nurse | Self::Doctor | Self::Rh)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = oshapp_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "EMPLOYEE" => Ok(Self::Employee),
            "NURSE" => Ok(Self::Nurse),
            "DOCTOR" => Ok(Self::Doctor),
            "RH" => Ok(Self::Rh),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(oshapp_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: employee, nurse, doctor, rh, admin"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_prefix() {
        assert_eq!("ROLE_NURSE".parse::<Role>().unwrap(), Role::Nurse);
        assert_eq!("rh".parse::<Role>().unwrap(), Role::Rh);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_privileged_roles() {
        assert!(Role::Doctor.is_privileged());
        assert!(Role::Rh.is_privileged());
        assert!(!Role::Employee.is_privileged());
        assert!(!Role::Admin.is_privileged());
        assert!(!Role::Rh.is_medical());
    }
}
