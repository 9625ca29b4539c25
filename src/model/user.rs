use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Access role attached to a shop account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular shopper.
    Customer,
    /// Customer care agent.
    Agent,
    /// Full administrative access.
    Admin,
}

impl Role {
    /// String form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Agent => "agent",
            Self::Admin => "admin",
        }
    }

    /// Agents and admins count as staff.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Agent | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "agent" => Ok(Self::Agent),
            "admin" => Ok(Self::Admin),
            _ => Err(Error::ParseError(format!("Unknown user role: {:?}", s))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

impl From<entity::shop_user::Model> for UserDto {
    fn from(user: entity::shop_user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterDto {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Role;

    /// Expect every role to round-trip through its string form
    #[test]
    fn role_round_trips() {
        for role in [Role::Customer, Role::Agent, Role::Admin] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    /// Expect only agents and admins to count as staff
    #[test]
    fn staff_predicate() {
        assert!(!Role::Customer.is_staff());
        assert!(Role::Agent.is_staff());
        assert!(Role::Admin.is_staff());
    }
}
