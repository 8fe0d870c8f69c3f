use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Department;
use crate::i18n::{Language, Localized};

/// Kind of principal signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Citizen who submits and follows reports
    Regular,
    /// Department employee who triages reports
    Government,
}

impl Role {
    pub fn label(self, language: Language) -> &'static str {
        let label = match self {
            Role::Regular => Localized::new("Regular user", "مستخدم عادي"),
            Role::Government => Localized::new("Government user", "مستخدم حكومي"),
        };
        label.get(language)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Regular => write!(f, "regular"),
            Role::Government => write!(f, "government"),
        }
    }
}

/// The signed-in principal.
///
/// Role and department are private so that a government user always carries
/// a department and a regular user never does. Stored records go through
/// [`StoredUser`] and are rejected when they break that rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredUser")]
pub struct User {
    pub id: String,
    /// Email address, or the employee code used to sign in.
    pub email: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl User {
    pub fn regular(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: Role::Regular,
            username: None,
            national_id: None,
            phone_number: None,
            department: None,
            employee_id: None,
        }
    }

    pub fn government(
        id: impl Into<String>,
        email: impl Into<String>,
        department: Department,
    ) -> Self {
        Self {
            role: Role::Government,
            department: Some(department),
            ..Self::regular(id, email)
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn department(&self) -> Option<&Department> {
        self.department.as_ref()
    }

    pub fn is_government(&self) -> bool {
        self.role == Role::Government
    }

    /// Name to show in listings.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.email)
    }
}

/// A user record as read from storage, before the role check.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    id: String,
    email: String,
    role: Role,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    national_id: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    department: Option<Department>,
    #[serde(default)]
    employee_id: Option<String>,
}

impl TryFrom<StoredUser> for User {
    type Error = String;

    fn try_from(stored: StoredUser) -> Result<Self, Self::Error> {
        let mut user = match (stored.role, stored.department) {
            (Role::Regular, None) => User::regular(stored.id, stored.email),
            (Role::Government, Some(department)) => {
                User::government(stored.id, stored.email, department)
            }
            (Role::Regular, Some(_)) => {
                return Err("regular user must not have a department".to_string())
            }
            (Role::Government, None) => {
                return Err("government user requires a department".to_string())
            }
        };
        user.username = stored.username;
        user.national_id = stored.national_id;
        user.phone_number = stored.phone_number;
        user.employee_id = stored.employee_id;
        Ok(user)
    }
}

/// Fresh opaque user identifier.
pub fn new_user_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_hold_department_invariant() {
        let citizen = User::regular("u1", "a@b.com");
        assert_eq!(citizen.role(), Role::Regular);
        assert!(citizen.department().is_none());

        let official = User::government("u2", "EMP-001", Department::Health);
        assert_eq!(official.role(), Role::Government);
        assert_eq!(official.department(), Some(&Department::Health));
    }

    #[test]
    fn test_serialized_shape() {
        let official = User::government("u2", "EMP-001", Department::PublicWorks);
        let json = serde_json::to_value(&official).unwrap();
        assert_eq!(json["role"], "government");
        assert_eq!(json["department"], "publicWorks");
        assert!(json.get("nationalId").is_none());

        let citizen = User::regular("u1", "a@b.com");
        let json = serde_json::to_value(&citizen).unwrap();
        assert!(json.get("department").is_none());
    }

    #[test]
    fn test_stored_record_round_trips_through_role_check() {
        let mut official = User::government("u2", "EMP-001", Department::Health);
        official.employee_id = Some("EMP-001".to_string());
        let json = serde_json::to_string(&official).unwrap();
        assert_eq!(serde_json::from_str::<User>(&json).unwrap(), official);
    }

    #[test]
    fn test_stored_record_with_mismatched_department_is_rejected() {
        let orphan = r#"{"id":"u1","email":"EMP-001","role":"government"}"#;
        assert!(serde_json::from_str::<User>(orphan).is_err());

        let stray = r#"{"id":"u2","email":"a@b.com","role":"regular","department":"health"}"#;
        assert!(serde_json::from_str::<User>(stray).is_err());
    }

    #[test]
    fn test_display_name_prefers_username() {
        let mut user = User::regular("u1", "a@b.com");
        assert_eq!(user.display_name(), "a@b.com");
        user.username = Some("sara".to_string());
        assert_eq!(user.display_name(), "sara");
    }
}
