//! Rust structs that represent database table mappings.
//!
//! `User` mirrors a row of the `users` table and is the only type that carries
//! the password hash. Everything that leaves the process goes through
//! `UserProfile`, which has no such field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Roles a dashboard user can register with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    GovernmentOfficer,
    FieldOfficer,
    Farmer,
    Researcher,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::GovernmentOfficer,
        Role::FieldOfficer,
        Role::Farmer,
        Role::Researcher,
    ];

    /// Stored and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::GovernmentOfficer => "government_officer",
            Role::FieldOfficer => "field_officer",
            Role::Farmer => "farmer",
            Role::Researcher => "researcher",
        }
    }

    /// Human-readable name shown on the profile page.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "System Administrator",
            Role::GovernmentOfficer => "Government Officer",
            Role::FieldOfficer => "Field Officer",
            Role::Farmer => "Farmer",
            Role::Researcher => "Researcher/Analyst",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| format!("Unknown role: {}", value))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user; safe to serialize to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Parsed role, `None` for anything outside the known set.
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    /// Name shown on the profile page; unknown roles are shown as stored.
    pub fn role_display_name(&self) -> &str {
        self.role()
            .map(|role| role.display_name())
            .unwrap_or(self.role.as_str())
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            department: user.department,
            region: user.region,
            district: user.district,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fully prepared row for insertion; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub department: Option<String>,
    pub region: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub(crate) fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.as_str().to_string(),
            department: self.department,
            region: Some(self.region),
            district: None,
            phone: Some(self.phone),
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Complete replacement of the editable profile columns.
///
/// Every optional field is written as given: `None` stores NULL, it never
/// means "keep the previous value".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub region: Option<String>,
    pub district: Option<String>,
}

impl ProfileUpdate {
    pub(crate) fn apply_to(&self, user: &mut User, updated_at: DateTime<Utc>) {
        user.name = self.name.clone();
        user.phone = self.phone.clone();
        user.department = self.department.clone();
        user.region = self.region.clone();
        user.district = self.district.clone();
        user.updated_at = updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_profile_never_serializes_password() {
        let now = Utc::now();
        let user = User {
            id: "u1".into(),
            name: "A".into(),
            email: "a@x.com".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            role: "farmer".into(),
            department: None,
            region: Some("Tamil Nadu".into()),
            district: None,
            phone: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(UserProfile::from(user)).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("password_hash"));
        assert!(!object.contains_key("password"));
        assert_eq!(object["region"], "Tamil Nadu");
        assert!(object["district"].is_null());
    }

    #[test]
    fn test_role_display_names() {
        let now = Utc::now();
        let profile = |role: &str| UserProfile {
            id: "u1".into(),
            name: "A".into(),
            email: "a@x.com".into(),
            role: role.into(),
            department: None,
            region: None,
            district: None,
            phone: None,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(profile("admin").role(), Some(Role::Admin));
        assert_eq!(profile("admin").role_display_name(), "System Administrator");
        assert_eq!(profile("government_officer").role_display_name(), "Government Officer");
        assert_eq!(profile("researcher").role_display_name(), "Researcher/Analyst");
        assert_eq!(profile("visitor").role(), None);
        assert_eq!(profile("visitor").role_display_name(), "visitor");
    }
}
