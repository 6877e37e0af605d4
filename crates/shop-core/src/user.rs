//! # User Types
//!
//! Account, role and address types. The credential hash never leaves the
//! process: it is skipped during serialization so every serialized user is
//! already sanitized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ShopError, ShopResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Returns the wire tag for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Parse a role tag
    pub fn parse(s: &str) -> ShopResult<Self> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ShopError::InvalidRequest(format!("unknown role: {}", other))),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// A shipping address on file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Optional label ("home", "office")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub line1: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user id
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// Lowercased, unique across accounts
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Argon2 credential hash. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role tag
    #[serde(default)]
    pub role: Role,

    /// Shipping addresses on file
    #[serde(default)]
    pub addresses: Vec<Address>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with a pre-hashed credential
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into().to_lowercase(),
            phone: None,
            password_hash: password_hash.into(),
            role,
            addresses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial profile update, merged field-by-field onto the user record.
/// Email, role and credentials are deliberately absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Option<Vec<Address>>,
}

impl ProfileUpdate {
    /// Apply the present fields onto a user record
    pub fn apply(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(addresses) = &self.addresses {
            user.addresses = addresses.clone();
        }
        user.updated_at = Utc::now();
    }

    /// Returns true when no field is present
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.addresses.is_none()
    }
}

/// Validate an email address shape.
///
/// Intentionally shallow: one `@`, non-empty local part, and a domain with
/// a dot. The mail provider is the real validator.
pub fn validate_email(email: &str) -> ShopResult<()> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(ShopError::InvalidRequest(format!(
            "invalid email address: {}",
            email
        )));
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> ShopResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ShopError::InvalidRequest(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_lowercased() {
        let user = User::new("Ada", "Lovelace", "Ada@Example.COM", "hash", Role::User);
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("Ada", "Lovelace", "ada@example.com", "secret-hash", Role::User);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_profile_update_partial_merge() {
        let mut user = User::new("Ada", "Lovelace", "ada@example.com", "hash", Role::User);
        let update = ProfileUpdate {
            phone: Some("+91 98765 43210".to_string()),
            ..Default::default()
        };
        update.apply(&mut user);

        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.phone.as_deref(), Some("+91 98765 43210"));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("a b@x.com").is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("user").unwrap(), Role::User);
        assert!(Role::parse("root").is_err());
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
