//! Identity snapshot handed over by the identity provider.
//!
//! The core never mutates an identity: a login, logout, or refresh replaces
//! the whole snapshot. Role and permission names are compared verbatim.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role granting full administrative access.
pub const ROLE_ADMIN: &str = "Admin";
/// Role held by tenant owners.
pub const ROLE_OWNER: &str = "Owner";
/// Role held by tenant managers.
pub const ROLE_MANAGER: &str = "Manager";
/// Role held by service staff.
pub const ROLE_STAFF: &str = "Staff";
/// Role held by front-desk receptionists.
pub const ROLE_RECEPTIONIST: &str = "Receptionist";
/// Role held by booking customers.
pub const ROLE_CUSTOMER: &str = "Customer";

/// Roles admitted to the admin area.
pub const ADMIN_AREA_ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_OWNER, ROLE_MANAGER];
/// Roles admitted to the staff area.
pub const STAFF_AREA_ROLES: [&str; 2] = [ROLE_STAFF, ROLE_RECEPTIONIST];

/// Validation errors returned when constructing identity values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityValidationError {
    /// Identifier was empty once trimmed.
    #[error("identity id must not be empty")]
    EmptyId,
    /// Identifier carried leading or trailing whitespace.
    #[error("identity id must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Opaque identifier assigned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityId(String);

impl IdentityId {
    /// Validate and construct an [`IdentityId`].
    ///
    /// # Examples
    /// ```
    /// use booking_client::domain::IdentityId;
    ///
    /// let id = IdentityId::new("user-42").expect("valid id");
    /// assert_eq!(id.as_ref(), "user-42");
    /// assert!(IdentityId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let raw = id.into();
        if raw.trim().is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(IdentityValidationError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<IdentityId> for String {
    fn from(value: IdentityId) -> Self {
        value.0
    }
}

impl TryFrom<String> for IdentityId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authenticated identity at a point in time.
///
/// ## Invariants
/// - Roles and permissions are fixed for the lifetime of the snapshot.
/// - A newer snapshot fully replaces an older one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySnapshot {
    id: IdentityId,
    #[serde(default)]
    roles: BTreeSet<String>,
    #[serde(default)]
    permissions: BTreeSet<String>,
}

impl IdentitySnapshot {
    /// Build a snapshot from an identifier plus role and permission names.
    pub fn new<R, P>(id: IdentityId, roles: R, permissions: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            id,
            roles: roles.into_iter().map(Into::into).collect(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    /// Identifier of the authenticated user.
    pub fn id(&self) -> &IdentityId {
        &self.id
    }

    /// Role names held by the user.
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Permission names granted to the user.
    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    /// Whether the user holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether the user holds any of `roles`.
    pub fn has_any_role<'a, I>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        roles.into_iter().any(|role| self.has_role(role))
    }

    /// Whether the user holds any of `permissions`.
    pub fn has_any_permission<'a, I>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        permissions
            .into_iter()
            .any(|permission| self.permissions.contains(permission))
    }
}
