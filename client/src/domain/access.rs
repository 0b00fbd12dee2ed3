//! Access predicate evaluation.
//!
//! A requirement is checked against an identity snapshot on two axes,
//! permissions and roles. Each axis is disjunctive (any listed name is
//! enough) and the axes are alternatives: passing either one allows access.
//! An empty role list counts as a passed role axis, so a requirement without
//! roles admits every resolved identity. An empty permission list is not
//! consulted, which keeps role-only requirements able to deny.

use std::collections::BTreeSet;

use super::identity::IdentitySnapshot;
use super::route_path::RoutePath;

/// Declarative access rule attached to a guarded area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessRequirement {
    required_permissions: BTreeSet<String>,
    allowed_roles: BTreeSet<String>,
    fallback_route: RoutePath,
}

impl AccessRequirement {
    /// Requirement admitting any resolved identity, falling back to
    /// `/dashboard`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requirement satisfied by holding any of `roles`.
    ///
    /// # Examples
    /// ```
    /// use booking_client::domain::{AccessRequirement, ADMIN_AREA_ROLES};
    ///
    /// let requirement = AccessRequirement::any_role(ADMIN_AREA_ROLES);
    /// assert!(requirement.allowed_roles().contains("Owner"));
    /// assert_eq!(requirement.fallback_route().as_str(), "/dashboard");
    /// ```
    pub fn any_role<I>(roles: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new().with_roles(roles)
    }

    /// Add permission names; holding any of them satisfies the permission
    /// axis.
    #[must_use]
    pub fn with_permissions<I>(mut self, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.required_permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Add role names; holding any of them satisfies the role axis.
    #[must_use]
    pub fn with_roles<I>(mut self, roles: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.allowed_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Replace the route used when access is denied.
    #[must_use]
    pub fn with_fallback(mut self, fallback_route: RoutePath) -> Self {
        self.fallback_route = fallback_route;
        self
    }

    /// Permission names accepted by this requirement.
    pub fn required_permissions(&self) -> &BTreeSet<String> {
        &self.required_permissions
    }

    /// Role names accepted by this requirement.
    pub fn allowed_roles(&self) -> &BTreeSet<String> {
        &self.allowed_roles
    }

    /// Route to send denied identities to.
    pub fn fallback_route(&self) -> &RoutePath {
        &self.fallback_route
    }

    fn permission_axis(&self, identity: &IdentitySnapshot) -> Option<bool> {
        (!self.required_permissions.is_empty()).then(|| {
            identity.has_any_permission(self.required_permissions.iter().map(String::as_str))
        })
    }

    fn role_axis(&self, identity: &IdentitySnapshot) -> Option<bool> {
        (!self.allowed_roles.is_empty())
            .then(|| identity.has_any_role(self.allowed_roles.iter().map(String::as_str)))
    }

    /// Whether a resolved identity satisfies this requirement.
    pub fn is_satisfied_by(&self, identity: &IdentitySnapshot) -> bool {
        match (self.permission_axis(identity), self.role_axis(identity)) {
            (_, None) => true,
            (None, Some(role_matched)) => role_matched,
            (Some(permitted), Some(role_matched)) => permitted || role_matched,
        }
    }
}

/// Outcome of evaluating a requirement against the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The identity provider has not resolved a session yet.
    Pending,
    /// The identity satisfies the requirement.
    Allow,
    /// The identity fails the requirement; carries the fallback route.
    Deny(RoutePath),
}

/// Evaluate `requirement` against `identity`.
///
/// Total and side-effect free, so it is safe to call on every render.
///
/// # Examples
/// ```
/// use booking_client::domain::{
///     evaluate, AccessRequirement, GuardDecision, IdentityId, IdentitySnapshot,
/// };
///
/// let requirement = AccessRequirement::any_role(["Staff"]);
/// assert_eq!(evaluate(None, &requirement), GuardDecision::Pending);
///
/// let id = IdentityId::new("u-1").expect("valid id");
/// let staff = IdentitySnapshot::new(id, ["Staff"], Vec::<String>::new());
/// assert_eq!(evaluate(Some(&staff), &requirement), GuardDecision::Allow);
/// ```
pub fn evaluate(
    identity: Option<&IdentitySnapshot>,
    requirement: &AccessRequirement,
) -> GuardDecision {
    match identity {
        None => GuardDecision::Pending,
        Some(identity) if requirement.is_satisfied_by(identity) => GuardDecision::Allow,
        Some(_) => GuardDecision::Deny(requirement.fallback_route().clone()),
    }
}
