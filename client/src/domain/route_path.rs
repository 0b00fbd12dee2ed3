//! Navigation targets used by route guards.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// Validation errors returned by [`RoutePath::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutePathValidationError {
    /// Path did not start with `/`.
    #[error("route path must start with '/'")]
    NotAbsolute,
    /// Path contained whitespace.
    #[error("route path must not contain whitespace")]
    ContainsWhitespace,
}

/// Absolute in-app path such as `/admin/dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePath(Cow<'static, str>);

/// Fallback used when a requirement does not name one.
pub const DEFAULT_FALLBACK: RoutePath = RoutePath(Cow::Borrowed("/dashboard"));
/// Landing page of the admin area.
pub const ADMIN_DASHBOARD: RoutePath = RoutePath(Cow::Borrowed("/admin/dashboard"));
/// Landing page of the customer area.
pub const CUSTOMER_DASHBOARD: RoutePath = RoutePath(Cow::Borrowed("/customer/dashboard"));
/// User management page that absorbed the former staff listing.
pub const ADMIN_USERS: RoutePath = RoutePath(Cow::Borrowed("/admin/users"));

impl RoutePath {
    /// Validate and construct a route path.
    ///
    /// # Examples
    /// ```
    /// use booking_client::domain::RoutePath;
    ///
    /// let path = RoutePath::new("/staff/schedule").expect("valid path");
    /// assert_eq!(path.as_str(), "/staff/schedule");
    /// assert!(RoutePath::new("staff").is_err());
    /// ```
    pub fn new(path: impl Into<String>) -> Result<Self, RoutePathValidationError> {
        let raw = path.into();
        if !raw.starts_with('/') {
            return Err(RoutePathValidationError::NotAbsolute);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(RoutePathValidationError::ContainsWhitespace);
        }
        Ok(Self(Cow::Owned(raw)))
    }

    /// Borrow the path as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl Default for RoutePath {
    fn default() -> Self {
        DEFAULT_FALLBACK
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
