//! Guards for the application's areas, each a fixed policy over
//! [`RouteGuard`].

use std::sync::Arc;

use crate::domain::ports::Navigator;
use crate::domain::{
    ADMIN_AREA_ROLES, ADMIN_DASHBOARD, ADMIN_USERS, AccessRequirement, CUSTOMER_DASHBOARD,
    ROLE_CUSTOMER, RoutePath, STAFF_AREA_ROLES,
};

use super::{DenialPolicy, GuardPolicy, RedirectRule, RouteGuard};

impl RouteGuard {
    /// Generic guard: on denial, redirect to the requirement's fallback and
    /// render a notice with a manual link until navigation completes.
    pub fn role_based(requirement: AccessRequirement, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(
            GuardPolicy::Restricted {
                requirement,
                denial: DenialPolicy::RedirectWithNotice,
            },
            navigator,
        )
    }

    /// Admin area: Admin, Owner, or Manager. Denial renders in place.
    pub fn admin(navigator: Arc<dyn Navigator>) -> Self {
        Self::new(
            GuardPolicy::Restricted {
                requirement: AccessRequirement::any_role(ADMIN_AREA_ROLES),
                denial: DenialPolicy::RenderOnly,
            },
            navigator,
        )
    }

    /// Staff area: Staff or Receptionist. Denied admins go to the admin
    /// dashboard, denied customers to the customer dashboard, anyone else
    /// stays put.
    pub fn staff(navigator: Arc<dyn Navigator>) -> Self {
        Self::new(
            GuardPolicy::Restricted {
                requirement: AccessRequirement::any_role(STAFF_AREA_ROLES),
                denial: DenialPolicy::PriorityRedirect(vec![
                    RedirectRule::any_role(ADMIN_AREA_ROLES, ADMIN_DASHBOARD),
                    RedirectRule::any_role([ROLE_CUSTOMER], CUSTOMER_DASHBOARD),
                ]),
            },
            navigator,
        )
    }

    /// Customer area: any resolved identity.
    pub fn customer(navigator: Arc<dyn Navigator>) -> Self {
        Self::new(GuardPolicy::Authenticated, navigator)
    }

    /// Pages shared across areas: any resolved identity.
    pub fn shared(navigator: Arc<dyn Navigator>) -> Self {
        Self::new(GuardPolicy::Authenticated, navigator)
    }

    /// Retired page that now lives at `target`.
    pub fn redirect_only(target: RoutePath, navigator: Arc<dyn Navigator>) -> Self {
        Self::new(GuardPolicy::Redirect { target }, navigator)
    }

    /// Former staff listing, merged into admin user management.
    pub fn deprecated_staff_users(navigator: Arc<dyn Navigator>) -> Self {
        Self::redirect_only(ADMIN_USERS, navigator)
    }
}
