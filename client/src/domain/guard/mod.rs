//! Route guards: decide whether a guarded area renders, shows a denial, or
//! navigates elsewhere.
//!
//! Every guard is the same state machine configured with a [`GuardPolicy`].
//! The guard recomputes its view from the current identity on every call to
//! [`RouteGuard::observe`]; the only memory it keeps is which redirect it
//! has already issued, so repeated evaluation never navigates twice for the
//! same denial.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::Navigator;
use crate::domain::{AccessRequirement, GuardDecision, IdentitySnapshot, RoutePath, evaluate};

mod areas;
mod session;

pub use session::GuardSession;

/// Message rendered by guards that redirect on denial.
pub const PERMISSION_DENIED_MESSAGE: &str = "You don't have permission to access this page.";
/// Title rendered by guards that deny in place.
pub const ACCESS_DENIED_TITLE: &str = "Access Denied";
/// Message rendered by guards that deny in place.
pub const ACCESS_DENIED_MESSAGE: &str = "You do not have permission to view this area.";

/// Observable phase of a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Identity unresolved, or a redirect-only guard waiting on navigation.
    Pending,
    /// Children are rendered.
    Rendered,
    /// The identity failed the requirement.
    Denied,
}

/// Denial feedback shown in place of the guarded content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenialNotice {
    title: &'static str,
    message: &'static str,
    fallback: Option<RoutePath>,
}

impl DenialNotice {
    /// Heading of the notice.
    pub fn title(&self) -> &str {
        self.title
    }

    /// Explanation shown to the user.
    pub fn message(&self) -> &str {
        self.message
    }

    /// Target of the manual "go to fallback" link, when the guard offers one.
    pub fn fallback(&self) -> Option<&RoutePath> {
        self.fallback.as_ref()
    }
}

/// What a guard renders for the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    /// Neutral loading indicator.
    Loading,
    /// The guarded content, unchanged.
    Children,
    /// Denial notice rendered in place.
    AccessDenied(DenialNotice),
    /// Nothing at all.
    Empty,
}

/// Conditional redirect consulted by [`DenialPolicy::PriorityRedirect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    requirement: AccessRequirement,
    target: RoutePath,
}

impl RedirectRule {
    /// Redirect to `target` when the identity holds any of `roles`.
    pub fn any_role<I>(roles: I, target: RoutePath) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            requirement: AccessRequirement::any_role(roles),
            target,
        }
    }

    /// Navigation target of this rule.
    pub fn target(&self) -> &RoutePath {
        &self.target
    }

    fn matches(&self, identity: &IdentitySnapshot) -> bool {
        self.requirement.is_satisfied_by(identity)
    }
}

/// How a guard reacts once an identity is denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialPolicy {
    /// Navigate to the requirement's fallback and render a notice with a
    /// manual link meanwhile.
    RedirectWithNotice,
    /// Render a notice in place; never navigate.
    RenderOnly,
    /// Navigate to the first rule matching the identity; render nothing when
    /// no rule matches.
    PriorityRedirect(Vec<RedirectRule>),
}

/// Configuration of a [`RouteGuard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Evaluate `requirement` and apply `denial` when it fails.
    Restricted {
        /// Access rule for the area.
        requirement: AccessRequirement,
        /// Reaction to a failed rule.
        denial: DenialPolicy,
    },
    /// Any resolved identity may enter.
    Authenticated,
    /// Always navigate to `target`; used for merged or retired pages.
    Redirect {
        /// Page that replaced the guarded one.
        target: RoutePath,
    },
}

/// Guard enforcing a [`GuardPolicy`] for one guarded region.
pub struct RouteGuard {
    policy: GuardPolicy,
    navigator: Arc<dyn Navigator>,
    state: GuardState,
    issued_redirect: Option<RoutePath>,
}

impl RouteGuard {
    /// Build a guard from an explicit policy.
    pub fn new(policy: GuardPolicy, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            policy,
            navigator,
            state: GuardState::Pending,
            issued_redirect: None,
        }
    }

    /// Policy this guard enforces.
    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Phase reached by the latest evaluation.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Recompute the view for `identity`, issuing at most one navigation per
    /// transition into a redirecting outcome.
    pub fn observe(&mut self, identity: Option<&IdentitySnapshot>) -> GuardView {
        match &self.policy {
            GuardPolicy::Redirect { target } => {
                let target = target.clone();
                self.state = GuardState::Pending;
                self.redirect_once(&target);
                GuardView::Loading
            }
            GuardPolicy::Authenticated => match identity {
                None => self.settle(GuardState::Pending, GuardView::Loading),
                Some(_) => self.settle(GuardState::Rendered, GuardView::Children),
            },
            GuardPolicy::Restricted { requirement, .. } => {
                match evaluate(identity, requirement) {
                    GuardDecision::Pending => self.settle(GuardState::Pending, GuardView::Loading),
                    GuardDecision::Allow => self.settle(GuardState::Rendered, GuardView::Children),
                    GuardDecision::Deny(fallback) => match identity {
                        Some(identity) => self.deny(identity, fallback),
                        None => self.settle(GuardState::Pending, GuardView::Loading),
                    },
                }
            }
        }
    }

    fn settle(&mut self, state: GuardState, view: GuardView) -> GuardView {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "route guard transition");
        }
        self.state = state;
        self.issued_redirect = None;
        view
    }

    fn deny(&mut self, identity: &IdentitySnapshot, fallback: RoutePath) -> GuardView {
        if self.state != GuardState::Denied {
            debug!(identity = %identity.id(), "route guard denied access");
        }
        self.state = GuardState::Denied;

        let GuardPolicy::Restricted { denial, .. } = &self.policy else {
            return GuardView::Empty;
        };
        match denial {
            DenialPolicy::RedirectWithNotice => {
                self.redirect_once(&fallback);
                GuardView::AccessDenied(DenialNotice {
                    title: ACCESS_DENIED_TITLE,
                    message: PERMISSION_DENIED_MESSAGE,
                    fallback: Some(fallback),
                })
            }
            DenialPolicy::RenderOnly => GuardView::AccessDenied(DenialNotice {
                title: ACCESS_DENIED_TITLE,
                message: ACCESS_DENIED_MESSAGE,
                fallback: None,
            }),
            DenialPolicy::PriorityRedirect(rules) => {
                let target = rules
                    .iter()
                    .find(|rule| rule.matches(identity))
                    .map(|rule| rule.target.clone());
                match target {
                    Some(target) => {
                        self.redirect_once(&target);
                        GuardView::Loading
                    }
                    None => {
                        self.issued_redirect = None;
                        GuardView::Empty
                    }
                }
            }
        }
    }

    fn redirect_once(&mut self, target: &RoutePath) {
        if self.issued_redirect.as_ref() == Some(target) {
            return;
        }
        info!(route = %target, "route guard redirecting");
        self.navigator.navigate_to(target);
        self.issued_redirect = Some(target.clone());
    }
}

#[cfg(test)]
mod tests;
