//! Tests for route guards and their area configurations.

use std::sync::Arc;

use rstest::rstest;
use tokio::sync::watch;

use super::*;
use crate::domain::ports::{MockIdentityProvider, MockNavigator};
use crate::domain::{
    ADMIN_DASHBOARD, ADMIN_USERS, CUSTOMER_DASHBOARD, DEFAULT_FALLBACK, IdentityId,
};

fn identity(roles: &[&str]) -> IdentitySnapshot {
    IdentitySnapshot::new(
        IdentityId::new("user-1").expect("valid id"),
        roles.iter().copied(),
        Vec::<String>::new(),
    )
}

fn navigator_expecting(target: RoutePath, times: usize) -> Arc<dyn Navigator> {
    let mut navigator = MockNavigator::new();
    navigator
        .expect_navigate_to()
        .withf(move |path| *path == target)
        .times(times)
        .return_const(());
    Arc::new(navigator)
}

fn silent_navigator() -> Arc<dyn Navigator> {
    let mut navigator = MockNavigator::new();
    navigator.expect_navigate_to().never();
    Arc::new(navigator)
}

#[rstest]
#[case::role_based(RouteGuard::role_based(AccessRequirement::any_role(["Staff"]), silent_navigator()))]
#[case::admin(RouteGuard::admin(silent_navigator()))]
#[case::staff(RouteGuard::staff(silent_navigator()))]
#[case::customer(RouteGuard::customer(silent_navigator()))]
#[case::shared(RouteGuard::shared(silent_navigator()))]
fn unresolved_identity_renders_loading_without_navigation(#[case] guard: RouteGuard) {
    let mut guard = guard;
    assert_eq!(guard.observe(None), GuardView::Loading);
    assert_eq!(guard.state(), GuardState::Pending);
}

#[test]
fn role_based_guard_renders_children_when_allowed() {
    let mut guard = RouteGuard::role_based(
        AccessRequirement::any_role(["Staff"]).with_permissions(["bookings:manage"]),
        silent_navigator(),
    );
    let staff = identity(&["Staff"]);

    assert_eq!(guard.observe(Some(&staff)), GuardView::Children);
    assert_eq!(guard.state(), GuardState::Rendered);
}

#[test]
fn role_based_guard_redirects_once_and_renders_notice() {
    let mut guard = RouteGuard::role_based(
        AccessRequirement::any_role(["Staff"]),
        navigator_expecting(DEFAULT_FALLBACK, 1),
    );
    let customer = identity(&["Customer"]);

    let first = guard.observe(Some(&customer));
    let second = guard.observe(Some(&customer));

    let GuardView::AccessDenied(notice) = &first else {
        panic!("expected a denial notice, got {first:?}");
    };
    assert_eq!(notice.message(), PERMISSION_DENIED_MESSAGE);
    assert_eq!(notice.fallback(), Some(&DEFAULT_FALLBACK));
    assert_eq!(first, second, "re-evaluation yields the same view");
    assert_eq!(guard.state(), GuardState::Denied);
}

#[test]
fn role_based_guard_redirects_again_after_a_fresh_denial() {
    let mut guard = RouteGuard::role_based(
        AccessRequirement::any_role(["Staff"]),
        navigator_expecting(DEFAULT_FALLBACK, 2),
    );
    let customer = identity(&["Customer"]);

    guard.observe(Some(&customer));
    assert_eq!(guard.observe(None), GuardView::Loading, "logged out");
    guard.observe(Some(&customer));
}

#[test]
fn custom_fallback_is_used_for_redirect_and_link() {
    let fallback = RoutePath::new("/customer/bookings").expect("valid path");
    let mut guard = RouteGuard::role_based(
        AccessRequirement::any_role(["Staff"]).with_fallback(fallback.clone()),
        navigator_expecting(fallback.clone(), 1),
    );

    let view = guard.observe(Some(&identity(&[])));

    let GuardView::AccessDenied(notice) = view else {
        panic!("expected a denial notice");
    };
    assert_eq!(notice.fallback(), Some(&fallback));
}

#[rstest]
#[case("Admin")]
#[case("Owner")]
#[case("Manager")]
fn admin_guard_admits_admin_area_roles(#[case] role: &str) {
    let mut guard = RouteGuard::admin(silent_navigator());
    assert_eq!(guard.observe(Some(&identity(&[role]))), GuardView::Children);
}

#[test]
fn admin_guard_denies_staff_in_place_without_navigation() {
    let mut guard = RouteGuard::admin(silent_navigator());

    let view = guard.observe(Some(&identity(&["Staff"])));

    let GuardView::AccessDenied(notice) = view else {
        panic!("expected a denial notice");
    };
    assert_eq!(notice.title(), ACCESS_DENIED_TITLE);
    assert_eq!(notice.fallback(), None, "no fallback link is offered");
    assert_eq!(guard.state(), GuardState::Denied);
}

#[rstest]
#[case(&["Staff"])]
#[case(&["Receptionist"])]
#[case(&["Receptionist", "Customer"])]
fn staff_guard_admits_staff_roles(#[case] roles: &[&str]) {
    let mut guard = RouteGuard::staff(silent_navigator());
    assert_eq!(guard.observe(Some(&identity(roles))), GuardView::Children);
}

#[rstest]
#[case::customer(&["Customer"], CUSTOMER_DASHBOARD)]
#[case::manager(&["Manager"], ADMIN_DASHBOARD)]
#[case::admin_precedes_customer(&["Customer", "Owner"], ADMIN_DASHBOARD)]
fn staff_guard_redirects_by_priority(#[case] roles: &[&str], #[case] target: RoutePath) {
    let mut guard = RouteGuard::staff(navigator_expecting(target, 1));
    let subject = identity(roles);

    assert_eq!(guard.observe(Some(&subject)), GuardView::Loading);
    assert_eq!(guard.observe(Some(&subject)), GuardView::Loading);
    assert_eq!(guard.state(), GuardState::Denied);
}

#[test]
fn staff_guard_denies_silently_without_matching_rule() {
    let mut guard = RouteGuard::staff(silent_navigator());

    assert_eq!(guard.observe(Some(&identity(&[]))), GuardView::Empty);
    assert_eq!(guard.state(), GuardState::Denied);
}

#[test]
fn staff_guard_follows_identity_changes_between_targets() {
    let mut navigator = MockNavigator::new();
    let mut sequence = mockall::Sequence::new();
    navigator
        .expect_navigate_to()
        .withf(|path| *path == CUSTOMER_DASHBOARD)
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(());
    navigator
        .expect_navigate_to()
        .withf(|path| *path == ADMIN_DASHBOARD)
        .times(1)
        .in_sequence(&mut sequence)
        .return_const(());
    let mut guard = RouteGuard::staff(Arc::new(navigator));

    guard.observe(Some(&identity(&["Customer"])));
    guard.observe(Some(&identity(&["Manager"])));
}

#[rstest]
#[case(RouteGuard::customer(silent_navigator()))]
#[case(RouteGuard::shared(silent_navigator()))]
fn open_guards_never_deny(#[case] guard: RouteGuard) {
    let mut guard = guard;
    for roles in [&[][..], &["Customer"][..], &["Staff"][..]] {
        assert_eq!(guard.observe(Some(&identity(roles))), GuardView::Children);
        assert_eq!(guard.state(), GuardState::Rendered);
    }
}

#[test]
fn redirect_only_guard_navigates_once_on_mount() {
    let mut guard = RouteGuard::deprecated_staff_users(navigator_expecting(ADMIN_USERS, 1));

    assert_eq!(guard.observe(None), GuardView::Loading);
    assert_eq!(guard.observe(Some(&identity(&["Admin"]))), GuardView::Loading);
    assert_eq!(guard.state(), GuardState::Pending);
}

#[tokio::test]
async fn session_recomputes_on_identity_change() {
    let (identity_tx, identity_rx) = watch::channel(None::<IdentitySnapshot>);
    let mut provider = MockIdentityProvider::new();
    provider.expect_subscribe().return_once(move || identity_rx);

    let session = GuardSession::spawn(RouteGuard::admin(silent_navigator()), &provider);
    let mut views = session.views();
    assert_eq!(session.view(), GuardView::Loading);
    assert_eq!(session.state(), GuardState::Pending);

    identity_tx.send_replace(Some(identity(&["Owner"])));
    views.changed().await.expect("view published");
    assert_eq!(*views.borrow_and_update(), GuardView::Children);
    assert_eq!(session.state(), GuardState::Rendered);

    identity_tx.send_replace(Some(identity(&["Customer"])));
    views.changed().await.expect("view published");
    assert!(matches!(
        *views.borrow_and_update(),
        GuardView::AccessDenied(_)
    ));
    assert_eq!(session.state(), GuardState::Denied);
}

#[tokio::test]
async fn session_stops_when_provider_closes() {
    let (identity_tx, identity_rx) = watch::channel(None::<IdentitySnapshot>);
    let mut provider = MockIdentityProvider::new();
    provider.expect_subscribe().return_once(move || identity_rx);
    let session = GuardSession::spawn(RouteGuard::customer(silent_navigator()), &provider);

    drop(identity_tx);
    for _ in 0..16 {
        if !session.is_running() {
            break;
        }
        tokio::task::yield_now().await;
    }

    assert!(!session.is_running());
}

#[tokio::test]
async fn navigator_may_republish_identity_while_guard_redirects() {
    let (identity_tx, identity_rx) = watch::channel(Some(identity(&["Customer"])));
    let identity_tx = Arc::new(identity_tx);
    let republisher = Arc::clone(&identity_tx);
    let mut navigator = MockNavigator::new();
    navigator
        .expect_navigate_to()
        .withf(|path| *path == DEFAULT_FALLBACK)
        .times(1)
        .returning(move |_| {
            republisher.send_replace(None);
        });
    let mut provider = MockIdentityProvider::new();
    provider.expect_subscribe().return_once(move || identity_rx);

    let guard = RouteGuard::role_based(AccessRequirement::any_role(["Staff"]), Arc::new(navigator));
    let session = GuardSession::spawn(guard, &provider);
    let mut views = session.views();
    assert!(matches!(session.view(), GuardView::AccessDenied(_)));

    views.changed().await.expect("view published");
    assert_eq!(*views.borrow_and_update(), GuardView::Loading);
    assert_eq!(session.state(), GuardState::Pending);
    drop(identity_tx);
}
