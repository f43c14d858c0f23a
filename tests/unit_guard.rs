use std::time::Duration;

use lonca::guard::{GuardAction, GuardState, RouteGuard, login_redirect, settle_resolution};
use lonca_config::guard::GuardConfig;
use lonca_core::errors::AppError;
use lonca_models::ids::MemberId;
use lonca_models::roles::{PermissionKey, RoleKey};
use lonca_models::session::{Resolution, ResolvedSession, SessionActor};

fn authenticated(email_confirmed: bool, roles: &[&str]) -> Resolution {
    Resolution::Authenticated(ResolvedSession {
        actor: SessionActor {
            id: MemberId::new(),
            email: "uye@example.com".to_string(),
            email_confirmed,
        },
        roles: roles.iter().map(|r| RoleKey::from(*r)).collect(),
        permissions: [PermissionKey::from("events")].into_iter().collect(),
    })
}

#[test]
fn test_pending_and_failed_render_as_checking() {
    let mut guard = RouteGuard::new(GuardConfig::default());

    for resolution in [Resolution::Pending, Resolution::Failed] {
        let decision = guard.evaluate(&resolution, "/admin");
        assert_eq!(decision.state, GuardState::Checking);
        assert_eq!(decision.action, GuardAction::Wait);
    }
}

#[test]
fn test_granted_for_confirmed_member_with_role() {
    let mut guard = RouteGuard::new(GuardConfig::default());
    let decision = guard.evaluate(&authenticated(true, &["uye"]), "/admin");
    assert_eq!(decision.state, GuardState::Granted);
    assert_eq!(decision.action, GuardAction::Render);
}

#[test]
fn test_redirect_loop_terminates_with_hard_reset() {
    let mut guard = RouteGuard::new(GuardConfig::default());

    // Two soft redirects are tolerated.
    for attempt in 1..=2 {
        let decision = guard.evaluate(&Resolution::Anonymous, "/admin");
        assert_eq!(decision.state, GuardState::DeniedUnauthenticated);
        assert!(
            matches!(decision.action, GuardAction::Redirect { .. }),
            "attempt {} should still be a soft redirect",
            attempt
        );
    }

    // The third trips the breaker: client state is reset and navigation is
    // hard, outside the client-side router.
    let third = guard.evaluate(&Resolution::Anonymous, "/admin");
    assert_eq!(
        third.action,
        GuardAction::HardReset {
            to: "/login".to_string()
        }
    );

    // No fourth soft redirect, ever.
    let fourth = guard.evaluate(&Resolution::Anonymous, "/admin");
    assert!(matches!(fourth.action, GuardAction::HardReset { .. }));
    assert_eq!(guard.redirect_attempts(), 4);
}

#[test]
fn test_unverified_email_precedes_unapproved_role() {
    let mut guard = RouteGuard::new(GuardConfig::default());

    // Unconfirmed email AND zero approved roles: the email check wins.
    let decision = guard.evaluate(&authenticated(false, &[]), "/admin");
    assert_eq!(decision.state, GuardState::DeniedUnverifiedEmail);
    assert_eq!(
        decision.action,
        GuardAction::VerificationNotice {
            login: "/login".to_string()
        }
    );
}

#[test]
fn test_unapproved_role_interstitial() {
    let mut guard = RouteGuard::new(GuardConfig::default());
    let decision = guard.evaluate(&authenticated(true, &[]), "/admin");
    assert_eq!(decision.state, GuardState::DeniedUnapprovedRole);
    assert_eq!(decision.action, GuardAction::ApprovalNotice);
}

#[test]
fn test_require_role_opt_out_grants_roleless_member() {
    let config = GuardConfig::default().with_require_role(false);
    let mut guard = RouteGuard::new(config);

    let decision = guard.evaluate(&authenticated(true, &[]), "/profil");
    assert_eq!(decision.state, GuardState::Granted);
    assert_eq!(decision.action, GuardAction::Render);
}

#[test]
fn test_unverified_email_never_auto_redirects() {
    let mut guard = RouteGuard::new(GuardConfig::default());

    for _ in 0..5 {
        let decision = guard.evaluate(&authenticated(false, &["uye"]), "/admin");
        assert!(matches!(
            decision.action,
            GuardAction::VerificationNotice { .. }
        ));
    }
    // Interstitials never consume the redirect budget.
    assert_eq!(guard.redirect_attempts(), 0);
}

#[test]
fn test_login_redirect_encodes_return_target() {
    assert_eq!(
        login_redirect("/login", "/admin/dergi?sayi=12"),
        "/login?return_to=%2Fadmin%2Fdergi%3Fsayi%3D12"
    );
}

#[tokio::test]
async fn test_settle_resolution_error_becomes_failed() {
    let resolution = settle_resolution(
        async { Err::<Resolution, AppError>(AppError::internal_error("store down")) },
        None,
    )
    .await;
    assert_eq!(resolution, Resolution::Failed);
}

#[tokio::test]
async fn test_settle_resolution_passes_success_through() {
    let resolution = settle_resolution(
        async { Ok::<_, AppError>(Resolution::Anonymous) },
        Some(Duration::from_secs(5)),
    )
    .await;
    assert_eq!(resolution, Resolution::Anonymous);
}

#[tokio::test]
async fn test_settle_resolution_timeout_settles_anonymous() {
    // A resolver that never settles. With a deadline configured the guard
    // sees an anonymous resolution instead of waiting forever, which lets
    // the redirect counter eventually force a hard reset.
    let resolution = settle_resolution(
        std::future::pending::<Result<Resolution, AppError>>(),
        Some(Duration::from_millis(10)),
    )
    .await;
    assert_eq!(resolution, Resolution::Anonymous);
}

#[test]
fn test_counter_is_instance_scoped() {
    let mut first = RouteGuard::new(GuardConfig::default());
    first.evaluate(&Resolution::Anonymous, "/admin");
    first.evaluate(&Resolution::Anonymous, "/admin");

    // A fresh mount starts with a fresh budget.
    let mut second = RouteGuard::new(GuardConfig::default());
    let decision = second.evaluate(&Resolution::Anonymous, "/admin");
    assert!(matches!(decision.action, GuardAction::Redirect { .. }));
}
