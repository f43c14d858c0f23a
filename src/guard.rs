//! Route guard state machine.
//!
//! The dashboard shell wraps every protected region in a guard. Each time
//! the session resolver settles (or fails, or is still in flight) the shell
//! feeds the outcome to [`RouteGuard::evaluate`] and acts on the returned
//! decision: render the region, render an interstitial, or navigate away.
//!
//! Two deliberate asymmetries:
//!
//! - A resolver *error* is rendered as "still checking", not as a denial, so
//!   a transient store blip never flashes an access-denied screen.
//! - An *anonymous* resolution counts toward a redirect budget. Stale or
//!   corrupted client state can keep a login redirect bouncing forever; once
//!   the budget is spent the guard stops issuing soft redirects and demands
//!   a hard reset (clear all client-side storage, full navigation to the
//!   login entry point). The counter lives in the guard instance and dies
//!   with it: it exists to catch rapid successive redirects within one
//!   mount, not history across sessions.

use std::future::Future;
use std::time::Duration;

use lonca_config::guard::GuardConfig;
use lonca_models::session::Resolution;

/// Guard states, re-evaluated on every resolution change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Resolution in flight or errored; show a verifying interstitial.
    Checking,
    /// No authenticated actor.
    DeniedUnauthenticated,
    /// Authenticated, but the email address was never confirmed.
    DeniedUnverifiedEmail,
    /// Authenticated and confirmed, but no approved role yet.
    DeniedUnapprovedRole,
    /// Render the protected content.
    Granted,
}

/// What the shell should do about the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    /// Keep showing the loading/verifying interstitial.
    Wait,
    /// Client-side redirect to the login entry point; `to` carries the
    /// originally requested location for the post-login return.
    Redirect { to: String },
    /// Clear all local/session storage and hard-navigate to `to`,
    /// bypassing client-side routing. Breaks redirect cycles caused by
    /// corrupted stored state.
    HardReset { to: String },
    /// Show the "confirm your email" interstitial with a manual link back
    /// to `login`. Never auto-redirects: the verification flow itself
    /// redirects here, and two auto-redirects make a loop.
    VerificationNotice { login: String },
    /// Show the "membership awaiting approval" interstitial.
    ApprovalNotice,
    /// Render the protected content.
    Render,
}

/// One evaluation result: the state the guard settled in plus the action
/// the shell should take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    pub state: GuardState,
    pub action: GuardAction,
}

/// Guard instance for a single protected region.
///
/// Holds the redirect-attempt counter for the lifetime of the mount.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    config: GuardConfig,
    redirect_attempts: u32,
}

impl RouteGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            redirect_attempts: 0,
        }
    }

    /// Soft redirects issued so far in this mount.
    pub fn redirect_attempts(&self) -> u32 {
        self.redirect_attempts
    }

    /// Maps the latest resolution to a decision.
    ///
    /// `requested_path` is the location the actor originally asked for; it
    /// rides along on the login redirect as `return_to`.
    pub fn evaluate(&mut self, resolution: &Resolution, requested_path: &str) -> GuardDecision {
        match resolution {
            Resolution::Pending | Resolution::Failed => GuardDecision {
                state: GuardState::Checking,
                action: GuardAction::Wait,
            },
            Resolution::Anonymous => {
                self.redirect_attempts += 1;
                let action = if self.redirect_attempts >= self.config.max_redirect_attempts {
                    GuardAction::HardReset {
                        to: self.config.login_path.clone(),
                    }
                } else {
                    GuardAction::Redirect {
                        to: login_redirect(&self.config.login_path, requested_path),
                    }
                };
                GuardDecision {
                    state: GuardState::DeniedUnauthenticated,
                    action,
                }
            }
            Resolution::Authenticated(session) => {
                // Email confirmation is checked before role approval: an
                // unconfirmed account sees the verification notice even if
                // it also has no approved role yet.
                if !session.actor.email_confirmed {
                    GuardDecision {
                        state: GuardState::DeniedUnverifiedEmail,
                        action: GuardAction::VerificationNotice {
                            login: self.config.login_path.clone(),
                        },
                    }
                } else if self.config.require_role && session.is_pending_approval() {
                    GuardDecision {
                        state: GuardState::DeniedUnapprovedRole,
                        action: GuardAction::ApprovalNotice,
                    }
                } else {
                    GuardDecision {
                        state: GuardState::Granted,
                        action: GuardAction::Render,
                    }
                }
            }
        }
    }
}

/// Builds the login redirect target, preserving the requested location.
pub fn login_redirect(login_path: &str, requested_path: &str) -> String {
    format!(
        "{}?return_to={}",
        login_path,
        urlencoding::encode(requested_path)
    )
}

/// Awaits a resolver future on the guard's behalf.
///
/// - Resolver success passes through.
/// - Resolver error settles as [`Resolution::Failed`], which renders as
///   "still checking".
/// - With a configured deadline, a fetch that never settles resolves as
///   [`Resolution::Anonymous`]: the redirect counter then gets a chance to
///   force a hard reset instead of the guard waiting forever. No deadline
///   preserves the wait-forever behavior.
pub async fn settle_resolution<F, E>(fut: F, timeout: Option<Duration>) -> Resolution
where
    F: Future<Output = Result<Resolution, E>>,
{
    let settled = match timeout {
        Some(deadline) => match tokio::time::timeout(deadline, fut).await {
            Ok(result) => result,
            Err(_) => return Resolution::Anonymous,
        },
        None => fut.await,
    };
    settled.unwrap_or(Resolution::Failed)
}
