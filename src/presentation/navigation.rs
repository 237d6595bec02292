//! Route stack guarded by the authentication state.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::{AuthSubscription, ProductId, UserProfile};

/// Named screen destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Route {
    Login,
    SignUp,
    Home,
    Products,
    AddProduct,
    EditProduct(ProductId),
    Profile,
}

impl Route {
    /// Returns whether the route requires a signed-in user.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Login | Self::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::SignUp => f.write_str("signup"),
            Self::Home => f.write_str("home"),
            Self::Products => f.write_str("products"),
            Self::AddProduct => f.write_str("products/add"),
            Self::EditProduct(id) => write!(f, "products/{id}/edit"),
            Self::Profile => f.write_str("profile"),
        }
    }
}

/// Coarse authentication state the router derives routes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing committed yet.
    #[default]
    Pending,
    /// No signed-in user.
    Unauthenticated,
    /// Signed in as the given user.
    Authenticated(UserProfile),
}

impl AuthState {
    fn from_user(user: Option<UserProfile>) -> Self {
        user.map_or(Self::Unauthenticated, Self::Authenticated)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Navigation error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum NavigationError {
    #[error("route {0} requires a signed-in user")]
    Protected(Route),

    #[error("already at the root route")]
    AtRoot,
}

/// Screen stack driven by named-route operations and session changes.
///
/// Owns the session subscription; dropping the router releases it.
#[derive(Debug)]
pub struct Router {
    stack: Vec<Route>,
    state: AuthState,
    subscription: AuthSubscription,
    settle_delay: Duration,
    pending_since: Option<Instant>,
}

impl Router {
    /// Creates router in the pending state.
    #[must_use]
    pub fn new(subscription: AuthSubscription, settle_delay: Duration) -> Self {
        Self {
            stack: vec![Route::Login],
            state: AuthState::Pending,
            subscription,
            settle_delay,
            pending_since: None,
        }
    }

    /// Commits the subscription's current state and picks the initial route.
    pub fn start(&mut self) -> Route {
        let user = self.subscription.take_latest();
        self.commit(user);
        self.current()
    }

    /// Returns visible route.
    #[must_use]
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Login)
    }

    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.state.user()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Applies a session state.
    ///
    /// The first commit resets to Home or Login. Losing the session while a
    /// protected route is on the stack resets to Login. Signing in keeps the
    /// current route: the login screen navigates once its alert is seen.
    /// Returns whether the visible route changed.
    pub fn commit(&mut self, user: Option<UserProfile>) -> bool {
        let previous = std::mem::replace(&mut self.state, AuthState::from_user(user));
        let before = self.current();

        match (&previous, &self.state) {
            (AuthState::Pending, AuthState::Authenticated(_)) => self.stack = vec![Route::Home],
            (AuthState::Pending, AuthState::Unauthenticated) => self.stack = vec![Route::Login],
            (_, AuthState::Unauthenticated)
                if self.stack.iter().any(|route| route.is_protected()) =>
            {
                info!("Session ended, returning to login");
                self.stack = vec![Route::Login];
            }
            _ => {}
        }

        debug!(
            authenticated = self.state.is_authenticated(),
            route = %self.current(),
            "Session state committed"
        );
        before != self.current()
    }

    fn guard(&self, route: Route) -> Result<(), NavigationError> {
        if route.is_protected() && !self.state.is_authenticated() {
            return Err(NavigationError::Protected(route));
        }
        Ok(())
    }

    /// Pushes route on top of the stack.
    ///
    /// # Errors
    /// Returns `Protected` for a protected route while signed out.
    pub fn push(&mut self, route: Route) -> Result<(), NavigationError> {
        self.guard(route)?;
        info!(from = %self.current(), to = %route, "Navigate push");
        self.stack.push(route);
        Ok(())
    }

    /// Swaps the visible route.
    ///
    /// # Errors
    /// Returns `Protected` for a protected route while signed out.
    pub fn replace(&mut self, route: Route) -> Result<(), NavigationError> {
        self.guard(route)?;
        info!(from = %self.current(), to = %route, "Navigate replace");
        self.stack.pop();
        self.stack.push(route);
        Ok(())
    }

    /// Clears history and shows route.
    ///
    /// # Errors
    /// Returns `Protected` for a protected route while signed out.
    pub fn reset(&mut self, route: Route) -> Result<(), NavigationError> {
        self.guard(route)?;
        info!(from = %self.current(), to = %route, "Navigate reset");
        self.stack = vec![route];
        Ok(())
    }

    /// Pops the visible route.
    ///
    /// # Errors
    /// Returns `AtRoot` when nothing is left to go back to.
    pub fn back(&mut self) -> Result<Route, NavigationError> {
        if !self.can_go_back() {
            return Err(NavigationError::AtRoot);
        }
        let from = self.stack.pop();
        info!(from = ?from, to = %self.current(), "Navigate back");
        Ok(self.current())
    }

    /// Waits for the next session change, coalescing bursts within the
    /// settle delay.
    ///
    /// Cancel safe: an interrupted settle period resumes on the next call.
    /// Returns `None` once the session publisher is gone.
    pub async fn next_change(&mut self) -> Option<Option<UserProfile>> {
        loop {
            if let Some(since) = self.pending_since {
                tokio::time::sleep_until(since + self.settle_delay).await;
                self.pending_since = None;
                return Some(self.subscription.take_latest());
            }

            if !self.subscription.wait().await {
                return None;
            }
            if self.settle_delay.is_zero() {
                return Some(self.subscription.take_latest());
            }
            self.pending_since = Some(Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SessionWatch;
    use test_case::test_case;
    use tokio_test::{assert_pending, assert_ready, task};

    fn ana() -> UserProfile {
        UserProfile::new("u1", "ana@pchela.com").with_display_name("Ana")
    }

    fn router(watch: &SessionWatch) -> Router {
        Router::new(watch.subscribe(), Duration::ZERO)
    }

    #[test]
    fn test_initial_route_follows_auth_state() {
        let watch = SessionWatch::new();
        let mut signed_out = router(&watch);
        assert_eq!(signed_out.start(), Route::Login);
        assert_eq!(signed_out.state(), &AuthState::Unauthenticated);

        watch.publish(Some(ana()));
        let mut signed_in = router(&watch);
        assert_eq!(signed_in.start(), Route::Home);
        assert_eq!(signed_in.user(), Some(&ana()));
    }

    #[test_case(Route::Home ; "home")]
    #[test_case(Route::Products ; "products")]
    #[test_case(Route::EditProduct(ProductId(2)) ; "edit_product")]
    #[test_case(Route::Profile ; "profile")]
    fn test_protected_routes_refused_when_signed_out(route: Route) {
        let watch = SessionWatch::new();
        let mut router = router(&watch);
        router.start();

        assert_eq!(router.push(route), Err(NavigationError::Protected(route)));
        assert_eq!(router.reset(route), Err(NavigationError::Protected(route)));
        assert_eq!(router.current(), Route::Login);
    }

    #[test]
    fn test_public_routes_allowed_when_signed_out() {
        let watch = SessionWatch::new();
        let mut router = router(&watch);
        router.start();

        router.push(Route::SignUp).unwrap();
        assert_eq!(router.current(), Route::SignUp);
        assert_eq!(router.back(), Ok(Route::Login));
        assert_eq!(router.back(), Err(NavigationError::AtRoot));
    }

    #[test]
    fn test_session_loss_resets_to_login() {
        let watch = SessionWatch::new();
        watch.publish(Some(ana()));
        let mut router = router(&watch);
        router.start();
        router.push(Route::Products).unwrap();
        router.push(Route::AddProduct).unwrap();

        assert!(router.commit(None));
        assert_eq!(router.current(), Route::Login);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_sign_in_keeps_login_visible() {
        let watch = SessionWatch::new();
        let mut router = router(&watch);
        router.start();

        assert!(!router.commit(Some(ana())));
        assert_eq!(router.current(), Route::Login);
        router.reset(Route::Home).unwrap();
        assert_eq!(router.current(), Route::Home);
    }

    #[test]
    fn test_tabs_replace_without_history() {
        let watch = SessionWatch::new();
        watch.publish(Some(ana()));
        let mut router = router(&watch);
        router.start();

        router.replace(Route::Profile).unwrap();
        assert_eq!(router.current(), Route::Profile);
        assert!(!router.can_go_back());
    }

    #[test]
    fn test_next_change_without_delay() {
        let watch = SessionWatch::new();
        let mut router = router(&watch);
        router.start();

        let mut change = task::spawn(router.next_change());
        assert_pending!(change.poll());

        watch.publish(Some(ana()));
        assert_eq!(assert_ready!(change.poll()), Some(Some(ana())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_delay_coalesces_burst() {
        let watch = SessionWatch::new();
        let mut router = Router::new(watch.subscribe(), Duration::from_millis(500));
        router.start();

        watch.publish(Some(ana()));
        watch.publish(None);
        let publisher = watch.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            publisher.publish(Some(UserProfile::new("u9", "luz@pchela.com")));
        });

        let change = router.next_change().await;
        assert_eq!(change.flatten().map(|user| user.uid), Some("u9".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_settle_resumes() {
        let watch = SessionWatch::new();
        let mut router = Router::new(watch.subscribe(), Duration::from_millis(500));
        router.start();
        watch.publish(Some(ana()));

        let interrupted =
            tokio::time::timeout(Duration::from_millis(100), router.next_change()).await;
        assert!(interrupted.is_err());

        assert_eq!(router.next_change().await, Some(Some(ana())));
    }

    #[tokio::test]
    async fn test_next_change_ends_with_publisher() {
        let watch = SessionWatch::new();
        let mut router = router(&watch);
        router.start();
        drop(watch);

        assert_eq!(router.next_change().await, None);
    }
}
