//! Session gate.
//!
//! Decides, for each navigation, whether the current location is allowed
//! given the authentication state, and where to redirect otherwise. Uses a
//! `tokio::select!` loop over navigation events and user-change signals.

use std::fmt;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::CredentialStore;
use crate::session::notify::UserChangeSubscription;
use crate::storage::KeyValueStore;
use crate::types::SessionUser;

/// Which half of the app a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Auth,
    Main,
}

/// A navigable location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Home,
    Airdrop,
    Leaderboard,
    Presale,
}

impl Route {
    pub fn area(self) -> Area {
        match self {
            Route::Login | Route::Signup => Area::Auth,
            Route::Home | Route::Airdrop | Route::Leaderboard | Route::Presale => Area::Main,
        }
    }

    pub fn is_auth(self) -> bool {
        self.area() == Area::Auth
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Home => "/",
            Route::Airdrop => "/airdrop",
            Route::Leaderboard => "/leaderboard",
            Route::Presale => "/presale",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Authentication state as seen by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Unauthenticated,
    Authenticated(SessionUser),
}

impl GateState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            GateState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Redirect required for `route` under `state`, if any.
///
/// Nothing is redirected while loading.
pub fn redirect_for(state: &GateState, route: Route) -> Option<Route> {
    match (state, route.area()) {
        (GateState::Loading, _) => None,
        (GateState::Unauthenticated, Area::Main) => Some(Route::Login),
        (GateState::Authenticated(_), Area::Auth) => Some(Route::Home),
        _ => None,
    }
}

/// Navigation gate driven by the persisted current user.
#[derive(Debug)]
pub struct SessionGate {
    state: watch::Sender<GateState>,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate {
    /// A gate in the `Loading` state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(GateState::Loading);
        Self { state }
    }

    pub fn state(&self) -> GateState {
        self.state.borrow().clone()
    }

    /// Observe state transitions.
    pub fn watch(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    /// Look up the current user and settle into `Authenticated` or
    /// `Unauthenticated`. A failed lookup counts as signed out.
    pub async fn load<S: KeyValueStore>(&self, auth: &CredentialStore<S>) -> GateState {
        let next = match auth.current_user().await {
            Ok(Some(user)) => GateState::Authenticated(user),
            Ok(None) => GateState::Unauthenticated,
            Err(e) => {
                warn!(error = %e, "current user lookup failed, treating as signed out");
                GateState::Unauthenticated
            }
        };

        let prev = self.state.send_replace(next.clone());
        if prev != next {
            info!(
                from = state_name(&prev),
                to = state_name(&next),
                user = next.user().map(|u| u.email.as_str()),
                "session state changed"
            );
        }
        next
    }

    /// Redirect for navigating to `route` in the current state.
    pub fn redirect_for(&self, route: Route) -> Option<Route> {
        redirect_for(&self.state.borrow(), route)
    }

    /// Run the gate until `cancel` fires or the location channel closes.
    ///
    /// Loads the current user first; locations that arrive meanwhile are
    /// evaluated once loading finishes. Every location (and every user
    /// change, against the last known location) that needs a redirect
    /// produces one on `redirects`.
    pub async fn run<S: KeyValueStore>(
        &self,
        auth: &CredentialStore<S>,
        mut locations: mpsc::Receiver<Route>,
        redirects: mpsc::Sender<Route>,
        mut changes: UserChangeSubscription,
        cancel: CancellationToken,
    ) {
        self.load(auth).await;

        let mut current: Option<Route> = None;
        let mut changes_open = true;

        loop {
            let check = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("session gate cancelled");
                    break;
                }

                location = locations.recv() => match location {
                    Some(route) => {
                        current = Some(route);
                        route
                    }
                    None => break,
                },

                change = changes.next(), if changes_open => {
                    match change {
                        Some(change) => {
                            debug!(?change, "user changed, re-checking session");
                            self.load(auth).await;
                        }
                        None => changes_open = false,
                    }
                    match current {
                        Some(route) => route,
                        None => continue,
                    }
                }
            };

            if let Some(target) = self.redirect_for(check) {
                info!(from = %check, to = %target, "redirecting");
                if redirects.send(target).await.is_err() {
                    break;
                }
                current = Some(target);
            }
        }
    }
}

fn state_name(state: &GateState) -> &'static str {
    match state {
        GateState::Loading => "loading",
        GateState::Unauthenticated => "unauthenticated",
        GateState::Authenticated(_) => "authenticated",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::{PresaleError, Result};
    use crate::session::UserChangeNotifier;
    use crate::storage::MemoryStore;

    fn ann() -> SessionUser {
        SessionUser {
            id: "1".into(),
            email: "a@x.com".into(),
            name: "Ann".into(),
        }
    }

    /// Backend whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(PresaleError::StorageFailure("disk on fire".into()))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(PresaleError::StorageFailure("disk on fire".into()))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Err(PresaleError::StorageFailure("disk on fire".into()))
        }
    }

    #[test]
    fn test_route_areas() {
        assert!(Route::Login.is_auth());
        assert!(Route::Signup.is_auth());
        for r in [Route::Home, Route::Airdrop, Route::Leaderboard, Route::Presale] {
            assert_eq!(r.area(), Area::Main);
        }
    }

    #[test]
    fn test_unauthenticated_main_redirects_to_login() {
        let s = GateState::Unauthenticated;
        assert_eq!(redirect_for(&s, Route::Home), Some(Route::Login));
        assert_eq!(redirect_for(&s, Route::Presale), Some(Route::Login));
        assert_eq!(redirect_for(&s, Route::Login), None);
        assert_eq!(redirect_for(&s, Route::Signup), None);
    }

    #[test]
    fn test_authenticated_auth_redirects_to_home() {
        let s = GateState::Authenticated(ann());
        assert_eq!(redirect_for(&s, Route::Login), Some(Route::Home));
        assert_eq!(redirect_for(&s, Route::Signup), Some(Route::Home));
    }

    #[test]
    fn test_authenticated_main_stays() {
        let s = GateState::Authenticated(ann());
        assert_eq!(redirect_for(&s, Route::Home), None);
        assert_eq!(redirect_for(&s, Route::Leaderboard), None);
    }

    #[test]
    fn test_loading_never_redirects() {
        let s = GateState::Loading;
        assert_eq!(redirect_for(&s, Route::Home), None);
        assert_eq!(redirect_for(&s, Route::Login), None);
        assert_eq!(SessionGate::new().state(), GateState::Loading);
    }

    #[tokio::test]
    async fn test_load_settles_state() {
        let auth = CredentialStore::new(MemoryStore::new(), UserChangeNotifier::new());
        let gate = SessionGate::new();

        assert_eq!(gate.load(&auth).await, GateState::Unauthenticated);

        let user = auth.signup("a@x.com", "pw", "Ann").await.unwrap();
        assert_eq!(gate.load(&auth).await, GateState::Authenticated(user));
        assert_eq!(gate.redirect_for(Route::Login), Some(Route::Home));
    }

    #[tokio::test]
    async fn test_failed_lookup_is_unauthenticated() {
        let auth = CredentialStore::new(BrokenStore, UserChangeNotifier::new());
        let gate = SessionGate::new();
        assert_eq!(gate.load(&auth).await, GateState::Unauthenticated);
        assert_eq!(gate.redirect_for(Route::Home), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_run_redirects_and_follows_user_changes() {
        let notifier = UserChangeNotifier::new();
        let auth = CredentialStore::new(MemoryStore::new(), notifier.clone());
        let gate = SessionGate::new();
        let mut states = gate.watch();

        let (loc_tx, loc_rx) = mpsc::channel(8);
        let (redir_tx, mut redir_rx) = mpsc::channel(8);
        let cancel = CancellationToken::new();

        let driver = async {
            // Signed out, landing on home: bounced to login.
            loc_tx.send(Route::Home).await.unwrap();
            assert_eq!(redir_rx.recv().await, Some(Route::Login));

            // Signing up from the login screen moves us to home.
            auth.signup("a@x.com", "pw", "Ann").await.unwrap();
            assert_eq!(redir_rx.recv().await, Some(Route::Home));
            states
                .wait_for(|s| matches!(s, GateState::Authenticated(_)))
                .await
                .unwrap();

            // Already in the main area: nothing to do, so the next redirect
            // we see is the one caused by logging out.
            loc_tx.send(Route::Airdrop).await.unwrap();
            auth.logout().await.unwrap();
            assert_eq!(redir_rx.recv().await, Some(Route::Login));

            cancel.cancel();
        };

        tokio::join!(
            gate.run(&auth, loc_rx, redir_tx, notifier.subscribe(), cancel.clone()),
            driver
        );
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_run_stops_when_locations_close() {
        let notifier = UserChangeNotifier::new();
        let auth = CredentialStore::new(MemoryStore::new(), notifier.clone());
        let gate = SessionGate::new();

        let (loc_tx, loc_rx) = mpsc::channel(1);
        let (redir_tx, _redir_rx) = mpsc::channel(1);
        drop(loc_tx);

        gate.run(
            &auth,
            loc_rx,
            redir_tx,
            notifier.subscribe(),
            CancellationToken::new(),
        )
        .await;
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }
}
