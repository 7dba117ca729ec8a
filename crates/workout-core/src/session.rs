//! Session Gate
//!
//! Follows the auth state of the hosted service and sends unauthenticated
//! sessions to the login screen. A failed auth check looks the same as
//! "signed out" and routes to login as well.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::domain::Identity;
use crate::route::Route;
use crate::store::{AuthListener, AuthService, Subscription};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// Where to go from `current` in this state, if anywhere.
    ///
    /// Signed-in users leave the guest screens for the list; signed-out
    /// users leave gated screens for login. Guest screens never bounce a
    /// signed-out user, so login and registration stay reachable.
    pub fn redirect_from(&self, current: Route) -> Option<Route> {
        match (self.is_authenticated(), current.requires_session()) {
            (true, false) => Some(Route::Main),
            (false, true) => Some(Route::Login),
            _ => None,
        }
    }
}

impl From<Option<Identity>> for SessionState {
    fn from(identity: Option<Identity>) -> Self {
        identity.map_or(SessionState::Unauthenticated, SessionState::Authenticated)
    }
}

pub struct SessionGate {
    state: Rc<RefCell<SessionState>>,
    subscription: Option<Subscription>,
}

impl SessionGate {
    /// Register for auth notifications.
    ///
    /// `on_change` runs on every state transition. `navigate` receives
    /// [`Route::Login`] whenever the session is (or turns out to be)
    /// unauthenticated, including the first notification.
    pub fn mount(
        auth: &dyn AuthService,
        navigate: impl Fn(Route) + 'static,
        on_change: impl Fn(&SessionState) + 'static,
    ) -> Self {
        let state = Rc::new(RefCell::new(SessionState::Unauthenticated));
        let first = Cell::new(true);

        let weak = Rc::downgrade(&state);
        let listener: AuthListener = Rc::new(move |identity: Option<Identity>| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let next = SessionState::from(identity);
            let initial = first.replace(false);
            let changed = *state.borrow() != next;
            if !changed && !initial {
                return;
            }
            *state.borrow_mut() = next.clone();

            match &next {
                SessionState::Authenticated(identity) => {
                    log::info!("[Session] authenticated as {}", identity.uid())
                }
                SessionState::Unauthenticated => log::info!("[Session] unauthenticated"),
            }
            if changed {
                on_change(&next);
            }
            if !next.is_authenticated() {
                navigate(Route::Login);
            }
        });

        let subscription = auth.on_auth_state_changed(listener);
        Self {
            state,
            subscription: Some(subscription),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop listening for auth changes.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
        }
    }
}
