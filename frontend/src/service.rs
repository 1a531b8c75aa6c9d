//! Seams to the external collaborators, and the async drivers that connect
//! them to a [`RouteSession`].

use std::{cell::RefCell, future::Future, rc::Weak};

use shared::{Location, RouteRequest, RouteResult};

use crate::error::ClientError;
use crate::session::{Disposition, RouteSession};

pub trait AuthSession {
    fn is_authenticated(&self) -> bool;
}

/// Source of selectable locations (`GET /locations`).
pub trait LocationCatalog {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Location>, ClientError>>;
}

/// Backend computing route alternatives (`POST /routes`).
pub trait RoutingService {
    fn submit(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RouteResult, ClientError>>;
}

/// Fetches the catalog into the session.
///
/// Only a weak handle is held across the await, so a session dropped by its
/// host while the request is in flight simply never sees the response.
pub async fn refresh_locations<B>(session: &Weak<RefCell<RouteSession>>, backend: &B) -> Disposition
where
    B: LocationCatalog + AuthSession,
{
    let ticket = {
        let Some(session) = session.upgrade() else {
            return Disposition::Closed;
        };
        let mut session = session.borrow_mut();
        match session.begin_location_fetch(backend) {
            Some(ticket) => ticket,
            None => return Disposition::NotIssued,
        }
    };

    let outcome = backend.fetch_all().await;

    match session.upgrade() {
        Some(session) => session.borrow_mut().apply_locations(ticket, outcome),
        None => {
            tracing::debug!(seq = ticket.seq(), "session gone, dropping location response");
            Disposition::Closed
        }
    }
}

/// Submits the session's form and applies the response.
pub async fn submit_route<B>(session: &Weak<RefCell<RouteSession>>, backend: &B) -> Disposition
where
    B: RoutingService + AuthSession,
{
    let pending = {
        let Some(session) = session.upgrade() else {
            return Disposition::Closed;
        };
        let mut session = session.borrow_mut();
        match session.begin_submission(backend) {
            Some(pending) => pending,
            None => return Disposition::NotIssued,
        }
    };

    let outcome = backend.submit(&pending.request).await;

    match session.upgrade() {
        Some(session) => session.borrow_mut().apply_route(pending.ticket, outcome),
        None => {
            tracing::debug!(seq = pending.ticket.seq(), "session gone, dropping route response");
            Disposition::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use tokio::sync::oneshot;

    use super::*;
    use crate::selection::fixtures::*;
    use crate::session::Effect;

    /// Replays a canned outcome; `gate` lets a test hold the response back.
    struct ScriptedBackend {
        authenticated: bool,
        submissions: Cell<usize>,
        status: Option<u16>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl ScriptedBackend {
        fn ok() -> Self {
            Self {
                authenticated: true,
                submissions: Cell::new(0),
                status: None,
                gate: RefCell::new(None),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                status: Some(status),
                ..Self::ok()
            }
        }
    }

    impl AuthSession for ScriptedBackend {
        fn is_authenticated(&self) -> bool {
            self.authenticated
        }
    }

    impl LocationCatalog for ScriptedBackend {
        async fn fetch_all(&self) -> Result<Vec<Location>, ClientError> {
            match self.status {
                Some(status) => Err(ClientError::Status {
                    status,
                    body: String::new(),
                }),
                None => Ok(vec![location("Paltan Bazaar", 30.322182, 78.037319)]),
            }
        }
    }

    impl RoutingService for ScriptedBackend {
        async fn submit(&self, _request: &RouteRequest) -> Result<RouteResult, ClientError> {
            self.submissions.set(self.submissions.get() + 1);
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match self.status {
                Some(status) => Err(ClientError::Status {
                    status,
                    body: String::new(),
                }),
                None => Ok(three_options()),
            }
        }
    }

    fn shared_session() -> Rc<RefCell<RouteSession>> {
        let session = Rc::new(RefCell::new(RouteSession::new()));
        {
            let mut s = session.borrow_mut();
            s.set_start("Clock Tower");
            s.set_end("ISBT Dehradun");
        }
        session
    }

    #[tokio::test]
    async fn test_submit_route_applies_result() {
        let session = shared_session();
        let backend = ScriptedBackend::ok();
        let disposition = submit_route(&Rc::downgrade(&session), &backend).await;
        assert_eq!(disposition, Disposition::Applied);
        assert_eq!(backend.submissions.get(), 1);
        assert_eq!(
            session.borrow().controller().selected_name(),
            Some("Route 1: Fast (Shortest)")
        );
    }

    #[tokio::test]
    async fn test_refresh_locations() {
        let session = shared_session();
        let disposition = refresh_locations(&Rc::downgrade(&session), &ScriptedBackend::ok()).await;
        assert_eq!(disposition, Disposition::Applied);
        assert_eq!(session.borrow().locations()[0].name, "Paltan Bazaar");

        let failing = ScriptedBackend::failing(500);
        let disposition = refresh_locations(&Rc::downgrade(&session), &failing).await;
        assert_eq!(disposition, Disposition::Failed(crate::error::ErrorClass::Generic));
        assert_eq!(session.borrow().locations().len(), 1);
    }

    #[tokio::test]
    async fn test_unauthenticated_backend_is_never_called() {
        let session = shared_session();
        let backend = ScriptedBackend {
            authenticated: false,
            ..ScriptedBackend::ok()
        };
        let disposition = submit_route(&Rc::downgrade(&session), &backend).await;
        assert_eq!(disposition, Disposition::NotIssued);
        assert_eq!(backend.submissions.get(), 0);
        assert_eq!(
            session.borrow_mut().take_effects(),
            vec![Effect::RedirectToLogin]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_response_redirects() {
        let session = shared_session();
        let disposition =
            submit_route(&Rc::downgrade(&session), &ScriptedBackend::failing(401)).await;
        assert_eq!(disposition, Disposition::AuthRedirect);
        let mut session = session.borrow_mut();
        assert!(session.controller().result().is_none());
        assert_eq!(session.take_effects(), vec![Effect::RedirectToLogin]);
    }

    #[tokio::test]
    async fn test_response_for_dropped_session_is_discarded() {
        let session = shared_session();
        let weak = Rc::downgrade(&session);
        let (release, gate) = oneshot::channel();
        let backend = ScriptedBackend {
            gate: RefCell::new(Some(gate)),
            ..ScriptedBackend::ok()
        };

        let in_flight = submit_route(&weak, &backend);
        let teardown = async {
            tokio::task::yield_now().await;
            drop(session);
            let _ = release.send(());
        };
        let (disposition, ()) = tokio::join!(in_flight, teardown);

        assert_eq!(disposition, Disposition::Closed);
        assert_eq!(backend.submissions.get(), 1);
        assert!(weak.upgrade().is_none());
    }
}
