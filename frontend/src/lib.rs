//! Client-side engine for browsing route alternatives.
//!
//! A [`RouteSession`] owns the form, the location catalog and a
//! [`SelectionController`]; the controller keeps the selected alternative,
//! its steps, the path overlays and the map viewport consistent with the
//! latest result the routing backend returned.

pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod icons;
pub mod selection;
pub mod service;
pub mod session;
pub mod viewport;

pub use config::ClientConfig;
pub use error::{ClientError, ErrorClass, RequestPhase, classify};
pub use http::HttpBackend;
pub use selection::{PathOverlay, SelectionController};
pub use service::{AuthSession, LocationCatalog, RoutingService, refresh_locations, submit_route};
pub use session::{Disposition, Effect, PendingRoute, RouteForm, RouteSession, Ticket};
pub use viewport::{Bounds, Viewport};
