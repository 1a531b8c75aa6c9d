//! One query session: form input, catalog, current result, and the request
//! bookkeeping that keeps late responses from clobbering newer state.
//!
//! Mutation is split into `begin_*` (issue a ticket) and `apply_*` (consume a
//! response for a ticket) so that a host can await the transport in between
//! without holding the session borrowed.

use shared::{Location, RouteRequest, RouteResult, VehicleType, WeatherCondition};

use crate::error::{ClientError, ErrorClass, FormError, RequestPhase, VALIDATION_MESSAGE, classify};
use crate::selection::SelectionController;
use crate::service::AuthSession;

/// Side effects the host must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RedirectToLogin,
}

/// Identifies one issued request. Only the latest ticket of an operation can
/// be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
}

impl Ticket {
    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// Monotonic sequence for one logical operation.
#[derive(Debug, Clone, Copy, Default)]
struct RequestSequence {
    issued: u64,
    live: Option<u64>,
}

impl RequestSequence {
    fn issue(&mut self) -> Ticket {
        self.issued += 1;
        self.live = Some(self.issued);
        Ticket { seq: self.issued }
    }

    /// Consumes the live ticket if `ticket` is it.
    fn settle(&mut self, ticket: Ticket) -> bool {
        if self.live == Some(ticket.seq) {
            self.live = None;
            true
        } else {
            false
        }
    }

    fn supersede(&mut self) {
        self.live = None;
    }

    fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

/// What happened to a response handed to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    /// Failure recorded as a user-facing message; prior state kept.
    Failed(ErrorClass),
    /// Redirect emitted; nothing else changed.
    AuthRedirect,
    /// Superseded by a newer request and dropped.
    Stale,
    /// Session was torn down and the response dropped.
    Closed,
    /// No request was issued.
    NotIssued,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteForm {
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub vehicle_type: VehicleType,
    pub user_weather: Option<WeatherCondition>,
}

impl RouteForm {
    pub fn to_request(&self, preferred_option: Option<&str>) -> Result<RouteRequest, FormError> {
        let picked = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        };
        Ok(RouteRequest {
            start_location: picked(&self.start_location).ok_or(FormError::MissingStart)?,
            end_location: picked(&self.end_location).ok_or(FormError::MissingEnd)?,
            vehicle_type: self.vehicle_type,
            route_option: preferred_option.map(str::to_string),
            user_weather: self.user_weather,
        })
    }
}

/// A submission the host must send, tagged with its ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRoute {
    pub ticket: Ticket,
    pub request: RouteRequest,
}

#[derive(Debug, Default)]
pub struct RouteSession {
    form: RouteForm,
    locations: Vec<Location>,
    controller: SelectionController,
    error: Option<String>,
    catalog_seq: RequestSequence,
    route_seq: RequestSequence,
    effects: Vec<Effect>,
    closed: bool,
}

impl RouteSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RouteForm {
        &self.form
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.route_seq.is_live()
    }

    pub fn set_start(&mut self, name: impl Into<String>) {
        self.form.start_location = Some(name.into());
    }

    pub fn set_end(&mut self, name: impl Into<String>) {
        self.form.end_location = Some(name.into());
    }

    pub fn set_user_weather(&mut self, weather: Option<WeatherCondition>) {
        self.form.user_weather = weather;
    }

    /// Changing mode away from the displayed result's mode drops that result
    /// and any in-flight submission, so options never disagree with the mode.
    pub fn set_vehicle_type(&mut self, vehicle: VehicleType) {
        if self.form.vehicle_type == vehicle {
            return;
        }
        self.form.vehicle_type = vehicle;

        let displayed = self.controller.result().map(|result| result.vehicle_type);
        if displayed.is_some_and(|shown| shown != vehicle) || self.route_seq.is_live() {
            tracing::debug!(%vehicle, "vehicle type changed, invalidating displayed route");
            self.controller.invalidate();
            self.route_seq.supersede();
        }
    }

    pub fn select(&mut self, option_name: &str) -> bool {
        self.controller.select(option_name)
    }

    /// Drains effects emitted since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Tears the session down. Responses arriving afterwards are dropped.
    pub fn close(&mut self) {
        self.closed = true;
        self.catalog_seq.supersede();
        self.route_seq.supersede();
    }

    pub fn begin_location_fetch(&mut self, auth: &impl AuthSession) -> Option<Ticket> {
        if self.closed {
            return None;
        }
        if !auth.is_authenticated() {
            self.redirect_to_login(RequestPhase::CatalogFetch);
            return None;
        }
        let ticket = self.catalog_seq.issue();
        tracing::debug!(seq = ticket.seq, "issuing location fetch");
        Some(ticket)
    }

    pub fn apply_locations(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Location>, ClientError>,
    ) -> Disposition {
        if let Some(early) = self.admit(ticket, RequestPhase::CatalogFetch) {
            return early;
        }
        match outcome {
            Ok(locations) => {
                tracing::debug!(count = locations.len(), "location catalog loaded");
                self.locations = locations;
                Disposition::Applied
            }
            Err(err) => self.fail(err, RequestPhase::CatalogFetch),
        }
    }

    /// Validates the form and issues a submission, superseding any in-flight
    /// one. Form errors are reported like a backend validation failure.
    pub fn begin_submission(&mut self, auth: &impl AuthSession) -> Option<PendingRoute> {
        if self.closed {
            return None;
        }
        if !auth.is_authenticated() {
            self.redirect_to_login(RequestPhase::Submission);
            return None;
        }

        let request = match self.form.to_request(self.controller.selected_name()) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(%err, "route form incomplete");
                self.route_seq.supersede();
                self.error = Some(VALIDATION_MESSAGE.to_string());
                return None;
            }
        };

        self.error = None;
        let ticket = self.route_seq.issue();
        tracing::debug!(
            seq = ticket.seq,
            start = request.start_location.as_str(),
            end = request.end_location.as_str(),
            vehicle = %request.vehicle_type,
            "issuing route submission"
        );
        Some(PendingRoute { ticket, request })
    }

    pub fn apply_route(
        &mut self,
        ticket: Ticket,
        outcome: Result<RouteResult, ClientError>,
    ) -> Disposition {
        if let Some(early) = self.admit(ticket, RequestPhase::Submission) {
            return early;
        }
        match outcome {
            Ok(result) => {
                self.controller.load(result);
                self.error = None;
                Disposition::Applied
            }
            Err(err) => self.fail(err, RequestPhase::Submission),
        }
    }

    /// Returns the disposition for responses that must not be applied.
    fn admit(&mut self, ticket: Ticket, phase: RequestPhase) -> Option<Disposition> {
        if self.closed {
            tracing::debug!(seq = ticket.seq, ?phase, "session closed, dropping response");
            return Some(Disposition::Closed);
        }
        let sequence = match phase {
            RequestPhase::CatalogFetch => &mut self.catalog_seq,
            RequestPhase::Submission => &mut self.route_seq,
        };
        if !sequence.settle(ticket) {
            tracing::warn!(
                seq = ticket.seq,
                latest = sequence.issued,
                ?phase,
                "discarding stale response"
            );
            return Some(Disposition::Stale);
        }
        None
    }

    fn fail(&mut self, err: ClientError, phase: RequestPhase) -> Disposition {
        let class = classify(err.status(), phase);
        match class.user_message(phase) {
            None => {
                self.redirect_to_login(phase);
                Disposition::AuthRedirect
            }
            Some(message) => {
                tracing::error!(error = %err, ?phase, ?class, "request failed");
                self.error = Some(message.to_string());
                Disposition::Failed(class)
            }
        }
    }

    fn redirect_to_login(&mut self, phase: RequestPhase) {
        tracing::info!(?phase, "authentication required, redirecting to login");
        self.effects.push(Effect::RedirectToLogin);
    }
}
