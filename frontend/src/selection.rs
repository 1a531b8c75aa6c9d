use shared::{Coordinate, RouteOption, RouteResult, Step};

use crate::format::{RouteColor, color_for_option};
use crate::viewport::{Viewport, compute_bounds, compute_center_zoom};

pub const SELECTED_OPACITY: f64 = 1.0;
pub const UNSELECTED_OPACITY: f64 = 0.6;
pub const OVERLAY_WEIGHT: u8 = 5;

/// One polyline to draw for an alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOverlay<'a> {
    pub option_name: &'a str,
    pub path: &'a [Coordinate],
    pub color: RouteColor,
    pub selected: bool,
    pub opacity: f64,
    pub weight: u8,
}

/// Owns the current result and keeps selection, steps and viewport in step
/// with it.
///
/// Invariant: `selected` names an option of `result` whenever the result has
/// any options, and is `None` otherwise.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    result: Option<RouteResult>,
    selected: Option<String>,
    steps: Vec<Step>,
    viewport: Viewport,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the result wholesale. The previous selection survives if the
    /// new result still offers an option of that name.
    pub fn load(&mut self, result: RouteResult) {
        if result.route_options.is_none() {
            tracing::warn!(
                anomaly = "malformed_response",
                "result has no route_options, treating as empty"
            );
        }

        let selected = match self.selected.as_deref() {
            Some(previous) if result.option(previous).is_some() => Some(previous.to_string()),
            _ => result.options().first().map(|opt| opt.option_name.clone()),
        };
        let steps = selected
            .as_deref()
            .and_then(|name| result.option(name))
            .map(steps_of)
            .unwrap_or_default();
        let bounds = compute_bounds(result.options().iter().map(|opt| &opt.path));
        let viewport = compute_center_zoom(bounds, self.viewport);

        tracing::debug!(
            options = result.options().len(),
            selected = selected.as_deref().unwrap_or("none"),
            "loaded route result"
        );

        // Everything is computed before anything is assigned.
        self.result = Some(result);
        self.selected = selected;
        self.steps = steps;
        self.viewport = viewport;
    }

    /// Returns `false` and leaves all state untouched for unknown names.
    pub fn select(&mut self, option_name: &str) -> bool {
        let Some(option) = self
            .result
            .as_ref()
            .and_then(|result| result.option(option_name))
        else {
            tracing::warn!(
                anomaly = "unknown_option",
                option_name,
                "ignoring selection of an option not in the current result"
            );
            return false;
        };

        self.steps = steps_of(option);
        self.selected = Some(option_name.to_string());
        true
    }

    /// Drops the displayed result. The viewport stays where it was.
    pub fn invalidate(&mut self) {
        self.result = None;
        self.selected = None;
        self.steps.clear();
    }

    pub fn result(&self) -> Option<&RouteResult> {
        self.result.as_ref()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&RouteOption> {
        let name = self.selected.as_deref()?;
        self.result.as_ref()?.option(name)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn overlays(&self) -> Vec<PathOverlay<'_>> {
        let Some(result) = &self.result else {
            return Vec::new();
        };
        result
            .options()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let selected = self.selected.as_deref() == Some(option.option_name.as_str());
                PathOverlay {
                    option_name: &option.option_name,
                    path: &option.path,
                    color: color_for_option(result.vehicle_type, index),
                    selected,
                    opacity: if selected {
                        SELECTED_OPACITY
                    } else {
                        UNSELECTED_OPACITY
                    },
                    weight: OVERLAY_WEIGHT,
                }
            })
            .collect()
    }
}

fn steps_of(option: &RouteOption) -> Vec<Step> {
    if option.steps.is_none() {
        tracing::warn!(
            anomaly = "malformed_response",
            option = option.option_name.as_str(),
            "route option has no steps, treating as empty"
        );
    }
    option.steps().to_vec()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use shared::{
        Coordinate, Location, RouteOption, RouteResult, Step, Traffic, TrafficZone, VehicleType,
        Weather, WeatherCondition,
    };

    pub fn location(name: &str, lat: f64, lng: f64) -> Location {
        Location {
            name: name.to_string(),
            lat,
            lng,
            kind: "commercial".into(),
            traffic_zone: TrafficZone::Medium,
            parking: true,
        }
    }

    pub fn step(instruction: &str, distance_m: f64, duration_s: f64) -> Step {
        Step {
            instruction: instruction.to_string(),
            distance_m,
            duration_s,
        }
    }

    pub fn option(name: &str, path: &[(f64, f64)], steps: Vec<Step>) -> RouteOption {
        RouteOption {
            option_name: name.to_string(),
            description: format!("{name} description"),
            distance_km: 3.4,
            duration_min: 9.0,
            original_duration: None,
            path: path.iter().map(|&(lat, lng)| Coordinate::new(lat, lng)).collect(),
            steps: Some(steps),
        }
    }

    pub fn result(options: Vec<RouteOption>) -> RouteResult {
        RouteResult {
            start: location("Clock Tower", 30.324133, 78.041545),
            end: location("ISBT Dehradun", 30.287645, 78.037608),
            weather: Weather {
                condition: WeatherCondition::Sunny,
                temperature: Some(27.0),
                precipitation: Some(0.0),
            },
            traffic: Traffic::Moderate,
            vehicle_type: VehicleType::Car,
            route_options: Some(options),
        }
    }

    pub fn three_options() -> RouteResult {
        result(vec![
            option(
                "Route 1: Fast (Shortest)",
                &[(30.0, 78.0), (30.1, 78.1)],
                vec![step("depart", 0.0, 0.0), step("turn left", 640.0, 75.0)],
            ),
            option(
                "Route 2: Scenic",
                &[(29.9, 77.9), (30.05, 78.05)],
                vec![step("continue straight", 1800.0, 240.0)],
            ),
            option(
                "Route 3: Alternative",
                &[(30.02, 78.02), (30.08, 78.04)],
                Vec::new(),
            ),
        ])
    }
}
