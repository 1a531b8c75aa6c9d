//! Display strings and colors derived from route data.
//!
//! Everything here is a pure function of its arguments; the presentation
//! layer calls these on whatever the engine currently exposes.

use std::fmt;

use shared::{Step, Traffic, VehicleType, Weather, WeatherCondition};

/// Kind of maneuver an instruction describes, used to pick a direction glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    TurnLeft,
    TurnRight,
    GoStraight,
    Other,
}

/// Case-insensitive substring test, first match wins in the order
/// "left", "right", "straight".
pub fn classify_instruction(text: &str) -> Maneuver {
    let text = text.to_lowercase();
    if text.contains("left") {
        Maneuver::TurnLeft
    } else if text.contains("right") {
        Maneuver::TurnRight
    } else if text.contains("straight") {
        Maneuver::GoStraight
    } else {
        Maneuver::Other
    }
}

/// `999` -> `"999 m"`, `2500` -> `"2.5 km"`.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// `45` -> `"45 sec"`, `90` -> `"1 min"`. Minutes are floored, never rounded.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    if minutes < 1.0 {
        format!("{} sec", seconds.round() as i64)
    } else {
        format!("{} min", minutes as i64)
    }
}

const CAR_HUE: &str = "#1976d2";
const BIKE_HUE: &str = "#2e7d32";
const WALK_HUE: &str = "#ed6c02";
const FALLBACK_HUE: &str = "#757575";

/// Hex alpha suffixes, strongest first.
const OPACITY_RAMP: [&str; 3] = ["", "99", "66"];

/// Polyline color for one alternative: a vehicle hue plus an alpha suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteColor {
    pub hue: &'static str,
    pub alpha: &'static str,
}

impl fmt::Display for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hue, self.alpha)
    }
}

/// The ramp wraps, so the fourth alternative gets full opacity again.
pub fn color_for_option(vehicle: VehicleType, route_index: usize) -> RouteColor {
    let hue = match vehicle {
        VehicleType::Car => CAR_HUE,
        VehicleType::Bike => BIKE_HUE,
        VehicleType::Walk => WALK_HUE,
        VehicleType::Unknown => {
            tracing::warn!(route_index, "no hue for unknown vehicle type, using fallback");
            FALLBACK_HUE
        }
    };
    RouteColor {
        hue,
        alpha: OPACITY_RAMP[route_index % OPACITY_RAMP.len()],
    }
}

pub fn weather_description(weather: &Weather) -> String {
    let label = match weather.condition {
        WeatherCondition::Sunny => "Sunny",
        WeatherCondition::Cloudy => "Cloudy",
        WeatherCondition::Rainy => "Rainy",
        WeatherCondition::Snowy => "Snowy",
        WeatherCondition::Foggy => "Foggy",
        WeatherCondition::Unknown => {
            tracing::warn!("no description for unknown weather condition");
            return String::new();
        }
    };

    let Some(temperature) = weather.temperature else {
        return label.to_string();
    };
    let mut text = format!("{label}, {temperature}°C");
    if matches!(
        weather.condition,
        WeatherCondition::Rainy | WeatherCondition::Snowy
    ) && let Some(precipitation) = weather.precipitation
    {
        text.push_str(&format!(", {precipitation}% precipitation"));
    }
    text
}

pub fn traffic_description(traffic: Traffic) -> &'static str {
    match traffic {
        Traffic::Light => "Light traffic, good road conditions",
        Traffic::Moderate => "Moderate traffic, expect minor delays",
        Traffic::Heavy => "Heavy traffic, significant delays expected",
        Traffic::Unknown => {
            tracing::warn!("no description for unknown traffic level");
            ""
        }
    }
}

/// A step ready for a directions list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub maneuver: Maneuver,
    pub instruction: String,
    pub detail: String,
}

pub fn describe_step(step: &Step) -> StepView {
    StepView {
        maneuver: classify_instruction(&step.instruction),
        instruction: capitalize(&step.instruction),
        detail: format!(
            "{} - {}",
            format_distance(step.distance_m),
            format_duration(step.duration_s)
        ),
    }
}

pub fn distance_chip(distance_km: f64) -> String {
    format!("{distance_km} km")
}

pub fn duration_chip(duration_min: f64) -> String {
    format!("{duration_min} min")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
