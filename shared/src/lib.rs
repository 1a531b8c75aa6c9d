use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A `[lat, lng]` pair. Serialized as a two-element array, the way the
/// routing backend emits path geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            lat: (self.lat + other.lat) / 2.0,
            lng: (self.lng + other.lng) / 2.0,
        }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lat, coord.lng]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseConditionError {
    kind: &'static str,
    value: String,
}

/// Declares a lowercase wire enum. Values outside the known set decode to
/// `Unknown` instead of failing the surrounding payload; `FromStr` rejects them.
macro_rules! condition_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant,)+
            #[serde(other)]
            Unknown,
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                    $name::Unknown => "unknown",
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseConditionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($key => Ok($name::$variant),)+
                    _ => Err(ParseConditionError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

condition_enum!(
    /// Travel mode of a query.
    VehicleType, "vehicle type" {
        Car => "car",
        Bike => "bike",
        Walk => "walk",
    }
);

condition_enum!(
    WeatherCondition, "weather condition" {
        Sunny => "sunny",
        Cloudy => "cloudy",
        Rainy => "rainy",
        Snowy => "snowy",
        Foggy => "foggy",
    }
);

condition_enum!(
    Traffic, "traffic level" {
        Light => "light",
        Moderate => "moderate",
        Heavy => "heavy",
    }
);

condition_enum!(
    TrafficZone, "traffic zone" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

impl Default for VehicleType {
    fn default() -> Self {
        VehicleType::Car
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub traffic_zone: TrafficZone,
    #[serde(default)]
    pub parking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_location: String,
    pub end_location: String,
    pub vehicle_type: VehicleType,
    /// Preferred alternative, recorded by the backend in the user's history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_option: Option<String>,
    /// Absent means "use current weather". Never serialized as null or "".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_weather: Option<WeatherCondition>,
}

/// One turn-by-turn instruction. Distance in meters, duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    #[serde(rename = "distance")]
    pub distance_m: f64,
    #[serde(rename = "duration")]
    pub duration_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub option_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "duration")]
    pub duration_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_duration: Option<f64>,
    pub path: Vec<Coordinate>,
    /// `None` when the backend omitted the field entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

impl RouteOption {
    pub fn steps(&self) -> &[Step] {
        self.steps.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub condition: WeatherCondition,
    /// Degrees Celsius. Missing when the user overrode the condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Percent chance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub start: Location,
    pub end: Location,
    pub weather: Weather,
    pub traffic: Traffic,
    pub vehicle_type: VehicleType,
    /// `None` when the backend omitted the field entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_options: Option<Vec<RouteOption>>,
}

impl RouteResult {
    pub fn options(&self) -> &[RouteOption] {
        self.route_options.as_deref().unwrap_or_default()
    }

    pub fn option(&self, name: &str) -> Option<&RouteOption> {
        self.options().iter().find(|opt| opt.option_name == name)
    }
}
