//! Icon and badge tone lookups for the condition enums.
//!
//! Each lookup is an exhaustive match. The `Unknown` arm is explicit and
//! logged so an unexpected backend key never silently picks an icon.

use shared::{Traffic, VehicleType, WeatherCondition};

use crate::format::Maneuver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    WbSunny,
    Cloud,
    Umbrella,
    AcUnit,
    FilterDrama,
    CheckCircle,
    Speed,
    Warning,
    DirectionsCar,
    DirectionsBike,
    DirectionsWalk,
    TurnLeft,
    TurnRight,
    Straight,
    ArrowRightAlt,
}

impl Glyph {
    /// Material icon name understood by the rendering collaborator.
    pub fn name(self) -> &'static str {
        match self {
            Glyph::WbSunny => "wb_sunny",
            Glyph::Cloud => "cloud",
            Glyph::Umbrella => "beach_access",
            Glyph::AcUnit => "ac_unit",
            Glyph::FilterDrama => "filter_drama",
            Glyph::CheckCircle => "check_circle",
            Glyph::Speed => "speed",
            Glyph::Warning => "warning",
            Glyph::DirectionsCar => "directions_car",
            Glyph::DirectionsBike => "directions_bike",
            Glyph::DirectionsWalk => "directions_walk",
            Glyph::TurnLeft => "turn_left",
            Glyph::TurnRight => "turn_right",
            Glyph::Straight => "straight",
            Glyph::ArrowRightAlt => "arrow_right_alt",
        }
    }
}

/// A glyph with an optional tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub glyph: Glyph,
    pub tint: Option<&'static str>,
}

impl Icon {
    const fn tinted(glyph: Glyph, tint: &'static str) -> Self {
        Self {
            glyph,
            tint: Some(tint),
        }
    }

    const fn plain(glyph: Glyph) -> Self {
        Self { glyph, tint: None }
    }
}

pub fn weather_icon(condition: WeatherCondition) -> Icon {
    match condition {
        WeatherCondition::Sunny => Icon::tinted(Glyph::WbSunny, "#FFB900"),
        WeatherCondition::Cloudy => Icon::tinted(Glyph::Cloud, "#757575"),
        WeatherCondition::Rainy => Icon::tinted(Glyph::Umbrella, "#0078D7"),
        WeatherCondition::Snowy => Icon::tinted(Glyph::AcUnit, "#00B7C3"),
        WeatherCondition::Foggy => Icon::tinted(Glyph::FilterDrama, "#9E9E9E"),
        WeatherCondition::Unknown => {
            tracing::warn!("unknown weather condition, showing sunny icon");
            weather_icon(WeatherCondition::Sunny)
        }
    }
}

pub fn traffic_icon(traffic: Traffic) -> Icon {
    match traffic {
        Traffic::Light => Icon::tinted(Glyph::CheckCircle, "#107C10"),
        Traffic::Moderate => Icon::tinted(Glyph::Speed, "#FFB900"),
        Traffic::Heavy => Icon::tinted(Glyph::Warning, "#E81123"),
        Traffic::Unknown => {
            tracing::warn!("unknown traffic level, showing light traffic icon");
            traffic_icon(Traffic::Light)
        }
    }
}

pub fn vehicle_icon(vehicle: VehicleType) -> Icon {
    match vehicle {
        VehicleType::Car => Icon::plain(Glyph::DirectionsCar),
        VehicleType::Bike => Icon::plain(Glyph::DirectionsBike),
        VehicleType::Walk => Icon::plain(Glyph::DirectionsWalk),
        VehicleType::Unknown => {
            tracing::warn!("unknown vehicle type, showing car icon");
            vehicle_icon(VehicleType::Car)
        }
    }
}

pub fn maneuver_icon(maneuver: Maneuver) -> Icon {
    match maneuver {
        Maneuver::TurnLeft => Icon::plain(Glyph::TurnLeft),
        Maneuver::TurnRight => Icon::plain(Glyph::TurnRight),
        Maneuver::GoStraight => Icon::plain(Glyph::Straight),
        Maneuver::Other => Icon::plain(Glyph::ArrowRightAlt),
    }
}

/// Background tone of the traffic badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

pub fn traffic_tone(traffic: Traffic) -> Tone {
    match traffic {
        Traffic::Light => Tone::Success,
        Traffic::Moderate => Tone::Warning,
        Traffic::Heavy => Tone::Error,
        Traffic::Unknown => {
            tracing::warn!("unknown traffic level, using error tone");
            Tone::Error
        }
    }
}
