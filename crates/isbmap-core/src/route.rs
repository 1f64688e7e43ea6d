// crates/isbmap-core/src/route.rs

//! Routing adapter view types.
//!
//! Actual route computation is delegated to the external turn-by-turn
//! service; these are the shapes its responses are carried in for the
//! directions panel and the print view.

use serde::{Deserialize, Serialize};

use crate::geo::format_duration_min;

/// Maneuver classification as reported by the routing service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManeuverKind {
    Straight,
    SlightRight,
    Right,
    SharpRight,
    TurnAround,
    SharpLeft,
    Left,
    SlightLeft,
    WaypointReached,
    Roundabout,
    DestinationReached,
}

impl ManeuverKind {
    /// Direction icon for the instruction list.
    pub fn icon(self) -> &'static str {
        match self {
            ManeuverKind::Straight => "fa-arrow-up",
            ManeuverKind::SlightRight | ManeuverKind::Right | ManeuverKind::SharpRight => {
                "fa-arrow-right"
            }
            ManeuverKind::TurnAround => "fa-undo",
            ManeuverKind::SharpLeft | ManeuverKind::Left | ManeuverKind::SlightLeft => {
                "fa-arrow-left"
            }
            ManeuverKind::Roundabout => "fa-circle-notch",
            ManeuverKind::WaypointReached | ManeuverKind::DestinationReached => {
                "fa-flag-checkered"
            }
        }
    }
}

/// One turn-by-turn instruction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteStep {
    pub kind: ManeuverKind,
    pub text: String,
    /// Distance covered by this step, in meters.
    pub distance_m: f64,
}

impl RouteStep {
    /// Step distance for display, in kilometers to two decimals.
    pub fn distance_text(&self) -> String {
        format!("{:.2} km", self.distance_m / 1000.0)
    }
}

/// A computed route between the user and a facility.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: u32,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// "12.34 km" form used by the route header.
    pub fn distance_text(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }

    /// "45 min" / "1h 20m" form used by the route header.
    pub fn duration_text(&self) -> String {
        format_duration_min(self.duration_min)
    }
}
