//! Shipment and vessel records as stored in the hosted backend.
//!
//! TrackedShipment mirrors the `shipments` table row shape; Vessel is the
//! fleet roster shown on the dashboard and fleet map.

use crate::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single product shipment: what is being shipped, between which places,
/// on which vessel, and where it currently is.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TrackedShipment {
    pub id: String,
    pub name: String,
    #[serde(rename = "origin")]
    pub origin_name: String,
    #[serde(rename = "destination")]
    pub destination_name: String,
    #[serde(rename = "ship")]
    pub vessel_name: String,
    pub status: String,
    #[serde(default)]
    pub eta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "coordinates", default)]
    pub current_position: Option<GeoPoint>,
}

impl TrackedShipment {
    /// Functional position update: returns a new record rather than mutating
    /// in place, keeping one-way data flow intact for rendering.
    pub fn with_position(&self, position: GeoPoint) -> Self {
        let mut next = self.clone();
        next.current_position = Some(position);
        next
    }

    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.id.to_lowercase().contains(&q)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum VesselKind {
    Cargo,
    Tanker,
    Passenger,
    Container,
}

impl VesselKind {
    pub fn label(&self) -> &'static str {
        match self {
            VesselKind::Cargo => "Cargo",
            VesselKind::Tanker => "Tanker",
            VesselKind::Passenger => "Passenger",
            VesselKind::Container => "Container",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum VesselStatus {
    Active,
    InPort,
    Anchored,
}

impl VesselStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VesselStatus::Active => "Active",
            VesselStatus::InPort => "In Port",
            VesselStatus::Anchored => "Anchored",
        }
    }
}

/// A vessel in the fleet roster.
#[derive(Clone, PartialEq, Debug)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub kind: VesselKind,
    pub status: VesselStatus,
    pub location: String,
    pub position: GeoPoint,
    pub updated_minutes_ago: u32,
}

impl Vessel {
    pub fn last_update_label(&self) -> String {
        format!("{} min ago", self.updated_minutes_ago)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.id.to_lowercase().contains(&q)
    }
}

/// Fleet-level counts for the dashboard stat cards.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct FleetStats {
    pub active: usize,
    pub in_port: usize,
    pub en_route: usize,
    pub routes: usize,
}

pub fn fleet_stats(vessels: &[Vessel], shipments: &[TrackedShipment]) -> FleetStats {
    let mut stats = FleetStats::default();
    for v in vessels {
        match v.status {
            VesselStatus::Active => {
                stats.active += 1;
                stats.en_route += 1;
            }
            VesselStatus::InPort => stats.in_port += 1,
            VesselStatus::Anchored => stats.active += 1,
        }
    }
    let mut routes: Vec<(&str, &str)> = shipments
        .iter()
        .map(|s| (s.origin_name.as_str(), s.destination_name.as_str()))
        .collect();
    routes.sort_unstable();
    routes.dedup();
    stats.routes = routes.len();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    fn shipment() -> TrackedShipment {
        TrackedShipment {
            id: "PRD002".to_string(),
            name: "Scandinavian Furniture".to_string(),
            origin_name: "Sweden".to_string(),
            destination_name: "Los Angeles".to_string(),
            vessel_name: "MV Nordic Star".to_string(),
            status: "Loading".to_string(),
            eta: None,
            image: String::new(),
            current_position: Some(GeoPoint::new(57.7089, 11.9746)),
        }
    }

    #[test]
    fn with_position_does_not_mutate_original() {
        let before = shipment();
        let after = before.with_position(GeoPoint::new(40.0, -60.0));
        assert_eq!(before.current_position, Some(GeoPoint::new(57.7089, 11.9746)));
        assert_eq!(after.current_position, Some(GeoPoint::new(40.0, -60.0)));
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn shipment_row_round_trips_through_json() {
        let json = r#"{
            "id": "PRD001",
            "name": "Premium Coffee Beans",
            "origin": "Colombia",
            "destination": "New York",
            "ship": "SS Maritime Explorer",
            "status": "In Transit",
            "eta": "2025-04-20T00:00:00Z",
            "image": "",
            "coordinates": { "lat": 25.7617, "lng": -80.1918 }
        }"#;
        let s: TrackedShipment = serde_json::from_str(json).unwrap();
        assert_eq!(s.origin_name, "Colombia");
        assert_eq!(s.vessel_name, "SS Maritime Explorer");
        assert_eq!(s.current_position, Some(GeoPoint::new(25.7617, -80.1918)));
        assert!(s.eta.is_some());
    }

    #[test]
    fn shipment_row_tolerates_missing_coordinates() {
        let json = r#"{
            "id": "PRD009",
            "name": "Spare Parts",
            "origin": "London",
            "destination": "New York",
            "ship": "SS Test",
            "status": "Pending"
        }"#;
        let s: TrackedShipment = serde_json::from_str(json).unwrap();
        assert_eq!(s.current_position, None);
        assert_eq!(s.eta, None);
    }

    #[test]
    fn query_matching_is_case_insensitive() {
        let s = shipment();
        assert!(s.matches_query(""));
        assert!(s.matches_query("prd002"));
        assert!(s.matches_query("furniture"));
        assert!(!s.matches_query("coffee"));
    }

    #[test]
    fn fleet_stats_counts_statuses_and_routes() {
        let vessels = vec![
            Vessel {
                id: "SH-1".into(),
                name: "A".into(),
                kind: VesselKind::Cargo,
                status: VesselStatus::Active,
                location: "North Atlantic".into(),
                position: GeoPoint::new(0.0, 0.0),
                updated_minutes_ago: 2,
            },
            Vessel {
                id: "SH-2".into(),
                name: "B".into(),
                kind: VesselKind::Tanker,
                status: VesselStatus::InPort,
                location: "Rotterdam".into(),
                position: GeoPoint::new(51.9, 4.1),
                updated_minutes_ago: 15,
            },
        ];
        let mut s1 = shipment();
        let s2 = shipment();
        s1.id = "PRD001".into();
        s1.origin_name = "Colombia".into();
        let stats = fleet_stats(&vessels, &[s1, s2]);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.in_port, 1);
        assert_eq!(stats.en_route, 1);
        assert_eq!(stats.routes, 2);
    }
}
