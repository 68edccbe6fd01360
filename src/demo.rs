//! Built-in sample data used when no backend is configured, and the
//! populate operation that seeds a configured backend with it.

use crate::geo::GeoPoint;
use crate::shipment::{TrackedShipment, Vessel, VesselKind, VesselStatus};
use crate::store::RestStore;
use chrono::{DateTime, Utc};

fn eta(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date).ok().map(|d| d.with_timezone(&Utc))
}

pub fn demo_shipments() -> Vec<TrackedShipment> {
    vec![
        TrackedShipment {
            id: "PRD001".to_string(),
            name: "Premium Coffee Beans".to_string(),
            origin_name: "Colombia".to_string(),
            destination_name: "New York".to_string(),
            vessel_name: "SS Maritime Explorer".to_string(),
            status: "In Transit".to_string(),
            eta: eta("2025-04-20T00:00:00Z"),
            image: "https://images.unsplash.com/photo-1618160702438-9b02ab6515c9?w=500&auto=format".to_string(),
            current_position: Some(GeoPoint::new(25.7617, -80.1918)),
        },
        TrackedShipment {
            id: "PRD002".to_string(),
            name: "Scandinavian Furniture".to_string(),
            origin_name: "Sweden".to_string(),
            destination_name: "Los Angeles".to_string(),
            vessel_name: "MV Nordic Star".to_string(),
            status: "Loading".to_string(),
            eta: eta("2025-04-25T00:00:00Z"),
            image: "https://images.unsplash.com/photo-1721322800607-8c38375eef04?w=500&auto=format".to_string(),
            current_position: Some(GeoPoint::new(57.7089, 11.9746)),
        },
        TrackedShipment {
            id: "PRD003".to_string(),
            name: "Organic Tea Collection".to_string(),
            origin_name: "India".to_string(),
            destination_name: "London".to_string(),
            vessel_name: "SS Ocean Voyager".to_string(),
            status: "Departed".to_string(),
            eta: eta("2025-04-18T00:00:00Z"),
            image: "https://images.unsplash.com/photo-1582562124811-c09040d0a901?w=500&auto=format".to_string(),
            current_position: Some(GeoPoint::new(19.076, 72.8777)),
        },
    ]
}

pub fn demo_vessels() -> Vec<Vessel> {
    vec![
        Vessel {
            id: "SH-2938".to_string(),
            name: "Aurora Vessel".to_string(),
            kind: VesselKind::Cargo,
            status: VesselStatus::Active,
            location: "North Atlantic".to_string(),
            position: GeoPoint::new(45.0, -40.0),
            updated_minutes_ago: 2,
        },
        Vessel {
            id: "SH-2356".to_string(),
            name: "Oceanic Explorer".to_string(),
            kind: VesselKind::Tanker,
            status: VesselStatus::InPort,
            location: "Rotterdam".to_string(),
            position: GeoPoint::new(51.95, 4.14),
            updated_minutes_ago: 15,
        },
        Vessel {
            id: "SH-1092".to_string(),
            name: "Northern Voyager".to_string(),
            kind: VesselKind::Passenger,
            status: VesselStatus::Active,
            location: "Mediterranean".to_string(),
            position: GeoPoint::new(38.0, 15.0),
            updated_minutes_ago: 8,
        },
        Vessel {
            id: "SH-4508".to_string(),
            name: "Pacific Star".to_string(),
            kind: VesselKind::Container,
            status: VesselStatus::Active,
            location: "Pacific Ocean".to_string(),
            position: GeoPoint::new(10.0, -150.0),
            updated_minutes_ago: 5,
        },
        Vessel {
            id: "SH-7123".to_string(),
            name: "Atlantic Meridian".to_string(),
            kind: VesselKind::Cargo,
            status: VesselStatus::Anchored,
            location: "Singapore Strait".to_string(),
            position: GeoPoint::new(1.25, 103.8),
            updated_minutes_ago: 23,
        },
    ]
}

/// Seeds a configured backend with the demo shipments. Failures are logged
/// per record and do not stop the remaining inserts.
pub fn populate(store: &RestStore) -> usize {
    let mut created = 0;
    for shipment in demo_shipments() {
        match store.create(&shipment) {
            Ok(()) => {
                log::info!("seeded {}", shipment.id);
                created += 1;
            }
            Err(e) => log::warn!("failed to seed {}: {}", shipment.id, e),
        }
    }
    created
}
