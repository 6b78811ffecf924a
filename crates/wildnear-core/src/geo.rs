//! Geodesy helpers for translating a search radius into API parameters and
//! map geometry

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude
const KM_PER_DEGREE_LAT: f64 = 111.0;

/// A geographic point, longitude first to match GeoJSON ordering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// Min/max latitude and longitude bounds around a center point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Convert a radius around a center into a lat/lng bounding box.
///
/// One degree of latitude is ~111 km everywhere; one degree of longitude
/// shrinks by cos(latitude) away from the equator.
pub fn bounding_box(center: GeoPoint, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE_LAT;
    let lng_delta = radius_km / (KM_PER_DEGREE_LAT * center.latitude.to_radians().cos());

    BoundingBox {
        min_latitude: center.latitude - lat_delta,
        max_latitude: center.latitude + lat_delta,
        min_longitude: center.longitude - lng_delta,
        max_longitude: center.longitude + lng_delta,
    }
}

/// Approximate a circle as a closed ring of `steps + 1` `[longitude,
/// latitude]` pairs. The first and last points are identical so the ring can
/// be fed directly to a GeoJSON polygon renderer.
pub fn circle_ring(center: GeoPoint, radius_km: f64, steps: usize) -> Vec<[f64; 2]> {
    let angular = (radius_km / EARTH_RADIUS_KM).to_degrees();
    let lat_compression = center.latitude.to_radians().cos();

    let mut ring = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let angle = (i as f64 / steps as f64) * std::f64::consts::TAU;
        let lat = center.latitude + angular * angle.sin();
        let lng = center.longitude + angular * angle.cos() / lat_compression;
        ring.push([lng, lat]);
    }
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    ring
}

/// Great-circle distance between two points in kilometers
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: GeoPoint = GeoPoint { longitude: -122.4194, latitude: 37.7749 };

    #[test]
    fn test_bounding_box_latitude_delta() {
        let bbox = bounding_box(CENTER, 25.0);
        let expected = 25.0 / 111.0;
        assert!((bbox.max_latitude - CENTER.latitude - expected).abs() < 1e-9);
        assert!((CENTER.latitude - bbox.min_latitude - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_longitude_widens_with_latitude() {
        let equator = bounding_box(GeoPoint { longitude: 0.0, latitude: 0.0 }, 10.0);
        let north = bounding_box(GeoPoint { longitude: 0.0, latitude: 60.0 }, 10.0);
        let eq_width = equator.max_longitude - equator.min_longitude;
        let north_width = north.max_longitude - north.min_longitude;
        // At 60°N a degree of longitude covers half the distance
        assert!((north_width / eq_width - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_circle_ring_is_closed() {
        let ring = circle_ring(CENTER, 10.0, 64);
        assert_eq!(ring.len(), 65);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_circle_ring_points_within_radius() {
        let radius = 10.0;
        let ring = circle_ring(CENTER, radius, 64);
        for [lng, lat] in ring {
            let d = haversine_km(CENTER, GeoPoint { longitude: lng, latitude: lat });
            assert!(d <= radius * 1.01, "point {d} km out for {radius} km radius");
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // San Francisco to Los Angeles, ~559 km
        let sf = GeoPoint { longitude: -122.4194, latitude: 37.7749 };
        let la = GeoPoint { longitude: -118.2437, latitude: 34.0522 };
        let d = haversine_km(sf, la);
        assert!((d - 559.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert_eq!(haversine_km(CENTER, CENTER), 0.0);
    }
}
