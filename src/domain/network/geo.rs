use std::fmt::Debug;

use crate::domain::network::node::Node;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance service between two nodes. Projection math lives outside the core;
/// the engine only ever asks "how far apart are these two nodes".
pub trait DistanceMetric: Debug + Send + Sync {
    fn distance_km(&self, a: &Node, b: &Node) -> f64;
}

/// Great-circle distance on a spherical earth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_km(&self, a: &Node, b: &Node) -> f64 {
        let d_lat = (b.lat - a.lat).to_radians();
        let d_lon = (b.lon - a.lon).to_radians();
        let lat_a = a.lat.to_radians();
        let lat_b = b.lat.to_radians();

        let s = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * s.sqrt().asin()
    }
}
