use praeceptor_geocoding::GeoPoint;

/// Mean Earth radius in kilometers; overridable through
/// [`crate::GeoConfig::earth_radius_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometers per degree of latitude, standard approximation.
const KM_PER_LATITUDE_DEGREE: f64 = 110.574;

/// Kilometers per degree of longitude at the equator.
const KM_PER_LONGITUDE_DEGREE: f64 = 111.320;

/// Floor for the latitude cosine so the longitude delta stays finite at the
/// poles.
const MIN_LATITUDE_COSINE: f64 = 1e-6;

/// Great-circle distance between two points, in kilometers, on the mean
/// Earth sphere.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_km_with_radius(a, b, EARTH_RADIUS_KM)
}

/// Haversine distance on a sphere of the given radius.
#[must_use]
pub fn haversine_km_with_radius(a: GeoPoint, b: GeoPoint, sphere_radius_km: f64) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    sphere_radius_km * c
}

/// Rectangular latitude/longitude window guaranteed to contain every point
/// within a given great-circle radius of its origin.
///
/// The box over-approximates (it admits corners farther than the radius),
/// which is fine: the exact distance check in phase two rejects them. What
/// it must never do is exclude a true match, and the per-degree
/// approximations with the polar cosine clamp preserve that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// The window of candidate points for a radius search around `origin`.
    #[must_use]
    pub fn around(origin: GeoPoint, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_LATITUDE_DEGREE;
        let lat_cosine = origin.latitude.to_radians().cos().max(MIN_LATITUDE_COSINE);
        let lon_delta = radius_km / (KM_PER_LONGITUDE_DEGREE * lat_cosine);

        Self {
            min_latitude: origin.latitude - lat_delta,
            max_latitude: origin.latitude + lat_delta,
            min_longitude: origin.longitude - lon_delta,
            max_longitude: origin.longitude + lon_delta,
        }
    }

    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIO: GeoPoint = GeoPoint::new(-22.9068, -43.1729);
    const SAO_PAULO: GeoPoint = GeoPoint::new(-23.55, -46.63);

    #[test]
    fn distance_to_self_is_zero() {
        for point in [
            RIO,
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(90.0, 0.0),
            GeoPoint::new(-90.0, 180.0),
            GeoPoint::new(45.5, -122.6),
        ] {
            assert_eq!(haversine_km(point, point), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (RIO, SAO_PAULO),
            (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0)),
            (GeoPoint::new(51.5, -0.12), GeoPoint::new(-33.87, 151.21)),
        ];
        for (a, b) in pairs {
            assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn rio_to_sao_paulo_is_roughly_360_km() {
        let d = haversine_km(RIO, SAO_PAULO);
        assert!((330.0..390.0).contains(&d), "got {d}");
    }

    #[test]
    fn sphere_radius_scales_the_result() {
        let unit = haversine_km_with_radius(RIO, SAO_PAULO, 1.0);
        let doubled = haversine_km_with_radius(RIO, SAO_PAULO, 2.0);
        assert!((doubled - 2.0 * unit).abs() < 1e-12);
    }

    #[test]
    fn box_never_excludes_a_true_match() {
        // Soundness of the two-phase filter: every grid point within the
        // radius must fall inside the box.
        let radius_km = 10.0;
        for origin in [RIO, GeoPoint::new(0.0, 0.0), GeoPoint::new(60.0, 30.0)] {
            let bounds = BoundingBox::around(origin, radius_km);
            for lat_step in -25..=25 {
                for lon_step in -25..=25 {
                    let candidate = GeoPoint::new(
                        origin.latitude + f64::from(lat_step) * 0.008,
                        origin.longitude + f64::from(lon_step) * 0.008,
                    );
                    if haversine_km(origin, candidate) <= radius_km {
                        assert!(
                            bounds.contains(candidate),
                            "box {bounds:?} excluded {candidate:?} at {} km",
                            haversine_km(origin, candidate)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn polar_box_stays_finite_and_non_degenerate() {
        let near_pole = GeoPoint::new(89.9, 10.0);
        let bounds = BoundingBox::around(near_pole, 10.0);

        assert!(bounds.min_longitude.is_finite());
        assert!(bounds.max_longitude.is_finite());
        assert!(bounds.max_longitude > bounds.min_longitude);
        assert!(bounds.max_latitude > bounds.min_latitude);
        assert!(bounds.contains(near_pole));
    }

    #[test]
    fn zero_radius_box_contains_only_the_origin_line() {
        let bounds = BoundingBox::around(RIO, 0.0);
        assert!(bounds.contains(RIO));
        assert!(!bounds.contains(GeoPoint::new(RIO.latitude + 1e-9, RIO.longitude)));
    }
}
