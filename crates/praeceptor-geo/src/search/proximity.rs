use std::cmp::Ordering;

use itertools::Itertools;
use praeceptor_geocoding::GeoPoint;

use super::distance::{BoundingBox, EARTH_RADIUS_KM, haversine_km_with_radius};
use crate::model::ProfileRecord;

/// An instructor known to be within the requested radius, together with its
/// exact great-circle distance from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityMatch {
    pub profile: ProfileRecord,
    pub distance_km: f64,
}

/// Find instructors within `radius_km` of `origin`.
///
/// Two-phase filter over a lazy candidate sequence: a [`BoundingBox`] range
/// check first, then the exact haversine distance. Candidates without a
/// coordinate are excluded (unenriched addresses are a legitimate state, not
/// an error), and non-instructor profiles are skipped even if the caller
/// passes them.
///
/// The returned iterator is lazy and preserves candidate order, so the box
/// phase can remain a pushed-down storage range query and the storage's own
/// ordering governs pagination. Use [`find_nearby_sorted`] when
/// distance-ascending order is wanted instead.
pub fn find_nearby(
    origin: GeoPoint,
    radius_km: f64,
    candidates: impl IntoIterator<Item = ProfileRecord>,
) -> impl Iterator<Item = ProximityMatch> {
    find_nearby_on_sphere(origin, radius_km, EARTH_RADIUS_KM, candidates)
}

/// [`find_nearby`] on a sphere of the given radius, for deployments that
/// override [`crate::GeoConfig::earth_radius_km`].
pub fn find_nearby_on_sphere(
    origin: GeoPoint,
    radius_km: f64,
    sphere_radius_km: f64,
    candidates: impl IntoIterator<Item = ProfileRecord>,
) -> impl Iterator<Item = ProximityMatch> {
    let bounds = BoundingBox::around(origin, radius_km);

    candidates.into_iter().filter_map(move |profile| {
        if !profile.is_instructor() {
            return None;
        }
        let point = profile.address.point?;
        if !bounds.contains(point) {
            return None;
        }
        let distance_km = haversine_km_with_radius(origin, point, sphere_radius_km);
        (distance_km <= radius_km).then_some(ProximityMatch {
            profile,
            distance_km,
        })
    })
}

/// Eager variant of [`find_nearby`] ordered by ascending distance, with the
/// profile id as tie-break so repeated queries paginate reproducibly.
pub fn find_nearby_sorted(
    origin: GeoPoint,
    radius_km: f64,
    candidates: impl IntoIterator<Item = ProfileRecord>,
) -> Vec<ProximityMatch> {
    find_nearby_sorted_on_sphere(origin, radius_km, EARTH_RADIUS_KM, candidates)
}

/// [`find_nearby_sorted`] on a sphere of the given radius.
pub fn find_nearby_sorted_on_sphere(
    origin: GeoPoint,
    radius_km: f64,
    sphere_radius_km: f64,
    candidates: impl IntoIterator<Item = ProfileRecord>,
) -> Vec<ProximityMatch> {
    find_nearby_on_sphere(origin, radius_km, sphere_radius_km, candidates)
        .sorted_by(compare_matches)
        .collect()
}

fn compare_matches(a: &ProximityMatch, b: &ProximityMatch) -> Ordering {
    a.distance_km
        .partial_cmp(&b.distance_km)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.profile.id.cmp(&b.profile.id))
}
