//! Proximity search over instructor profiles.
//!
//! The search is a two-phase filter rather than a spatial index: a
//! rectangular [`BoundingBox`] pre-filter (cheap enough to push down to
//! storage as a range query) followed by an exact great-circle distance
//! check. The lazy-iterator contract of [`find_nearby`] leaves room to swap
//! in a real spatial index later without changing callers.

mod distance;
mod proximity;
mod validate;

pub use distance::{BoundingBox, EARTH_RADIUS_KM, haversine_km, haversine_km_with_radius};
pub use proximity::{
    ProximityMatch, find_nearby, find_nearby_on_sphere, find_nearby_sorted,
    find_nearby_sorted_on_sphere,
};
pub use validate::{DEFAULT_RADIUS_KM, RawSearchParams, SearchQuery, ValidationError};
