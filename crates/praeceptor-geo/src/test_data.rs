//! Deterministic sample profiles for tests, demos, and local seeding.
//!
//! The generator is fully deterministic (same config, same profiles), so
//! tests that assert on counts or positions stay stable. Instructors are
//! scattered around a configurable center (central Rio de Janeiro by
//! default), with every fifth profile an instructor, matching the
//! production seed ratio.

use chrono::NaiveDate;
use praeceptor_geocoding::GeoPoint;
use tracing::debug;

use crate::model::{AddressRecord, ProfileRecord, ProfileRole};

/// Central Rio de Janeiro, the default cluster center.
pub const RIO_DE_JANEIRO: GeoPoint = GeoPoint::new(-22.9068, -43.1729);

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Diego", "Elisa", "Felipe", "Gabriela", "Heitor", "Isabela", "João",
    "Larissa", "Marcos", "Natália", "Otávio", "Paula",
];

const LAST_NAMES: &[&str] = &[
    "Silva", "Santos", "Oliveira", "Souza", "Pereira", "Costa", "Rodrigues", "Almeida", "Nascimento",
    "Lima",
];

/// Configuration for sample profile generation.
#[derive(Debug, Clone)]
pub struct SampleProfilesConfig {
    /// Total number of profiles to generate.
    pub profiles: usize,
    /// Cluster center for generated coordinates.
    pub center: GeoPoint,
    /// Maximum coordinate offset from the center, in degrees.
    pub spread_degrees: f64,
    /// Fraction of profiles left without a coordinate, expressed as
    /// one-in-N (0 disables). Mirrors real data, where enrichment does not
    /// always succeed.
    pub unenriched_every: usize,
}

impl Default for SampleProfilesConfig {
    fn default() -> Self {
        Self {
            profiles: 50,
            center: RIO_DE_JANEIRO,
            spread_degrees: 0.08,
            unenriched_every: 10,
        }
    }
}

impl SampleProfilesConfig {
    /// Minimal set for unit tests.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            profiles: 10,
            ..Self::default()
        }
    }

    /// Larger set for integration tests.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            profiles: 200,
            ..Self::default()
        }
    }
}

/// Generate deterministic sample profiles.
///
/// Every fifth profile (indices 0, 5, 10, …) is an instructor; the rest are
/// clients. Every `unenriched_every`-th profile is left without a
/// coordinate.
#[must_use]
pub fn create_sample_profiles(config: &SampleProfilesConfig) -> Vec<ProfileRecord> {
    debug!(profiles = config.profiles, "creating sample profiles");

    (0..config.profiles)
        .map(|index| {
            let first_name = FIRST_NAMES[index % FIRST_NAMES.len()];
            let last_name = LAST_NAMES[(index / FIRST_NAMES.len() + index) % LAST_NAMES.len()];
            let role = if index % 5 == 0 {
                ProfileRole::Instructor
            } else {
                ProfileRole::Client
            };

            let point = (config.unenriched_every == 0 || index % config.unenriched_every != 3)
                .then(|| sample_point(config, index));

            ProfileRecord {
                id: index as u64 + 1,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: format!(
                    "{}.{}{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    index
                ),
                cpf: format!("{:011}", 10_000_000_000_u64 + index as u64 * 97),
                phone: format!("21{:09}", 900_000_000 + index * 131),
                birthdate: sample_birthdate(index),
                role,
                address: AddressRecord {
                    postal_code: format!("{:05}-{:03}", 20000 + index % 1000, index % 1000),
                    point,
                    ..AddressRecord::default()
                },
            }
        })
        .collect()
}

/// A deterministic pseudo-scattered point inside the configured spread.
fn sample_point(config: &SampleProfilesConfig, index: usize) -> GeoPoint {
    // Low-discrepancy-ish scatter from two coprime multipliers; good enough
    // for test fixtures and fully reproducible.
    let unit_lat = f64::from((index as u32).wrapping_mul(37) % 1000) / 1000.0;
    let unit_lon = f64::from((index as u32).wrapping_mul(61) % 1000) / 1000.0;

    GeoPoint::new(
        config.center.latitude + (unit_lat - 0.5) * 2.0 * config.spread_degrees,
        config.center.longitude + (unit_lon - 0.5) * 2.0 * config.spread_degrees,
    )
}

fn sample_birthdate(index: usize) -> NaiveDate {
    let year = 1975 + (index % 32) as i32;
    let month = 1 + (index % 12) as u32;
    let day = 1 + (index % 28) as u32;
    NaiveDate::from_ymd_opt(year, month, day).expect("generated date is always valid")
}
