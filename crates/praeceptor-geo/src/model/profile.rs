use std::fmt;

use chrono::NaiveDate;
use praeceptor_geocoding::GeoPoint;

use super::AddressRecord;

/// Marketplace role discriminant. Only instructors participate in proximity
/// search.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileRole {
    Client,
    Instructor,
}

impl ProfileRole {
    /// The persisted discriminant string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Instructor => "instructor",
        }
    }
}

impl fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marketplace member (client or instructor) and the single address it
/// exclusively owns.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    /// Storage identifier.
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Brazilian taxpayer id, digits only.
    pub cpf: String,
    /// Phone number, digits only (10 or 11 digits including area code).
    pub phone: String,
    pub birthdate: NaiveDate,
    pub role: ProfileRole,
    /// The profile's address; its lifetime is coupled to the profile's.
    pub address: AddressRecord,
}

impl ProfileRecord {
    #[must_use]
    pub fn is_instructor(&self) -> bool {
        self.role == ProfileRole::Instructor
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Convenience accessor for the address coordinate.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        self.address.point
    }

    /// Phone rendered as `(99) 99999-9999` (11 digits) or `(99) 9999-9999`
    /// (10 digits); any other length passes through verbatim.
    #[must_use]
    pub fn formatted_phone(&self) -> String {
        match self.phone.len() {
            11 => format!(
                "({}) {}-{}",
                &self.phone[..2],
                &self.phone[2..7],
                &self.phone[7..]
            ),
            10 => format!(
                "({}) {}-{}",
                &self.phone[..2],
                &self.phone[2..6],
                &self.phone[6..]
            ),
            _ => self.phone.clone(),
        }
    }
}
