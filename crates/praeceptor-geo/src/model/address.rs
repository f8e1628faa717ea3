use once_cell::sync::Lazy;
use praeceptor_geocoding::{GeoPoint, StructuredAddress};
use regex::Regex;

/// CEP shape: five digits, optional separator, three digits.
static CEP_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("CEP pattern compiles"));

/// An address owned by exactly one profile.
///
/// Only `postal_code` is required at creation; the coordinate and the
/// structured fields start out absent and are filled best-effort by
/// [`crate::enrich::enrich_address`] at write time. An address whose `point`
/// is `None` is a legitimate, permanently searchable-excluded state, not an
/// error.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressRecord {
    /// Postal code (CEP) as captured from the user.
    pub postal_code: String,
    /// Geocoded coordinates; both present or both absent.
    pub point: Option<GeoPoint>,
    pub street: Option<String>,
    /// House/building number; never touched by enrichment.
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    /// Free-form complement line; never touched by enrichment.
    pub complement: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl AddressRecord {
    pub fn new(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            ..Self::default()
        }
    }

    /// Whether the address already carries a coordinate pair.
    #[must_use]
    pub fn has_point(&self) -> bool {
        self.point.is_some()
    }

    /// Whether every postal-lookup-sourced field is present.
    ///
    /// `region` and `country` are not part of this check: the upstream
    /// fills them alongside the others, but their absence alone does not
    /// trigger another lookup.
    #[must_use]
    pub fn has_complete_postal_fields(&self) -> bool {
        self.street.is_some()
            && self.neighborhood.is_some()
            && self.city.is_some()
            && self.state.is_some()
    }

    /// Overwrite all structured fields from a postal-lookup result at once.
    ///
    /// All-or-nothing by construction: callers either have a whole
    /// [`StructuredAddress`] or they call nothing.
    pub fn apply_structured(&mut self, structured: StructuredAddress) {
        self.street = structured.street;
        self.neighborhood = structured.neighborhood;
        self.city = structured.city;
        self.state = structured.state;
        self.region = structured.region;
        self.country = Some(structured.country);
    }

    /// Postal code with every non-digit stripped.
    #[must_use]
    pub fn normalized_postal_code(&self) -> String {
        self.postal_code
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// Postal code rendered as `99999-999`, or verbatim when it does not
    /// normalize to eight digits.
    #[must_use]
    pub fn formatted_postal_code(&self) -> String {
        let digits = self.normalized_postal_code();
        if digits.len() == 8 {
            format!("{}-{}", &digits[..5], &digits[5..])
        } else {
            self.postal_code.clone()
        }
    }

    /// Whether the postal code matches the CEP shape (`99999-999` or
    /// `99999999`).
    #[must_use]
    pub fn has_valid_postal_code(&self) -> bool {
        CEP_SHAPE.is_match(&self.postal_code)
    }
}
