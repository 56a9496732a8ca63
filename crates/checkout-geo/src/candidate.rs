//! # Candidates and Verdicts
//!
//! What the address directory hands back, in the shape the storefront
//! consumes.
//!
//! ## Wire Mapping
//! ```text
//! ┌──────────────────────────────────────┐      ┌───────────────────────────┐
//! │  GeoJSON Feature                     │      │ ExternalAddressCandidate  │
//! │                                      │      │                           │
//! │  properties.label        ───────────►│─────►│ label                     │
//! │  properties.housenumber  ───────────►│─────►│ streetNumber              │
//! │  properties.street | name ──────────►│─────►│ streetName                │
//! │  properties.postcode     ───────────►│─────►│ postalCode                │
//! │  properties.city         ───────────►│─────►│ city                      │
//! │  properties.score (or 0) ───────────►│─────►│ score                     │
//! │  properties.type         ───────────►│─────►│ type                      │
//! │  geometry.coordinates [lon, lat] ───►│─────►│ coordinates { lat, lon }  │
//! │  (whole feature)         ───────────►│─────►│ raw                       │
//! └──────────────────────────────────────┘      └───────────────────────────┘
//! ```

use checkout_core::AddressComponents;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Scores strictly above this mark make an address acceptable.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

// =============================================================================
// Candidate
// =============================================================================

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One suggestion returned by the address directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAddressCandidate {
    /// Full display label, e.g. "12 Rue de la Paix 75002 Paris".
    pub label: String,
    pub street_number: String,
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
    pub coordinates: Option<Coordinates>,
    /// Relevance in [0, 1]; 0 when the directory did not send one.
    pub score: f64,
    /// Granularity of the match (housenumber, street, municipality, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// The feature exactly as the directory sent it.
    pub raw: Value,
}

impl ExternalAddressCandidate {
    /// The candidate as order address parts.
    pub fn components(&self) -> AddressComponents {
        AddressComponents {
            street_number: self.street_number.clone(),
            street_name: self.street_name.clone(),
            postal_code: self.postal_code.clone(),
        }
    }

    /// Maps one GeoJSON feature. Returns `None` when the feature carries no
    /// `properties` object.
    pub fn from_feature(feature: &Value) -> Option<Self> {
        let parsed = Feature::deserialize(feature).ok()?;
        let props = parsed.properties?;

        let coordinates = parsed
            .geometry
            .and_then(|geometry| match geometry.coordinates.as_slice() {
                [lon, lat, ..] => Some(Coordinates {
                    lat: *lat,
                    lon: *lon,
                }),
                _ => None,
            });

        Some(ExternalAddressCandidate {
            label: props.label.unwrap_or_default(),
            street_number: props.housenumber.unwrap_or_default(),
            street_name: props.street.or(props.name).unwrap_or_default(),
            postal_code: props.postcode.unwrap_or_default(),
            city: props.city.unwrap_or_default(),
            coordinates,
            score: props.score.unwrap_or(0.0),
            kind: props.kind.unwrap_or_default(),
            raw: feature.clone(),
        })
    }
}

// =============================================================================
// GeoJSON wire format
// =============================================================================

/// Top-level directory response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Value>,
}

impl FeatureCollection {
    /// Every feature that maps to a candidate, in directory order.
    pub fn into_candidates(self) -> Vec<ExternalAddressCandidate> {
        self.features
            .iter()
            .filter_map(ExternalAddressCandidate::from_feature)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    label: Option<String>,
    housenumber: Option<String>,
    street: Option<String>,
    name: Option<String>,
    postcode: Option<String>,
    city: Option<String>,
    score: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<f64>,
}

// =============================================================================
// Verdict
// =============================================================================

/// Whether an address the customer typed matches a known address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddressValidationVerdict {
    pub valid: bool,
    #[serde(rename = "match")]
    pub best_match: Option<ExternalAddressCandidate>,
    pub score: f64,
}

impl AddressValidationVerdict {
    /// Verdict for the directory's top result, if any.
    ///
    /// Valid only when the score is strictly above [`ACCEPTANCE_THRESHOLD`].
    pub fn from_best(best: Option<ExternalAddressCandidate>) -> Self {
        match best {
            Some(candidate) => AddressValidationVerdict {
                valid: candidate.score > ACCEPTANCE_THRESHOLD,
                score: candidate.score,
                best_match: Some(candidate),
            },
            None => Self::no_match(),
        }
    }

    /// Invalid verdict with no candidate and a zero score.
    pub fn no_match() -> Self {
        AddressValidationVerdict {
            valid: false,
            best_match: None,
            score: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paix_feature() -> Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [2.331, 48.869] },
            "properties": {
                "label": "12 Rue de la Paix 75002 Paris",
                "score": 0.93,
                "housenumber": "12",
                "name": "12 Rue de la Paix",
                "street": "Rue de la Paix",
                "postcode": "75002",
                "city": "Paris",
                "type": "housenumber"
            }
        })
    }

    #[test]
    fn test_feature_mapping() {
        let candidate = ExternalAddressCandidate::from_feature(&paix_feature()).unwrap();
        assert_eq!(candidate.label, "12 Rue de la Paix 75002 Paris");
        assert_eq!(candidate.street_number, "12");
        assert_eq!(candidate.street_name, "Rue de la Paix");
        assert_eq!(candidate.postal_code, "75002");
        assert_eq!(candidate.city, "Paris");
        assert_eq!(candidate.kind, "housenumber");
        assert_eq!(candidate.score, 0.93);
        assert_eq!(
            candidate.coordinates,
            Some(Coordinates {
                lat: 48.869,
                lon: 2.331
            })
        );
        assert_eq!(candidate.raw, paix_feature());
    }

    #[test]
    fn test_street_falls_back_to_name() {
        let feature = json!({
            "properties": { "name": "Avenue Foch", "type": "street" }
        });
        let candidate = ExternalAddressCandidate::from_feature(&feature).unwrap();
        assert_eq!(candidate.street_name, "Avenue Foch");
        assert_eq!(candidate.street_number, "");
        assert_eq!(candidate.score, 0.0);
        assert_eq!(candidate.coordinates, None);
    }

    #[test]
    fn test_feature_without_properties_is_skipped() {
        let collection: FeatureCollection = serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": [ { "geometry": null }, paix_feature(), "garbage" ]
        }))
        .unwrap();
        let candidates = collection.into_candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].postal_code, "75002");
    }

    #[test]
    fn test_components() {
        let candidate = ExternalAddressCandidate::from_feature(&paix_feature()).unwrap();
        let parts = candidate.components();
        assert_eq!(parts.street_number, "12");
        assert_eq!(parts.street_name, "Rue de la Paix");
        assert_eq!(parts.postal_code, "75002");
    }

    #[test]
    fn test_verdict_threshold_is_strict() {
        let mut candidate = ExternalAddressCandidate::from_feature(&paix_feature()).unwrap();

        candidate.score = 0.5;
        let verdict = AddressValidationVerdict::from_best(Some(candidate.clone()));
        assert!(!verdict.valid);
        assert_eq!(verdict.score, 0.5);
        assert!(verdict.best_match.is_some());

        candidate.score = 0.51;
        assert!(AddressValidationVerdict::from_best(Some(candidate)).valid);

        let none = AddressValidationVerdict::from_best(None);
        assert!(!none.valid);
        assert_eq!(none.score, 0.0);
        assert!(none.best_match.is_none());
    }

    #[test]
    fn test_verdict_serializes_match_key() {
        let verdict = AddressValidationVerdict::no_match();
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value, json!({ "valid": false, "match": null, "score": 0.0 }));
    }
}
