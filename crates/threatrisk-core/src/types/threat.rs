//! Threat records and their boundary validation.
//!
//! Raw records arrive as loosely typed data (JSON, YAML, TOML). They are
//! validated once here into [`Threat`], after which the scoring and
//! evaluation code can rely on well-typed, fully defaulted fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CatalogError;

/// Names of the five DREAD sub-ratings, in scoring order.
pub const DREAD_KEYS: [&str; 5] = [
    "damage",
    "reproducibility",
    "exploitability",
    "affected_users",
    "discoverability",
];

/// The five DREAD sub-ratings of a threat, conventionally 0-10 each.
/// A rating missing from the raw record is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DreadRatings {
    pub damage: f64,
    pub reproducibility: f64,
    pub exploitability: f64,
    pub affected_users: f64,
    pub discoverability: f64,
}

impl DreadRatings {
    pub fn new(
        damage: f64,
        reproducibility: f64,
        exploitability: f64,
        affected_users: f64,
        discoverability: f64,
    ) -> Self {
        Self {
            damage,
            reproducibility,
            exploitability,
            affected_users,
            discoverability,
        }
    }

    /// Sub-ratings in [`DREAD_KEYS`] order.
    pub fn values(&self) -> [f64; 5] {
        [
            self.damage,
            self.reproducibility,
            self.exploitability,
            self.affected_users,
            self.discoverability,
        ]
    }

    /// Read the five sub-ratings from a raw mapping.
    ///
    /// Unknown keys are ignored and missing keys default to 0. Values must be
    /// numbers or numeric strings; anything else is a
    /// [`CatalogError::TypeConversion`].
    pub fn from_map(threat_id: &str, map: &Map<String, Value>) -> Result<Self, CatalogError> {
        let mut values = [0.0; 5];
        for (slot, key) in values.iter_mut().zip(DREAD_KEYS) {
            if let Some(raw) = map.get(key) {
                *slot = to_number(threat_id, &format!("dread.{key}"), raw)?;
            }
        }
        let [damage, reproducibility, exploitability, affected_users, discoverability] = values;
        Ok(Self::new(
            damage,
            reproducibility,
            exploitability,
            affected_users,
            discoverability,
        ))
    }
}

/// One discrete attack vector from a threat catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThreat")]
pub struct Threat {
    /// Unique key within a catalog.
    pub id: String,
    pub description: String,
    /// STRIDE category tags. Descriptive only.
    pub stride: Vec<String>,
    pub location: String,
    pub mitigations: Vec<String>,
    pub dread: DreadRatings,
    /// Standalone success probability in [0, 1]. `None` excludes the threat
    /// from aggregates and resolves to 0.0 inside attack trees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prob: Option<f64>,
}

impl Threat {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            stride: Vec::new(),
            location: String::new(),
            mitigations: Vec::new(),
            dread: DreadRatings::default(),
            prob: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stride<I, S>(mut self, stride: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stride = stride.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_mitigations<I, S>(mut self, mitigations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mitigations = mitigations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dread(mut self, dread: DreadRatings) -> Self {
        self.dread = dread;
        self
    }

    pub fn with_prob(mut self, prob: f64) -> Self {
        self.prob = Some(prob);
        self
    }

    /// Check the invariants that deserialization enforces, for threats
    /// built in code.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::MissingField {
                field: "id".to_string(),
            });
        }
        for (key, value) in DREAD_KEYS.iter().zip(self.dread.values()) {
            if !value.is_finite() {
                return Err(CatalogError::TypeConversion {
                    threat_id: self.id.clone(),
                    field: format!("dread.{key}"),
                    value: value.to_string(),
                });
            }
        }
        if let Some(p) = self.prob {
            check_probability(&self.id, p)?;
        }
        Ok(())
    }
}

/// Wire shape of a threat record before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawThreat {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stride: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub mitigations: Option<Vec<String>>,
    #[serde(default)]
    pub dread: Option<Map<String, Value>>,
    #[serde(default)]
    pub prob: Option<Value>,
}

impl TryFrom<RawThreat> for Threat {
    type Error = CatalogError;

    fn try_from(raw: RawThreat) -> Result<Self, Self::Error> {
        let id = raw.id.ok_or_else(|| CatalogError::MissingField {
            field: "id".to_string(),
        })?;

        let dread = match raw.dread {
            Some(map) => DreadRatings::from_map(&id, &map)?,
            None => DreadRatings::default(),
        };

        let prob = match raw.prob {
            None | Some(Value::Null) => None,
            Some(value) => {
                let p = to_number(&id, "prob", &value)?;
                check_probability(&id, p)?;
                Some(p)
            }
        };

        Ok(Self {
            id,
            description: raw.description.unwrap_or_default(),
            stride: raw.stride.unwrap_or_default(),
            location: raw.location.unwrap_or_default(),
            mitigations: raw.mitigations.unwrap_or_default(),
            dread,
            prob,
        })
    }
}

/// Validate a raw catalog (an array of threat records) into typed threats.
///
/// Fails on the first malformed record; the error names the record index.
pub fn parse_catalog(value: Value) -> Result<Vec<Threat>, CatalogError> {
    let records = match value {
        Value::Array(records) => records,
        other => {
            return Err(CatalogError::NotAnArray {
                found: value_kind(&other).to_string(),
            })
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let in_record = |source: CatalogError| CatalogError::InRecord {
                index,
                source: Box::new(source),
            };
            let raw: RawThreat = serde_json::from_value(record).map_err(|e| {
                in_record(CatalogError::Malformed {
                    message: e.to_string(),
                })
            })?;
            Threat::try_from(raw).map_err(in_record)
        })
        .collect()
}

/// Convert a raw value to a finite number. Numeric strings are accepted.
fn to_number(threat_id: &str, field: &str, value: &Value) -> Result<f64, CatalogError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(CatalogError::TypeConversion {
            threat_id: threat_id.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn check_probability(threat_id: &str, p: f64) -> Result<(), CatalogError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(CatalogError::ProbabilityOutOfRange {
            threat_id: threat_id.to_string(),
            value: p,
        })
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_dread_keys_default_to_zero() {
        let map = json!({ "damage": 6, "exploitability": "4.5" });
        let ratings = DreadRatings::from_map("T1", map.as_object().unwrap()).unwrap();
        assert_eq!(ratings.values(), [6.0, 0.0, 4.5, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_dread_keys_ignored() {
        let map = json!({ "damage": 3, "impact": "not a number" });
        let ratings = DreadRatings::from_map("T1", map.as_object().unwrap()).unwrap();
        assert_eq!(ratings.damage, 3.0);
    }

    #[test]
    fn test_boolean_rating_rejected() {
        let map = json!({ "damage": true });
        let err = DreadRatings::from_map("T1", map.as_object().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::TypeConversion { ref field, .. } if field == "dread.damage"
        ));
    }

    #[test]
    fn test_null_prob_is_absent() {
        let threat: Threat = serde_json::from_value(json!({ "id": "T1", "prob": null })).unwrap();
        assert_eq!(threat.prob, None);
    }

    #[test]
    fn test_nan_string_rejected() {
        let result: Result<Threat, _> =
            serde_json::from_value(json!({ "id": "T1", "prob": "NaN" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_prob() {
        let threat = Threat::new("T1").with_prob(1.5);
        assert!(matches!(
            threat.validate(),
            Err(CatalogError::ProbabilityOutOfRange { .. })
        ));
    }
}
