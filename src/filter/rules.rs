use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Conventional rule file name, resolved against the working directory.
pub const RULES_FILE_NAME: &str = "filter.json";

/// Admission thresholds loaded from the rule file. `None` means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_business: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_non_business: Option<bool>,
    #[serde(
        default,
        deserialize_with = "count",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_followers: Option<u64>,
    #[serde(
        default,
        deserialize_with = "count",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_followers: Option<u64>,
    #[serde(
        default,
        deserialize_with = "count",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_followings: Option<u64>,
    #[serde(
        default,
        deserialize_with = "count",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_followings: Option<u64>,
    #[serde(
        default,
        deserialize_with = "count",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_posts: Option<u64>,
    #[serde(
        default,
        deserialize_with = "ratio",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_potency_ratio: Option<f64>,
    #[serde(
        default,
        deserialize_with = "count",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_numbers_in_profile_name: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_private_or_empty: Option<bool>,
}

impl RuleSet {
    /// Build from an already parsed JSON mapping.
    pub fn from_value(value: Value) -> Result<Self, RuleSetError> {
        let rules: Self = serde_json::from_value(value)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RuleSetError> {
        let rules: Self = serde_json::from_str(raw)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| RuleSetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), RuleSetError> {
        if let Some(ratio) = self.min_potency_ratio {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(RuleSetError::Invalid {
                    field: "min_potency_ratio",
                    reason: format!("expected a finite, non-negative ratio, got {ratio}"),
                });
            }
        }
        Ok(())
    }
}

/// Failure to turn a rule file or mapping into a [`RuleSet`].
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("failed to read rule file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid rule set: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(Number),
    Text(String),
}

fn count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawNumber::Number(number)) => number.as_u64().ok_or_else(|| {
            D::Error::custom(format!("expected a non-negative integer, got {number}"))
        })?,
        Some(RawNumber::Text(text)) => text.trim().parse::<u64>().map_err(|_| {
            D::Error::custom(format!("expected a non-negative integer, got '{text}'"))
        })?,
    };

    T::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("integer {value} is out of range")))
}

fn ratio<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawNumber::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {number}"))),
        Some(RawNumber::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a number, got '{text}'"))),
    }
}
