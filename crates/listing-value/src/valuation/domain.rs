use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier wrapper for marketplace listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing exactly as materialized by a listing source. Every field is optional so that
/// rows can be carried around before validation; [`Listing::try_from_row`] decides what
/// is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRow {
    #[serde(default, deserialize_with = "text_or_number")]
    pub listing_id: Option<String>,
    #[serde(default)]
    pub full_key: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub price_saving: Option<f64>,
    #[serde(default)]
    pub actual_price: Option<f64>,
    #[serde(default)]
    pub mileage_saving: Option<f64>,
    #[serde(default)]
    pub y_pred: Option<f64>,
    #[serde(default)]
    pub next_bin_avg_price: Option<f64>,
    #[serde(default)]
    pub expected_depreciation: Option<f64>,
    #[serde(default)]
    pub mileage: Option<f64>,
    #[serde(default)]
    pub mileage_y_pred: Option<f64>,
    #[serde(default)]
    pub price_per_km: Option<f64>,
    #[serde(default)]
    pub heat_rank: Option<f64>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub mileage_bin: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub certified: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub accident_free: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub carfax: Option<bool>,
    #[serde(default, deserialize_with = "flag")]
    pub as_is: Option<bool>,
    #[serde(default, deserialize_with = "feature_list")]
    pub options: Vec<String>,
    #[serde(default, deserialize_with = "feature_list")]
    pub safety_features: Vec<String>,
}

/// Trust-related booleans. Absent flags read as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSignals {
    pub certified: bool,
    pub accident_free: bool,
    pub carfax: bool,
    pub as_is: bool,
}

impl TrustSignals {
    /// Any positive signal, regardless of the AS-IS marker.
    pub fn has_trust(&self) -> bool {
        self.certified || self.accident_free || self.carfax
    }
}

/// Validated listing with every required field present and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub listing_id: ListingId,
    pub full_key: String,
    pub year: i32,
    pub url: String,
    pub price_saving: f64,
    pub actual_price: Option<f64>,
    pub mileage_saving: f64,
    pub y_pred: f64,
    pub next_bin_avg_price: f64,
    pub expected_depreciation: f64,
    pub mileage: f64,
    pub mileage_y_pred: f64,
    pub price_per_km: f64,
    pub heat_rank: i64,
    pub mileage_bin: String,
    pub trust: TrustSignals,
    pub options: Vec<String>,
    pub safety_features: Vec<String>,
}

impl Listing {
    pub fn try_from_row(row: &ListingRow) -> Result<Self, ValuationError> {
        let listing_id = row
            .listing_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| ListingId(id.to_string()))
            .ok_or_else(|| ValuationError::MissingField {
                listing_id: UNKNOWN_LISTING.to_string(),
                field: "listing_id",
            })?;

        let fields = RowFields {
            listing_id: &listing_id,
        };

        let y_pred = fields.number("y_pred", row.y_pred)?;
        let next_bin_avg_price = fields.number("next_bin_avg_price", row.next_bin_avg_price)?;
        let expected_depreciation = match row.expected_depreciation {
            Some(value) if value.is_finite() => value,
            _ => y_pred - next_bin_avg_price,
        };

        Ok(Self {
            full_key: fields.text("full_key", row.full_key.as_deref())?,
            year: row.year.ok_or_else(|| fields.missing("year"))?,
            url: fields.text("url", row.url.as_deref())?,
            price_saving: fields.number("price_saving", row.price_saving)?,
            actual_price: row.actual_price.filter(|price| price.is_finite()),
            mileage_saving: fields.number("mileage_saving", row.mileage_saving)?,
            y_pred,
            next_bin_avg_price,
            expected_depreciation,
            mileage: fields.number("mileage", row.mileage)?,
            mileage_y_pred: fields.number("mileage_y_pred", row.mileage_y_pred)?,
            price_per_km: fields.number("price_per_km", row.price_per_km)?,
            heat_rank: fields.number("heat_rank", row.heat_rank)?.trunc() as i64,
            mileage_bin: fields.text("mileage_bin", row.mileage_bin.as_deref())?,
            trust: TrustSignals {
                certified: row.certified.unwrap_or(false),
                accident_free: row.accident_free.unwrap_or(false),
                carfax: row.carfax.unwrap_or(false),
                as_is: row.as_is.unwrap_or(false),
            },
            options: row.options.clone(),
            safety_features: row.safety_features.clone(),
            listing_id,
        })
    }

    /// Share of the predicted price expected to be lost by the next mileage bin.
    /// Undefined when the prediction is not strictly positive.
    pub fn depreciation_rate(&self) -> Option<f64> {
        if self.y_pred > 0.0 {
            Some((self.y_pred - self.next_bin_avg_price) / self.y_pred)
        } else {
            None
        }
    }
}

const UNKNOWN_LISTING: &str = "<unknown>";

struct RowFields<'a> {
    listing_id: &'a ListingId,
}

impl RowFields<'_> {
    fn missing(&self, field: &'static str) -> ValuationError {
        ValuationError::MissingField {
            listing_id: self.listing_id.0.clone(),
            field,
        }
    }

    fn number(&self, field: &'static str, value: Option<f64>) -> Result<f64, ValuationError> {
        match value {
            Some(number) if number.is_finite() => Ok(number),
            Some(_) => Err(ValuationError::NonFiniteField {
                listing_id: self.listing_id.0.clone(),
                field,
            }),
            None => Err(self.missing(field)),
        }
    }

    fn text(&self, field: &'static str, value: Option<&str>) -> Result<String, ValuationError> {
        value
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| self.missing(field))
    }
}

/// Peer listings sharing the target's `(full_key, year)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cohort {
    members: Vec<Listing>,
}

impl Cohort {
    pub fn new(members: Vec<Listing>) -> Self {
        Self { members }
    }

    pub fn from_rows(rows: &[ListingRow]) -> Result<Self, ValuationError> {
        rows.iter()
            .map(Listing::try_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Listing] {
        &self.members
    }

    /// Depreciation rates of every member with a usable prediction.
    pub fn depreciation_rates(&self) -> Vec<f64> {
        self.members
            .iter()
            .filter_map(Listing::depreciation_rate)
            .collect()
    }
}

/// Validation failures raised while turning rows into typed listings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("listing {listing_id}: missing required field `{field}`")]
    MissingField {
        listing_id: String,
        field: &'static str,
    },
    #[error("listing {listing_id}: field `{field}` must be a finite number")]
    NonFiniteField {
        listing_id: String,
        field: &'static str,
    },
    #[error("listing {listing_id}: predicted price must be positive (got {y_pred})")]
    NonPositivePrediction { listing_id: String, y_pred: f64 },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|value| {
        let text = match value {
            TextOrNumber::Text(text) => text.trim().to_string(),
            TextOrNumber::Integer(number) => number.to_string(),
            TextOrNumber::Float(number) if number.fract() == 0.0 => {
                format!("{}", number as i64)
            }
            TextOrNumber::Float(number) => number.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FlagValue>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        FlagValue::Bool(flag) => Some(flag),
        FlagValue::Integer(number) => Some(number != 0),
        FlagValue::Float(number) => Some(number != 0.0),
        FlagValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeatureList {
    Items(Vec<String>),
    Encoded(String),
}

fn feature_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FeatureList>::deserialize(deserializer)?;
    Ok(match value {
        Some(FeatureList::Items(items)) => items,
        Some(FeatureList::Encoded(raw)) => {
            serde_json::from_str::<Vec<String>>(raw.trim()).unwrap_or_default()
        }
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_row() -> serde_json::Value {
        json!({
            "listing_id": 421337,
            "full_key": "Toyota RAV4 XLE Hybrid AWD",
            "year": 2021,
            "url": "https://example.test/#listing=421337",
            "price_saving": 1800.0,
            "mileage_saving": 250.0,
            "y_pred": 30000.0,
            "next_bin_avg_price": 29100.0,
            "mileage": 42000.0,
            "mileage_y_pred": 29750.0,
            "price_per_km": 0.12,
            "heat_rank": 12.0,
            "mileage_bin": 40000,
        })
    }

    #[test]
    fn row_accepts_numeric_identifiers_and_encoded_feature_lists() {
        let mut value = complete_row();
        value["options"] = json!("[\"Heated Seats\", \"Remote Start\"]");
        value["safety_features"] = json!(["Backup Camera"]);
        value["certified"] = json!(1);
        value["carfax"] = json!("True");

        let row: ListingRow = serde_json::from_value(value).expect("row parses");
        assert_eq!(row.listing_id.as_deref(), Some("421337"));
        assert_eq!(row.mileage_bin.as_deref(), Some("40000"));
        assert_eq!(row.options, vec!["Heated Seats", "Remote Start"]);
        assert_eq!(row.safety_features, vec!["Backup Camera"]);
        assert_eq!(row.certified, Some(true));
        assert_eq!(row.carfax, Some(true));
        assert_eq!(row.as_is, None);
    }

    #[test]
    fn garbled_feature_text_reads_as_empty() {
        let mut value = complete_row();
        value["options"] = json!("Leather Seats, Sunroof");
        let row: ListingRow = serde_json::from_value(value).expect("row parses");
        assert!(row.options.is_empty());
    }

    #[test]
    fn listing_validation_reports_missing_field_by_name() {
        let mut value = complete_row();
        value
            .as_object_mut()
            .expect("object")
            .remove("mileage_y_pred");
        let row: ListingRow = serde_json::from_value(value).expect("row parses");

        let error = Listing::try_from_row(&row).expect_err("field missing");
        assert_eq!(
            error,
            ValuationError::MissingField {
                listing_id: "421337".to_string(),
                field: "mileage_y_pred",
            }
        );
    }

    #[test]
    fn listing_derives_expected_depreciation_when_absent() {
        let row: ListingRow = serde_json::from_value(complete_row()).expect("row parses");
        let listing = Listing::try_from_row(&row).expect("valid listing");

        assert_eq!(listing.expected_depreciation, 900.0);
        assert_eq!(listing.heat_rank, 12);
        assert!(!listing.trust.has_trust());
        let rate = listing.depreciation_rate().expect("rate defined");
        assert!((rate - 0.03).abs() < 1e-12);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut row: ListingRow = serde_json::from_value(complete_row()).expect("row parses");
        row.price_saving = Some(f64::NAN);

        match Listing::try_from_row(&row) {
            Err(ValuationError::NonFiniteField { field, .. }) => assert_eq!(field, "price_saving"),
            other => panic!("expected non-finite error, got {other:?}"),
        }
    }

    #[test]
    fn zero_prediction_has_no_depreciation_rate() {
        let mut row: ListingRow = serde_json::from_value(complete_row()).expect("row parses");
        row.y_pred = Some(0.0);
        let listing = Listing::try_from_row(&row).expect("still a valid record");
        assert!(listing.depreciation_rate().is_none());
    }
}
