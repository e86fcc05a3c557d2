// 🧾 Receipt - Wire shape + validated model
//
// `RawReceipt` is exactly what the client sends (every field a string).
// `Receipt` is what comes out of validation: typed date, time, and amounts.
// Only validation can construct a `Receipt`, so anything holding one can
// score it without re-checking.

use crate::error::{ReceiptError, Result, ValidationError};
use crate::money::Amount;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Deserialize;

// ============================================================================
// WIRE TYPES
// ============================================================================

/// Receipt as submitted in the `POST /receipts/process` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawReceipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<RawItem>,
    pub total: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawItem {
    pub short_description: String,
    pub price: String,
}

// ============================================================================
// VALIDATED MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    short_description: String,
    price: Amount,
}

impl Item {
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn price(&self) -> Amount {
        self.price
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    retailer: String,
    purchase_date: NaiveDate,
    purchase_time: NaiveTime,
    items: Vec<Item>,
    total: Amount,
}

impl Receipt {
    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn purchase_day(&self) -> u32 {
        self.purchase_date.day()
    }

    pub fn purchase_time(&self) -> NaiveTime {
        self.purchase_time
    }

    /// Never empty.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// Decode a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawReceipt = serde_json::from_str(json)
            .map_err(|e| ReceiptError::invalid("body", e.to_string()))?;
        Receipt::try_from(raw)
    }
}

impl TryFrom<RawReceipt> for Receipt {
    type Error = ReceiptError;

    /// Validates every field and reports all failures at once.
    fn try_from(raw: RawReceipt) -> Result<Self> {
        let mut errors = Vec::new();

        check_text(&mut errors, "retailer", &raw.retailer, is_retailer_char);

        let purchase_date = parse_date(&raw.purchase_date)
            .map_err(|msg| errors.push(ValidationError::new("purchaseDate", msg)))
            .ok();
        let purchase_time = parse_time(&raw.purchase_time)
            .map_err(|msg| errors.push(ValidationError::new("purchaseTime", msg)))
            .ok();
        let total = parse_amount(&mut errors, "total", &raw.total);

        if raw.items.is_empty() {
            errors.push(ValidationError::new("items", "at least one item is required"));
        }

        let mut items = Vec::with_capacity(raw.items.len());
        for (i, item) in raw.items.into_iter().enumerate() {
            let desc_field = format!("items[{}].shortDescription", i);
            let price_field = format!("items[{}].price", i);

            check_text(&mut errors, &desc_field, &item.short_description, is_description_char);
            if let Some(price) = parse_amount(&mut errors, &price_field, &item.price) {
                items.push(Item {
                    short_description: item.short_description,
                    price,
                });
            }
        }

        match (purchase_date, purchase_time, total) {
            (Some(purchase_date), Some(purchase_time), Some(total)) if errors.is_empty() => {
                Ok(Receipt {
                    retailer: raw.retailer,
                    purchase_date,
                    purchase_time,
                    items,
                    total,
                })
            }
            _ => Err(ReceiptError::Validation(errors)),
        }
    }
}

// ============================================================================
// FIELD CHECKS
// ============================================================================

fn is_retailer_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || c == '-' || c == '&'
}

fn is_description_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || c == '-'
}

fn check_text(errors: &mut Vec<ValidationError>, field: &str, value: &str, allowed: fn(char) -> bool) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "must not be empty"));
    } else if let Some(bad) = value.chars().find(|c| !allowed(*c)) {
        errors.push(ValidationError::new(
            field,
            format!("contains disallowed character {:?}", bad),
        ));
    }
}

fn parse_amount(errors: &mut Vec<ValidationError>, field: &str, value: &str) -> Option<Amount> {
    value
        .parse::<Amount>()
        .map_err(|e| errors.push(ValidationError::new(field, e.to_string())))
        .ok()
}

/// `true` when `value` has the same length as `shape` and has an ASCII digit
/// wherever `shape` has `d`, and the literal character everywhere else.
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'd' => v.is_ascii_digit(),
            lit => v == lit,
        })
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    if !has_shape(value, "dddd-dd-dd") {
        return Err("expected a date formatted YYYY-MM-DD".to_string());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("{} is not a calendar date", value))
}

fn parse_time(value: &str) -> std::result::Result<NaiveTime, String> {
    if !has_shape(value, "dd:dd") {
        return Err("expected a 24-hour time formatted HH:MM".to_string());
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("{} is not a valid time of day", value))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawReceipt {
        RawReceipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![RawItem {
                short_description: "Gatorade".to_string(),
                price: "2.25".to_string(),
            }],
            total: "2.25".to_string(),
        }
    }

    fn fields(err: ReceiptError) -> Vec<String> {
        match err {
            ReceiptError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_receipt_parses() {
        let receipt = Receipt::try_from(raw()).unwrap();

        assert_eq!(receipt.retailer(), "M&M Corner Market");
        assert_eq!(receipt.purchase_date(), NaiveDate::from_ymd_opt(2022, 3, 20).unwrap());
        assert_eq!(receipt.purchase_day(), 20);
        assert_eq!(receipt.purchase_time(), NaiveTime::from_hms_opt(14, 33, 0).unwrap());
        assert_eq!(receipt.items().len(), 1);
        assert_eq!(receipt.items()[0].short_description(), "Gatorade");
        assert_eq!(receipt.items()[0].price().cents(), 225);
        assert_eq!(receipt.total().cents(), 225);
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut r = raw();
        r.items.clear();

        assert_eq!(fields(Receipt::try_from(r).unwrap_err()), vec!["items"]);
    }

    #[test]
    fn test_retailer_pattern() {
        let mut r = raw();
        r.retailer = "Target!".to_string();
        assert_eq!(fields(Receipt::try_from(r).unwrap_err()), vec!["retailer"]);

        let mut r = raw();
        r.retailer = "   ".to_string();
        assert_eq!(fields(Receipt::try_from(r).unwrap_err()), vec!["retailer"]);
    }

    #[test]
    fn test_description_rejects_ampersand() {
        let mut r = raw();
        r.items[0].short_description = "Salt & Pepper".to_string();

        assert_eq!(
            fields(Receipt::try_from(r).unwrap_err()),
            vec!["items[0].shortDescription"]
        );
    }

    #[test]
    fn test_description_keeps_surrounding_whitespace() {
        let mut r = raw();
        r.items[0].short_description = "   Klarbrunn 12-PK 12 FL OZ  ".to_string();

        let receipt = Receipt::try_from(r).unwrap();
        assert_eq!(receipt.items()[0].short_description(), "   Klarbrunn 12-PK 12 FL OZ  ");
    }

    #[test]
    fn test_malformed_dates_rejected() {
        for bad in ["2022-1-01", "2022/01/01", "2022-02-30", "2022-13-01", "20220101", ""] {
            let mut r = raw();
            r.purchase_date = bad.to_string();
            assert_eq!(fields(Receipt::try_from(r).unwrap_err()), vec!["purchaseDate"], "{:?}", bad);
        }
    }

    #[test]
    fn test_malformed_times_rejected() {
        for bad in ["24:00", "13:60", "1:01", "13:01:00", "1301", ""] {
            let mut r = raw();
            r.purchase_time = bad.to_string();
            assert_eq!(fields(Receipt::try_from(r).unwrap_err()), vec!["purchaseTime"], "{:?}", bad);
        }
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut r = raw();
        r.retailer = "".to_string();
        r.total = "2.2".to_string();
        r.items[0].price = "-1.00".to_string();

        assert_eq!(
            fields(Receipt::try_from(r).unwrap_err()),
            vec!["retailer", "total", "items[0].price"]
        );
    }

    #[test]
    fn test_from_json_rejects_missing_and_unknown_fields() {
        let missing = r#"{"retailer":"Target","purchaseDate":"2022-01-01","purchaseTime":"13:01","items":[{"shortDescription":"A","price":"1.00"}]}"#;
        assert_eq!(fields(Receipt::from_json(missing).unwrap_err()), vec!["body"]);

        let unknown = r#"{"retailer":"Target","purchaseDate":"2022-01-01","purchaseTime":"13:01","items":[{"shortDescription":"A","price":"1.00"}],"total":"1.00","cashier":"Bob"}"#;
        assert_eq!(fields(Receipt::from_json(unknown).unwrap_err()), vec!["body"]);
    }

    #[test]
    fn test_from_json_accepts_camel_case_fields() {
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [{"shortDescription": "Mountain Dew 12PK", "price": "6.49"}],
            "total": "6.49"
        }"#;

        let receipt = Receipt::from_json(json).unwrap();
        assert_eq!(receipt.items()[0].short_description(), "Mountain Dew 12PK");
    }
}
