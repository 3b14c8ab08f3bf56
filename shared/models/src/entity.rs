//! SAP entity sets and the loosely-typed records they return.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sap_date;

/// Placeholder shown for text fields SAP did not send.
pub const MISSING_TEXT: &str = "N/A";

/// Entity sets exposed by the vendor portal OData service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntitySet {
    LoginAuth,
    VendorProfile,
    Rfqs,
    PurchaseOrders,
    GoodsReceipts,
    Invoices,
    InvoicePdf,
    PaymentAging,
    Memos,
}

impl EntitySet {
    pub const ALL: [EntitySet; 9] = [
        EntitySet::LoginAuth,
        EntitySet::VendorProfile,
        EntitySet::Rfqs,
        EntitySet::PurchaseOrders,
        EntitySet::GoodsReceipts,
        EntitySet::Invoices,
        EntitySet::InvoicePdf,
        EntitySet::PaymentAging,
        EntitySet::Memos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LoginAuth => "ZLOGIN_AUTHSet",
            Self::VendorProfile => "ZVEN_PROFILESet",
            Self::Rfqs => "VEN_RFQSet",
            Self::PurchaseOrders => "VEN_POSet",
            Self::GoodsReceipts => "VEN_GOODSRECSet",
            Self::Invoices => "VEN_INVOICESet",
            Self::InvoicePdf => "ZVEN_INVOICEPDFSet",
            Self::PaymentAging => "VEN_PAYAGESet",
            Self::Memos => "ZVEN_CDMEMOSet",
        }
    }

    /// Field codes the portal reads from this set. Records are not required to
    /// carry all of them.
    pub fn expected_keys(&self) -> &'static [&'static str] {
        match self {
            Self::LoginAuth => &["VendorId", "VendorPwd", "Status", "Message"],
            Self::VendorProfile => &[
                "VendorId", "Name1", "Land1", "Ort01", "Pstlz", "Regio", "Stras", "Adrnr",
            ],
            Self::Rfqs => &["Lifnr", "Ebeln", "Txz01", "Ktmng", "Meins", "Bedat"],
            Self::PurchaseOrders => &[
                "Ebeln", "Lifnr", "Bedat", "Ebelp", "Matnr", "Txz01", "Ktmng", "Meins", "Netpr",
                "Peinh", "Netwr", "Brtwr", "Waers", "Statu", "Bstyp", "Bsart",
            ],
            Self::GoodsReceipts => &[
                "Lifnr", "Mblnr", "Vgart", "Blart", "Bldat", "Budat", "Ebeln", "Ebelp", "Bwart",
                "Meins", "Matnr",
            ],
            Self::Invoices => &[
                "Belnr", "Bukrs", "Gjahr", "Bldat", "Budat", "Lifnr", "Waers", "Vgart", "Blart",
                "Buzei", "Ebelp", "Matnr", "Meins", "Lbkum", "Wrbtr",
            ],
            Self::InvoicePdf => &["Lifnr", "Belnr", "XPdf"],
            Self::PaymentAging => &[
                "Bukrs", "Lifnr", "Belnr", "Budat", "Bldat", "Waers", "Wrbtr", "DueDate", "Aging",
                "Status",
            ],
            Self::Memos => &[
                "Lifnr", "Belnr", "Gjahr", "HBlart", "HBudat", "HBldat", "Dmbtr", "HWaers",
                "Shkzg", "Tcode", "Zuonr",
            ],
        }
    }

    /// Fields matched by a free-text search over raw rows of this set.
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            Self::VendorProfile => &["Name1", "Ort01"],
            Self::Rfqs => &["Ebeln", "Txz01", "Lifnr"],
            Self::PurchaseOrders => &["Ebeln", "Matnr", "Txz01", "Statu"],
            Self::GoodsReceipts => &["Mblnr", "Lifnr", "Blart", "Matnr", "Vgart", "Ebeln"],
            Self::Invoices => &["Belnr", "Bukrs", "Matnr", "Vgart"],
            Self::PaymentAging => &["Belnr", "Status"],
            Self::Memos => &["Belnr", "Tcode", "Zuonr"],
            Self::LoginAuth | Self::InvoicePdf => &[],
        }
    }

    /// Field used for date-range filtering over raw rows of this set.
    pub fn date_field(&self) -> Option<&'static str> {
        match self {
            Self::Rfqs | Self::PurchaseOrders => Some("Bedat"),
            Self::GoodsReceipts => Some("Budat"),
            Self::Invoices => Some("Bldat"),
            Self::PaymentAging => Some("DueDate"),
            Self::Memos => Some("HBudat"),
            Self::LoginAuth | Self::VendorProfile | Self::InvoicePdf => None,
        }
    }
}

impl fmt::Display for EntitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field value as seen by the list engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// Text rendering used for search matching and mixed-type ordering.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Date(instant) => sap_date::iso_day(instant),
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Date(instant) => Some(*instant),
            FieldValue::Text(text) => sap_date::decode(text),
            FieldValue::Number(_) => None,
        }
    }

    /// Numeric reading of the value. SAP sends amounts and counts as strings
    /// such as `"250.00"`, so text that is entirely a finite number counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            FieldValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            FieldValue::Date(_) => None,
        }
    }

    /// Ordering between two present values: instants, then numbers
    /// (including numeric text), then case-sensitive text.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        if let (FieldValue::Date(a), FieldValue::Date(b)) = (self, other) {
            return a.cmp(b);
        }
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => self.as_text().cmp(&other.as_text()),
        }
    }
}

/// Named field lookup shared by raw SAP rows and the typed views.
pub trait FieldAccess {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// One row returned by SAP, keyed by field code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SapRecord(Map<String, Value>);

impl SapRecord {
    /// Non-object values become an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Raw string for `key`, or `None` when absent, null or empty.
    pub fn str_value(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Text for `key`, or the `"N/A"` placeholder.
    pub fn text(&self, key: &str) -> String {
        self.str_value(key).unwrap_or_else(|| MISSING_TEXT.to_string())
    }

    /// Numeric value for `key`; SAP sends decimals as strings. Missing or
    /// unparsable values read as `0.0`.
    pub fn number(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
            Some(Value::String(text)) => parse_leading_number(text).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Like [`SapRecord::number`] but tolerates thousands separators.
    pub fn amount(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::String(text)) => parse_leading_number(&text.replace(',', "")).unwrap_or(0.0),
            _ => self.number(key),
        }
    }

    pub fn date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(Value::as_str).and_then(sap_date::decode)
    }
}

impl From<Value> for SapRecord {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl FieldAccess for SapRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match self.get(name)? {
            Value::String(text) => match sap_date::decode(text) {
                Some(instant) => Some(FieldValue::Date(instant)),
                None => Some(FieldValue::Text(text.clone())),
            },
            Value::Number(number) => number.as_f64().map(FieldValue::Number),
            Value::Bool(flag) => Some(FieldValue::Text(flag.to_string())),
            _ => None,
        }
    }
}

impl FieldAccess for Value {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match self {
            Value::Object(map) => SapRecord(map.clone()).field(name),
            _ => None,
        }
    }
}

/// Parse the longest numeric prefix, mirroring how SAP decimal strings such as
/// `"12.500 "` are read. Returns `None` when no digits lead the string.
fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (index, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = index + ch.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    trimmed[..end].trim_end_matches('.').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> SapRecord {
        SapRecord::from_value(json!({
            "Lifnr": "0000100000",
            "Wrbtr": "1250.50",
            "Dmbtr": "1,250.50",
            "Aging": 45,
            "Budat": "/Date(1748822400000)/",
            "Txz01": "",
            "Statu": null
        }))
    }

    #[test]
    fn test_entity_set_names() {
        assert_eq!(EntitySet::GoodsReceipts.name(), "VEN_GOODSRECSet");
        assert_eq!(EntitySet::Memos.to_string(), "ZVEN_CDMEMOSet");
        for set in EntitySet::ALL {
            assert!(!set.expected_keys().is_empty());
            for field in set.search_fields() {
                assert!(set.expected_keys().contains(field), "{} lists {}", set, field);
            }
        }
    }

    #[test]
    fn test_text_defaults() {
        let record = record();
        assert_eq!(record.text("Lifnr"), "0000100000");
        assert_eq!(record.text("Txz01"), MISSING_TEXT);
        assert_eq!(record.text("Statu"), MISSING_TEXT);
        assert_eq!(record.text("Missing"), MISSING_TEXT);
        assert_eq!(record.text("Aging"), "45");
    }

    #[test]
    fn test_numbers_fail_open() {
        let record = record();
        assert_eq!(record.number("Wrbtr"), 1250.5);
        assert_eq!(record.number("Dmbtr"), 1.0);
        assert_eq!(record.amount("Dmbtr"), 1250.5);
        assert_eq!(record.number("Aging"), 45.0);
        assert_eq!(record.number("Lifnr"), 100000.0);
        assert_eq!(record.number("Missing"), 0.0);
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number("12.500 KG"), Some(12.5));
    }

    #[test]
    fn test_field_access_types() {
        let record = record();
        assert!(matches!(record.field("Budat"), Some(FieldValue::Date(_))));
        assert_eq!(record.field("Aging"), Some(FieldValue::Number(45.0)));
        assert_eq!(
            record.field("Lifnr"),
            Some(FieldValue::Text("0000100000".to_string()))
        );
        assert_eq!(record.field("Statu"), None);
        assert_eq!(record.field("Missing"), None);
    }

    #[test]
    fn test_non_object_record_is_empty() {
        let record = SapRecord::from_value(json!([1, 2]));
        assert_eq!(record.text("Lifnr"), MISSING_TEXT);
        assert_eq!(json!("x").field("Lifnr"), None);
    }

    #[test]
    fn test_field_value_compare() {
        assert_eq!(
            FieldValue::Number(9.0).compare(&FieldValue::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Text("B".into()).compare(&FieldValue::Text("a".into())),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Text("9A".into()).compare(&FieldValue::Text("10A".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn test_numeric_text_compares_as_number() {
        let text = |s: &str| FieldValue::Text(s.to_string());
        assert_eq!(text("9.00").compare(&text("10.00")), Ordering::Less);
        assert_eq!(text("5").compare(&text("45")), Ordering::Less);
        assert_eq!(text(" 90 ").compare(&FieldValue::Number(45.0)), Ordering::Greater);
        assert_eq!(text("-3.5").compare(&text("2")), Ordering::Less);
        assert_eq!(text("inf").as_number(), None);
        assert_eq!(text("12.500 KG").as_number(), None);
    }
}
