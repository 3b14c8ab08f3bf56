//! Vendor identity and profile models.
//!
//! SAP stores vendor numbers (`Lifnr`) as zero-padded, fixed-width keys while
//! callers may send either the padded or the bare form. The helpers here
//! reconcile the two representations without ever failing: input that is not
//! a plain digit string passes through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::SapRecord;

/// Width of the SAP vendor and document key fields.
pub const SAP_KEY_WIDTH: usize = 10;

fn is_digit_string(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Canonical vendor form: leading zeros removed (`"0000100000"` -> `"100000"`).
///
/// Only all-digit input (surrounding whitespace ignored) is rewritten; an
/// all-zero id collapses to `"0"`. Anything else is returned unchanged.
pub fn to_canonical(input: &str) -> String {
    let trimmed = input.trim();
    if !is_digit_string(trimmed) {
        return input.to_string();
    }

    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// SAP key form: existing leading zeros stripped, then left-padded with `'0'`
/// to `width`. Longer ids are never truncated; non-numeric input is returned
/// unchanged.
pub fn to_sap_key(input: &str, width: usize) -> String {
    let trimmed = input.trim();
    if !is_digit_string(trimmed) {
        return input.to_string();
    }

    let numeric = trimmed.trim_start_matches('0');
    format!("{:0>width$}", numeric, width = width)
}

/// A vendor identifier as supplied by a caller.
///
/// The raw value is kept so endpoints that forward ids verbatim can do so.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn canonical(&self) -> String {
        to_canonical(&self.0)
    }

    pub fn sap_key(&self) -> String {
        to_sap_key(&self.0, SAP_KEY_WIDTH)
    }

    /// True when both ids name the same vendor once normalized.
    pub fn same_vendor(&self, other: &VendorId) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VendorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VendorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Vendor master data from `ZVEN_PROFILESet`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfile {
    pub vendor_id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub postal_code: String,
    pub region: String,
    pub street: String,
    pub address_number: String,
}

impl VendorProfile {
    pub fn from_record(record: &SapRecord) -> Self {
        Self {
            vendor_id: record.text("VendorId"),
            name: record.text("Name1"),
            country: record.text("Land1"),
            city: record.text("Ort01"),
            postal_code: record.text("Pstlz"),
            region: record.text("Regio"),
            street: record.text("Stras"),
            address_number: record.text("Adrnr"),
        }
    }
}
