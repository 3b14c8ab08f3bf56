//! Procurement views: RFQ lines, purchase orders and goods receipts.
//!
//! Each view is built from a raw [`SapRecord`] and never fails; missing text
//! reads as `"N/A"`, missing numbers as zero and undecodable dates as `None`.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::{FieldAccess, FieldValue, SapRecord, MISSING_TEXT};
use crate::sap_date;

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

fn date(value: &Option<DateTime<Utc>>) -> Option<FieldValue> {
    value.map(FieldValue::Date)
}

fn rfq_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"VEN_RFQSet\('(\d+)'\)").expect("RFQ uri pattern is a valid regex")
    })
}

/// RFQ number from the entity's `__metadata.uri`, if SAP sent one.
fn rfq_number_from_metadata(record: &SapRecord) -> Option<String> {
    let uri = record.get("__metadata")?.get("uri")?.as_str()?;
    let captures = rfq_uri_pattern().captures(uri)?;
    Some(captures.get(1)?.as_str().to_string())
}

/// One line of a request for quotation (`VEN_RFQSet`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RfqLine {
    pub id: String,
    pub item: String,
    pub quantity: f64,
    pub unit: String,
    pub qty_unit: String,
    pub due_date: Option<DateTime<Utc>>,
    /// `MM/DD/YYYY`, or `"N/A"` when the date is missing.
    pub due: String,
}

impl RfqLine {
    pub fn from_record(record: &SapRecord) -> Self {
        let id = rfq_number_from_metadata(record)
            .or_else(|| record.str_value("Ebeln"))
            .or_else(|| record.str_value("Lifnr"))
            .unwrap_or_else(|| MISSING_TEXT.to_string());
        let quantity = record.number("Ktmng");
        let unit = record.str_value("Meins").unwrap_or_default();
        let due_date = record.date("Bedat");

        Self {
            id,
            item: record.text("Txz01"),
            quantity,
            qty_unit: format!("{:.0} {}", quantity, unit).trim().to_string(),
            unit,
            due: due_date
                .as_ref()
                .map(sap_date::us_day)
                .unwrap_or_else(|| MISSING_TEXT.to_string()),
            due_date,
        }
    }
}

impl FieldAccess for RfqLine {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => text(&self.id),
            "item" => text(&self.item),
            "quantity" => Some(FieldValue::Number(self.quantity)),
            "unit" => text(&self.unit),
            "dueDate" | "due" => date(&self.due_date),
            _ => None,
        }
    }
}

/// Purchase order item (`VEN_POSet`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub po_number: String,
    pub item_number: String,
    pub vendor_id: String,
    pub document_date: Option<DateTime<Utc>>,
    pub material_number: String,
    pub description: String,
    pub quantity: f64,
    pub unit_of_measure: String,
    pub net_price: f64,
    pub price_unit: f64,
    pub net_value: f64,
    pub gross_value: f64,
    pub currency: String,
    pub status: String,
    pub category: String,
    pub document_type: String,
}

impl PurchaseOrder {
    pub fn from_record(record: &SapRecord) -> Self {
        Self {
            po_number: record.text("Ebeln"),
            item_number: record.text("Ebelp"),
            vendor_id: record.text("Lifnr"),
            document_date: record.date("Bedat"),
            material_number: record.text("Matnr"),
            description: record.text("Txz01"),
            quantity: record.number("Ktmng"),
            unit_of_measure: record.text("Meins"),
            net_price: record.number("Netpr"),
            price_unit: record.number("Peinh"),
            net_value: record.number("Netwr"),
            gross_value: record.number("Brtwr"),
            currency: record.text("Waers"),
            status: record.text("Statu"),
            category: record.text("Bstyp"),
            document_type: record.text("Bsart"),
        }
    }
}

impl FieldAccess for PurchaseOrder {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "poNumber" => text(&self.po_number),
            "itemNumber" => text(&self.item_number),
            "vendorId" => text(&self.vendor_id),
            "documentDate" => date(&self.document_date),
            "materialNumber" => text(&self.material_number),
            "description" => text(&self.description),
            "quantity" => Some(FieldValue::Number(self.quantity)),
            "netPrice" => Some(FieldValue::Number(self.net_price)),
            "netValue" => Some(FieldValue::Number(self.net_value)),
            "grossValue" => Some(FieldValue::Number(self.gross_value)),
            "currency" => text(&self.currency),
            "status" => text(&self.status),
            "documentType" => text(&self.document_type),
            _ => None,
        }
    }
}

/// Material document line from `VEN_GOODSRECSet`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoodsReceipt {
    pub document_no: String,
    pub vendor_id: String,
    pub posting_date: Option<DateTime<Utc>>,
    pub document_date: Option<DateTime<Utc>>,
    pub document_type: String,
    pub purchase_order_no: String,
    pub purchase_order_item: String,
    pub material_no: String,
    pub description: String,
    pub movement_type: String,
    pub unit_of_measure: String,
}

impl GoodsReceipt {
    pub fn from_record(record: &SapRecord) -> Self {
        Self {
            document_no: record.text("Mblnr"),
            vendor_id: record.text("Lifnr"),
            posting_date: record.date("Budat"),
            document_date: record.date("Bldat"),
            document_type: record.text("Blart"),
            purchase_order_no: record.text("Ebeln"),
            purchase_order_item: record.text("Ebelp"),
            material_no: record.text("Matnr"),
            description: record.text("Vgart"),
            movement_type: record.text("Bwart"),
            unit_of_measure: record.text("Meins"),
        }
    }

    /// Fields the receipts list searches by default.
    pub const SEARCH_FIELDS: [&'static str; 6] = [
        "documentNo",
        "vendorId",
        "documentType",
        "materialNo",
        "description",
        "purchaseOrderNo",
    ];
}

impl FieldAccess for GoodsReceipt {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "documentNo" => text(&self.document_no),
            "vendorId" => text(&self.vendor_id),
            "postingDate" => date(&self.posting_date),
            "documentDate" => date(&self.document_date),
            "documentType" => text(&self.document_type),
            "purchaseOrderNo" => text(&self.purchase_order_no),
            "purchaseOrderItem" => text(&self.purchase_order_item),
            "materialNo" => text(&self.material_no),
            "description" => text(&self.description),
            "movementType" => text(&self.movement_type),
            "unitOfMeasure" => text(&self.unit_of_measure),
            _ => None,
        }
    }
}
