//! Financial views: invoices, payment aging lines and credit/debit memos.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{FieldAccess, FieldValue, SapRecord, MISSING_TEXT};

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_string()))
}

fn date(value: &Option<DateTime<Utc>>) -> Option<FieldValue> {
    value.map(FieldValue::Date)
}

/// Invoice line from `VEN_INVOICESet`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub company_code: String,
    pub fiscal_year: String,
    pub billing_date: Option<DateTime<Utc>>,
    pub posting_date: Option<DateTime<Utc>>,
    pub vendor_id: String,
    pub currency: String,
    pub document_type: String,
    pub po_item_number: String,
    pub material_number: String,
    pub unit_of_measure: String,
    pub quantity: f64,
    pub amount: f64,
    pub description: String,
}

impl Invoice {
    pub fn from_record(record: &SapRecord) -> Self {
        Self {
            invoice_number: record.text("Belnr"),
            company_code: record.text("Bukrs"),
            fiscal_year: record.text("Gjahr"),
            billing_date: record.date("Bldat"),
            posting_date: record.date("Budat"),
            vendor_id: record.text("Lifnr"),
            currency: record.text("Waers"),
            document_type: record.text("Blart"),
            po_item_number: record.text("Ebelp"),
            material_number: record.text("Matnr"),
            unit_of_measure: record.text("Meins"),
            quantity: record.number("Lbkum"),
            amount: record.number("Wrbtr"),
            description: record.text("Vgart"),
        }
    }
}

impl FieldAccess for Invoice {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "invoiceNumber" => text(&self.invoice_number),
            "companyCode" => text(&self.company_code),
            "fiscalYear" => text(&self.fiscal_year),
            "billingDate" => date(&self.billing_date),
            "postingDate" => date(&self.posting_date),
            "vendorId" => text(&self.vendor_id),
            "currency" => text(&self.currency),
            "documentType" => text(&self.document_type),
            "materialNumber" => text(&self.material_number),
            "quantity" => Some(FieldValue::Number(self.quantity)),
            "amount" => Some(FieldValue::Number(self.amount)),
            "description" => text(&self.description),
            _ => None,
        }
    }
}

/// Open item with its aging in days, from `VEN_PAYAGESet`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAging {
    pub document_number: String,
    pub vendor_id: String,
    pub billing_date: Option<DateTime<Utc>>,
    pub posting_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub amount: f64,
    pub currency: String,
    pub aging: i64,
    pub status: String,
}

impl PaymentAging {
    pub fn from_record(record: &SapRecord) -> Self {
        Self {
            document_number: record.text("Belnr"),
            vendor_id: record.text("Lifnr"),
            billing_date: record.date("Bldat"),
            posting_date: record.date("Budat"),
            due_date: record.date("DueDate"),
            amount: record.number("Wrbtr"),
            currency: record.text("Waers"),
            // Whole days; fractional input is truncated.
            aging: record.number("Aging").trunc() as i64,
            status: record.text("Status"),
        }
    }
}

impl FieldAccess for PaymentAging {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "documentNumber" => text(&self.document_number),
            "vendorId" => text(&self.vendor_id),
            "billingDate" => date(&self.billing_date),
            "postingDate" => date(&self.posting_date),
            "dueDate" => date(&self.due_date),
            "amount" => Some(FieldValue::Number(self.amount)),
            "currency" => text(&self.currency),
            "aging" => Some(FieldValue::Number(self.aging as f64)),
            "status" => text(&self.status),
            _ => None,
        }
    }
}

/// Direction of a memo, from the SAP debit/credit indicator (`Shkzg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoKind {
    Credit,
    Debit,
    Unknown,
}

impl MemoKind {
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        match indicator {
            Some("H") => MemoKind::Credit,
            Some("S") => MemoKind::Debit,
            _ => MemoKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemoKind::Credit => "Credit",
            MemoKind::Debit => "Debit",
            MemoKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credit or debit memo line from `ZVEN_CDMEMOSet`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub memo_id: String,
    pub vendor_id: String,
    #[serde(rename = "type")]
    pub kind: MemoKind,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub posting_date: Option<DateTime<Utc>>,
    pub document_date: Option<DateTime<Utc>>,
    pub fiscal_year: String,
    pub line_number: String,
    pub document_type_raw: String,
    pub quantity: f64,
    pub unit_of_measure: String,
    pub material_number: String,
    pub gl_account: String,
    pub posting_key: String,
    pub user_name: String,
    pub company_code: String,
    pub transaction_code: String,
}

impl Memo {
    pub fn from_record(record: &SapRecord) -> Self {
        let indicator = record.str_value("Shkzg");
        let description = record
            .str_value("Tcode")
            .or_else(|| record.str_value("Zuonr"))
            .unwrap_or_else(|| MISSING_TEXT.to_string());

        Self {
            memo_id: record.text("Belnr"),
            vendor_id: record.text("Lifnr"),
            kind: MemoKind::from_indicator(indicator.as_deref()),
            amount: record.amount("Dmbtr"),
            currency: record.text("HWaers"),
            description,
            posting_date: record.date("HBudat"),
            document_date: record.date("HBldat"),
            fiscal_year: record.text("Gjahr"),
            line_number: record.text("Buzei"),
            document_type_raw: record.text("HBlart"),
            quantity: record.number("Menge"),
            unit_of_measure: record.text("Meins"),
            material_number: record.text("Matnr"),
            gl_account: record.text("Hkont"),
            posting_key: record.text("Bschl"),
            user_name: record.text("Usnam"),
            company_code: record.text("Bukrs"),
            transaction_code: record.text("Tcode"),
        }
    }
}

impl FieldAccess for Memo {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "memoId" => text(&self.memo_id),
            "vendorId" => text(&self.vendor_id),
            "type" => text(self.kind.as_str()),
            "amount" => Some(FieldValue::Number(self.amount)),
            "currency" => text(&self.currency),
            "description" => text(&self.description),
            "postingDate" => date(&self.posting_date),
            "documentDate" => date(&self.document_date),
            "fiscalYear" => text(&self.fiscal_year),
            "transactionCode" => text(&self.transaction_code),
            _ => None,
        }
    }
}
