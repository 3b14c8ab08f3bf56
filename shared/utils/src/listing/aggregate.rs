use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use vendor_portal_models::{
    sap_date, GoodsReceipt, Invoice, Memo, PaymentAging, PurchaseOrder, RfqLine,
};

/// Group `records` by `key_fn` and count each group.
pub fn count_by<T, F>(records: &[T], key_fn: F) -> BTreeMap<String, usize>
where
    F: Fn(&T) -> String,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key_fn(record)).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    UpTo30,
    From31To60,
    Over60,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 3] = [AgingBucket::UpTo30, AgingBucket::From31To60, AgingBucket::Over60];

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::UpTo30 => "0-30 Days",
            AgingBucket::From31To60 => "31-60 Days",
            AgingBucket::Over60 => "61+ Days",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boundaries belong to the lower bucket. Negative aging (not yet due) counts
/// as current.
pub fn aging_bucket(days: i64) -> AgingBucket {
    match days {
        i64::MIN..=30 => AgingBucket::UpTo30,
        31..=60 => AgingBucket::From31To60,
        _ => AgingBucket::Over60,
    }
}

/// One labelled value of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: usize,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

fn chart_series(counts: BTreeMap<String, usize>) -> Vec<ChartPoint> {
    counts
        .into_iter()
        .map(|(name, value)| ChartPoint::new(name, value))
        .collect()
}

/// Count dates per calendar month (UTC) in chronological order, labelled
/// `"Mon 'YY"`.
pub fn monthly_trend<I>(dates: I) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut months: BTreeMap<(i32, u32), ChartPoint> = BTreeMap::new();
    for instant in dates {
        months
            .entry((instant.year(), instant.month()))
            .or_insert_with(|| ChartPoint::new(sap_date::month_label(&instant), 0))
            .value += 1;
    }
    months.into_values().collect()
}

/// Per-bucket counts, always listing all three buckets in order.
pub fn aging_distribution(payments: &[PaymentAging]) -> Vec<ChartPoint> {
    let counts = count_by(payments, |payment| aging_bucket(payment.aging).label().to_string());
    AgingBucket::ALL
        .iter()
        .map(|bucket| ChartPoint::new(bucket.label(), counts.get(bucket.label()).copied().unwrap_or(0)))
        .collect()
}

/// Record lists feeding the dashboard. Sources that could not be fetched are
/// named in `unavailable` and left empty.
#[derive(Debug, Clone, Default)]
pub struct DashboardSources {
    pub rfqs: Vec<RfqLine>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub goods_receipts: Vec<GoodsReceipt>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<PaymentAging>,
    pub memos: Vec<Memo>,
    pub unavailable: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub open_rfqs: usize,
    pub purchase_orders: usize,
    pub goods_receipts: usize,
    pub invoices: usize,
    pub outstanding_payments: usize,
    pub memos: usize,
}

/// Summary cards and chart series for the dashboard home view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub vendor_id: String,
    pub counts: DashboardCounts,
    pub monthly_rfqs: Vec<ChartPoint>,
    pub monthly_receipts: Vec<ChartPoint>,
    pub po_status: Vec<ChartPoint>,
    pub aging_buckets: Vec<ChartPoint>,
    pub payment_status: Vec<ChartPoint>,
    pub memo_kinds: Vec<ChartPoint>,
    pub unavailable: Vec<String>,
}

impl DashboardSummary {
    pub fn build(vendor_id: impl Into<String>, sources: DashboardSources) -> Self {
        let counts = DashboardCounts {
            open_rfqs: sources.rfqs.len(),
            purchase_orders: sources.purchase_orders.len(),
            goods_receipts: sources.goods_receipts.len(),
            invoices: sources.invoices.len(),
            outstanding_payments: sources.payments.len(),
            memos: sources.memos.len(),
        };

        Self {
            vendor_id: vendor_id.into(),
            counts,
            monthly_rfqs: monthly_trend(sources.rfqs.iter().filter_map(|rfq| rfq.due_date)),
            monthly_receipts: monthly_trend(
                sources
                    .goods_receipts
                    .iter()
                    .filter_map(|receipt| receipt.posting_date),
            ),
            po_status: chart_series(count_by(&sources.purchase_orders, |po| po.status.clone())),
            aging_buckets: aging_distribution(&sources.payments),
            payment_status: chart_series(count_by(&sources.payments, |p| p.status.clone())),
            memo_kinds: chart_series(count_by(&sources.memos, |memo| memo.kind.to_string())),
            unavailable: sources.unavailable,
        }
    }
}
