//! List Engine
//!
//! Filtering, sorting and aggregation over SAP rows and the typed record views.
//! Everything here is pure and total: missing fields, odd value types and
//! empty inputs never produce an error.

pub mod aggregate;
pub mod filter;
pub mod sort;

pub use aggregate::{
    aging_bucket, aging_distribution, count_by, monthly_trend, AgingBucket, ChartPoint,
    DashboardCounts, DashboardSources, DashboardSummary,
};
pub use filter::{filter, FilterState};
pub use sort::{sort, SortDirection, SortState};
