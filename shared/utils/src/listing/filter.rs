use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vendor_portal_models::{sap_date, FieldAccess};

/// Free-text and date-range criteria for a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && !self.has_date_bound()
    }

    pub fn has_date_bound(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    fn matches_search<T: FieldAccess>(&self, record: &T, search_fields: &[&str]) -> bool {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        search_fields.iter().any(|name| {
            record
                .field(name)
                .map(|value| value.as_text().to_lowercase().contains(&term))
                .unwrap_or(false)
        })
    }

    fn matches_dates<T: FieldAccess>(&self, record: &T, date_field: Option<&str>) -> bool {
        if !self.has_date_bound() {
            return true;
        }
        // Sets without a date field have nothing to bound.
        let Some(date_field) = date_field else {
            return true;
        };

        let Some(day) = record
            .field(date_field)
            .and_then(|value| value.as_date())
            .map(|instant| sap_date::utc_day(&instant))
        else {
            return false;
        };

        self.date_from.map_or(true, |from| day >= from)
            && self.date_to.map_or(true, |to| day <= to)
    }
}

/// Keep the records that match both the search term and the date range.
///
/// The search is a case-insensitive substring match over `search_fields`.
/// Date bounds are inclusive calendar days in UTC; a record whose date field
/// is absent or undecodable is dropped whenever a bound is set.
pub fn filter<T: FieldAccess>(
    records: Vec<T>,
    state: &FilterState,
    search_fields: &[&str],
    date_field: Option<&str>,
) -> Vec<T> {
    if state.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| {
            state.matches_search(record, search_fields) && state.matches_dates(record, date_field)
        })
        .collect()
}
