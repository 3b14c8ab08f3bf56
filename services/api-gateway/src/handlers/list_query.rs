//! Optional filter/sort query parameters shared by the list endpoints.

use serde::Deserialize;
use serde_json::Value;
use vendor_portal_models::{EntitySet, SapRecord};
use vendor_portal_utils::listing::{filter, sort, FilterState, SortDirection, SortState};
use vendor_portal_utils::{parse_day, PortalError, PortalResult};

/// `?search=&date_from=&date_to=&sort=&direction=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ListQuery {
    pub fn filter_state(&self) -> PortalResult<FilterState> {
        Ok(FilterState {
            search_term: self.search.clone().unwrap_or_default(),
            date_from: parse_day("date_from", self.date_from.as_deref())?,
            date_to: parse_day("date_to", self.date_to.as_deref())?,
        })
    }

    pub fn sort_state(&self) -> PortalResult<Option<SortState>> {
        let Some(field) = self.sort.as_deref().map(str::trim).filter(|f| !f.is_empty()) else {
            return Ok(None);
        };

        let direction = match self.direction.as_deref() {
            Some(direction) => direction
                .parse::<SortDirection>()
                .map_err(|message| PortalError::validation("direction", message))?,
            None => SortDirection::Asc,
        };
        Ok(Some(SortState::new(field, direction)))
    }

    /// Filter and sort raw SAP rows using the entity set's search and date
    /// fields. Rows come back untouched when no parameter is given.
    pub fn apply(&self, set: EntitySet, rows: Vec<Value>) -> PortalResult<Vec<Value>> {
        let filter_state = self.filter_state()?;
        let sort_state = self.sort_state()?;
        if filter_state.is_empty() && sort_state.is_none() {
            return Ok(rows);
        }

        let records: Vec<SapRecord> = rows.into_iter().map(SapRecord::from_value).collect();
        let mut records = filter(records, &filter_state, set.search_fields(), set.date_field());
        if let Some(sort_state) = sort_state {
            sort(&mut records, &sort_state);
        }

        Ok(records.into_iter().map(SapRecord::into_value).collect())
    }
}
