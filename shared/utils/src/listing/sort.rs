use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vendor_portal_models::FieldAccess;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

fn compare_ascending<T: FieldAccess>(a: &T, b: &T, field: &str) -> Ordering {
    match (a.field(field), b.field(field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(&b),
    }
}

/// Stable in-place sort by `state.field`. Records missing the field come
/// first in ascending order and last in descending order.
pub fn sort<T: FieldAccess>(records: &mut [T], state: &SortState) {
    if state.field.is_empty() {
        return;
    }

    records.sort_by(|a, b| {
        let ordering = compare_ascending(a, b, &state.field);
        match state.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn ids(records: &[Value]) -> Vec<&str> {
        records.iter().map(|r| r["id"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let mut records = vec![
            json!({"id": "a", "Aging": 45}),
            json!({"id": "b", "Aging": 5}),
            json!({"id": "c", "Aging": 90}),
        ];
        sort(&mut records, &SortState::new("Aging", SortDirection::Asc));
        assert_eq!(ids(&records), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_dates_sort_by_instant() {
        let mut records = vec![
            json!({"id": "jan25", "Budat": "/Date(1735689600000)/"}),
            json!({"id": "dec24", "Budat": "/Date(1733011200000)/"}),
            json!({"id": "jun25", "Budat": "/Date(1748822400000)/"}),
        ];
        sort(&mut records, &SortState::new("Budat", SortDirection::Desc));
        assert_eq!(ids(&records), vec!["jun25", "jan25", "dec24"]);
    }

    #[test]
    fn test_missing_values_first_in_asc_last_in_desc() {
        let mut records = vec![
            json!({"id": "x", "Statu": "Open"}),
            json!({"id": "missing"}),
            json!({"id": "y", "Statu": "Closed"}),
        ];
        sort(&mut records, &SortState::new("Statu", SortDirection::Asc));
        assert_eq!(ids(&records), vec!["missing", "y", "x"]);

        sort(&mut records, &SortState::new("Statu", SortDirection::Desc));
        assert_eq!(ids(&records), vec!["x", "y", "missing"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut records = vec![
            json!({"id": "1", "Waers": "EUR"}),
            json!({"id": "2", "Waers": "USD"}),
            json!({"id": "3", "Waers": "EUR"}),
            json!({"id": "4", "Waers": "EUR"}),
        ];
        sort(&mut records, &SortState::new("Waers", SortDirection::Asc));
        assert_eq!(ids(&records), vec!["1", "3", "4", "2"]);

        sort(&mut records, &SortState::new("Waers", SortDirection::Desc));
        assert_eq!(ids(&records), vec!["2", "1", "3", "4"]);
    }

    #[test]
    fn test_text_sort_is_case_sensitive() {
        let mut records = vec![json!({"id": "lower", "Name1": "acme"}), json!({"id": "upper", "Name1": "Zeta"})];
        sort(&mut records, &SortState::new("Name1", SortDirection::Asc));
        assert_eq!(ids(&records), vec!["upper", "lower"]);
    }

    #[test]
    fn test_empty_inputs() {
        let mut records: Vec<Value> = Vec::new();
        sort(&mut records, &SortState::new("Aging", SortDirection::Asc));
        assert!(records.is_empty());

        let mut records = vec![json!({"id": "b"}), json!({"id": "a"})];
        sort(&mut records, &SortState::default());
        assert_eq!(ids(&records), vec!["b", "a"]);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
        assert_eq!(SortDirection::Asc.to_string(), "asc");
    }
}
