//! OData v2 envelope handling and request path construction.

use serde_json::Value;

use crate::entity::EntitySet;

/// Extract the result rows from a SAP OData response body.
///
/// Recognised shapes, in order:
/// 1. a bare array is returned as-is;
/// 2. `{ "d": { "results": [...] } }` yields the results;
/// 3. `{ "d": { ... } }` without a `results` key is a single entity;
/// 4. any other object is treated as a bare entity;
/// 5. everything else (null, scalars) yields no rows.
pub fn unwrap(body: &Value) -> Vec<Value> {
    if let Value::Array(rows) = body {
        return rows.clone();
    }

    if let Some(d) = body.get("d") {
        if let Some(Value::Array(results)) = d.get("results") {
            return results.clone();
        }
        if let Value::Object(entity) = d {
            if !entity.contains_key("results") {
                return vec![d.clone()];
            }
        }
    }

    match body {
        Value::Object(_) => vec![body.clone()],
        _ => Vec::new(),
    }
}

/// Pull a human-readable message out of a SAP error response.
///
/// SAP nests it under `error.message.value`; when that is absent the raw body
/// is relayed verbatim.
pub fn extract_error_message(raw_body: &str) -> String {
    serde_json::from_str::<Value>(raw_body)
        .ok()
        .and_then(|body| {
            body.pointer("/error/message/value")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| raw_body.to_string())
}

/// Quote a value as an OData string literal, doubling embedded quotes.
pub fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `$filter=<field> eq '<value>'` predicate body.
pub fn filter_eq(field: &str, value: &str) -> String {
    format!("{} eq {}", field, literal(value))
}

/// Percent-encode the characters in `reserved` (and `%` itself) so caller
/// input cannot end a query parameter or path segment early.
fn escape_reserved(value: &str, reserved: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '%' || reserved.contains(&ch) {
            escaped.push_str(&format!("%{:02X}", ch as u32));
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

/// Path (relative to the service root) for a JSON collection read, with an
/// optional `$filter` expression.
pub fn collection_path(set: EntitySet, filter: Option<&str>) -> String {
    match filter {
        Some(filter) => format!(
            "{}?$filter={}&$format=json",
            set.name(),
            escape_reserved(filter, &['&', '#', '+'])
        ),
        None => format!("{}?$format=json", set.name()),
    }
}

/// Path for a single entity addressed by its key predicate, e.g.
/// `ZVEN_INVOICEPDFSet(Lifnr='0000100000',Belnr='0000000042')`.
pub fn entity_path(set: EntitySet, keys: &[(&str, &str)]) -> String {
    let predicate = keys
        .iter()
        .map(|(name, value)| {
            let quoted = escape_reserved(&literal(value), &['/', '?', '#']);
            format!("{}={}", name, quoted)
        })
        .collect::<Vec<_>>()
        .join(",");
    format!("{}({})", set.name(), predicate)
}
