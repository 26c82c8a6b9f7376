use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single primitive cell value of a flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Field absent or null on this record
    Missing,
    Bool(bool),
    Number(f64),
    /// Date-string that parsed; `raw` keeps the text the API sent
    Date {
        raw: String,
        at: DateTime<FixedOffset>,
    },
    Text(String),
}

impl FieldValue {
    /// Build a date value from an API date-string. A blank string is a
    /// missing date; anything else that does not parse stays text.
    pub fn date(raw: &str) -> FieldValue {
        if raw.trim().is_empty() {
            return FieldValue::Missing;
        }
        match parse_timestamp(raw) {
            Some(at) => FieldValue::Date {
                raw: raw.to_string(),
                at,
            },
            None => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// The string form used by free-text search. Missing values have none.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Missing => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(format_number(*n)),
            FieldValue::Date { raw, .. } => Some(raw.clone()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Number(_) => 2,
            FieldValue::Date { .. } => 3,
            FieldValue::Text(_) => 4,
        }
    }

    /// Total order over cell values: missing first, then by kind, then the
    /// kind's native ordering.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Date { at: a, .. }, FieldValue::Date { at: b, .. }) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// Convert a JSON scalar into a cell. Nested values are kept as their
    /// JSON text.
    pub fn from_json(value: &serde_json::Value) -> FieldValue {
        match value {
            serde_json::Value::Null => FieldValue::Missing,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .unwrap_or_else(|| FieldValue::Text(n.to_string())),
            serde_json::Value::String(s) => FieldValue::date(s),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Missing)
    }
}

/// Integral numbers print without a fractional part, the way the API's own
/// JSON renders them.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Accepts RFC 3339, a zone-less ISO timestamp (read as UTC) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at);
    }
    let utc = FixedOffset::east_opt(0)?;
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

/// A row that the list presenter can search, sort and page.
pub trait TableRecord {
    /// Opaque identity, used only as a render key.
    fn record_id(&self) -> String;

    /// Value of a named field; unknown names yield `FieldValue::Missing`.
    fn field(&self, key: &str) -> FieldValue;

    /// Every field that takes part in free-text search.
    fn field_keys(&self) -> Vec<&str>;

    /// String forms matched by the search box.
    fn search_values(&self) -> Vec<String> {
        self.field_keys()
            .into_iter()
            .filter_map(|key| self.field(key).search_text())
            .collect()
    }
}

/// Schemaless record for generic lists fetched as arbitrary JSON objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Flatten a JSON object into a record. `id_key` names the field holding
    /// the identity; objects without it get their position as id.
    pub fn from_json(
        id_key: &str,
        position: usize,
        value: &serde_json::Value,
    ) -> Option<Record> {
        let object = value.as_object()?;
        let id = match object.get(id_key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => position.to_string(),
            Some(other) => other.to_string(),
        };
        let fields = object
            .iter()
            .map(|(key, value)| (key.clone(), FieldValue::from_json(value)))
            .collect();
        Some(Record { id, fields })
    }

    /// Parse a JSON array of objects; non-object entries are skipped.
    pub fn list_from_json(id_key: &str, value: &serde_json::Value) -> Vec<Record> {
        value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(position, item)| Record::from_json(id_key, position, item))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every field name present on at least one record, sorted. The id field
    /// is left out.
    pub fn column_keys(records: &[Record], id_key: &str) -> Vec<String> {
        let keys: BTreeSet<&str> = records
            .iter()
            .flat_map(|record| record.fields.keys().map(String::as_str))
            .filter(|key| *key != id_key)
            .collect();
        keys.into_iter().map(str::to_string).collect()
    }
}

impl TableRecord for Record {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        self.fields.get(key).cloned().unwrap_or(FieldValue::Missing)
    }

    fn field_keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sorts_before_everything() {
        let missing = FieldValue::Missing;
        for value in [
            FieldValue::Bool(false),
            FieldValue::Number(-1e9),
            FieldValue::date("1970-01-01"),
            FieldValue::Text(String::new()),
        ] {
            assert_eq!(missing.compare(&value), Ordering::Less);
            assert_eq!(value.compare(&missing), Ordering::Greater);
        }
    }

    #[test]
    fn test_native_ordering_per_kind() {
        let (two, ten) = (FieldValue::from(2i64), FieldValue::from(10i64));
        assert_eq!(two.compare(&ten), Ordering::Less);
        let (ten, two) = (FieldValue::from("10"), FieldValue::from("2"));
        assert_eq!(ten.compare(&two), Ordering::Less);
        let earlier = FieldValue::date("2024-12-31T23:00:00Z");
        let later = FieldValue::date("2025-01-01T08:00:00+05:00");
        assert_eq!(earlier.compare(&later), Ordering::Less);
    }

    #[test]
    fn test_date_parsing_formats() {
        for raw in ["2025-03-01T10:15:00Z", "2025-03-01T10:15:00.123", "2025-03-01"] {
            assert!(matches!(FieldValue::date(raw), FieldValue::Date { .. }), "{raw}");
        }
        assert_eq!(
            FieldValue::date("not a date"),
            FieldValue::Text("not a date".into())
        );
    }

    #[test]
    fn test_blank_date_is_missing() {
        assert!(FieldValue::date("").is_missing());
        assert!(FieldValue::date("   ").is_missing());
        let dated = FieldValue::date("2020-01-01");
        assert_eq!(FieldValue::date("").compare(&dated), Ordering::Less);
        assert!(FieldValue::from_json(&serde_json::Value::from("")).is_missing());
    }

    #[test]
    fn test_search_text_forms() {
        assert_eq!(FieldValue::Number(2.0).search_text().as_deref(), Some("2"));
        assert_eq!(FieldValue::Number(2.5).search_text().as_deref(), Some("2.5"));
        assert_eq!(FieldValue::Bool(true).search_text().as_deref(), Some("true"));
        assert_eq!(FieldValue::Missing.search_text(), None);
        assert_eq!(
            FieldValue::date("2025-03-01").search_text().as_deref(),
            Some("2025-03-01")
        );
    }

    #[test]
    fn test_record_from_json() {
        let rows = Record::list_from_json(
            "id",
            &json!([
                {"id": "a", "count": 3, "active": true, "note": null},
                {"count": 1},
                "skipped"
            ]),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "a");
        assert_eq!(rows[0].field("count"), FieldValue::Number(3.0));
        assert_eq!(rows[0].field("active"), FieldValue::Bool(true));
        assert!(rows[0].field("note").is_missing());
        assert_eq!(rows[1].id, "1");
        assert!(rows[1].field("nope").is_missing());
    }

    #[test]
    fn test_column_keys_union() {
        let rows = vec![
            Record::new("1").with("id", "1").with("title", "Diwali"),
            Record::new("2").with("url", "https://x/y.jpg").with("title", "Holi"),
        ];
        assert_eq!(Record::column_keys(&rows, "id"), vec!["title", "url"]);
        assert!(Record::column_keys(&[], "id").is_empty());
    }
}
