//! Request body types for report generation

use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of a report request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub company_data: Option<Vec<Company>>,
}

impl ReportRequest {
    /// Companies to render, or `None` when the payload carries nothing to draw
    pub fn into_companies(self) -> Option<Vec<Company>> {
        self.company_data.filter(|companies| !companies.is_empty())
    }
}

/// A company and its service orders, in input order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Company {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_code: String,
    #[serde(default)]
    pub service_order: Vec<OrderRecord>,
}

impl Company {
    /// Field names of the first order record, which define the table columns
    pub fn field_names(&self) -> Vec<&str> {
        self.service_order
            .first()
            .map(|record| record.keys().collect())
            .unwrap_or_default()
    }

    /// Display rows projected onto the first record's fields
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let fields = self.field_names();
        self.service_order
            .iter()
            .map(|record| fields.iter().map(|field| record.display(field)).collect())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.service_order.len()
    }
}

/// One service order: field name to scalar value, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct OrderRecord(pub Map<String, Value>);

impl OrderRecord {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Text shown in the table cell for `field`; absent fields render empty
    pub fn display(&self, field: &str) -> String {
        self.0.get(field).map(display_value).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for OrderRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OrderRecord(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
