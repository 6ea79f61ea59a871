//! Query descriptors understood by the record store.
//!
//! These serialize to the store's wire shape: a field projection plus optional
//! equality filters (`where`), OR-combined "contains" groups (`whereGroups`),
//! ordering (`orderBy`) and a single limit/offset page (`pagingInfo`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name wrapper inside a projected field entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

/// One projected field: `{ "field": { "Name": "email_c" } }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: FieldName,
}

impl FieldSpec {
    pub fn new(name: &str) -> Self {
        Self {
            field: FieldName {
                name: name.to_string(),
            },
        }
    }
}

/// Comparison operator applied to a field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Operator {
    EqualTo,
    Contains,
}

/// Boolean combinator for condition groups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    Or,
    And,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

/// Top-level equality filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhereCondition {
    #[serde(rename = "FieldName")]
    pub field_name: String,

    #[serde(rename = "Operator")]
    pub operator: Operator,

    #[serde(rename = "Values")]
    pub values: Vec<Value>,

    #[serde(rename = "Include")]
    pub include: bool,
}

/// A single condition inside a sub-group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubGroup {
    pub conditions: Vec<Condition>,
    pub operator: GroupOperator,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhereGroup {
    pub operator: GroupOperator,
    pub sub_groups: Vec<SubGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub sorttype: SortType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagingInfo {
    pub limit: usize,
    pub offset: usize,
}

/// Query passed to `fetch_records` and `get_record_by_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FetchQuery {
    pub fields: Vec<FieldSpec>,

    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<WhereCondition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub where_groups: Vec<WhereGroup>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

impl FetchQuery {
    /// Start a query projecting the given fields.
    pub fn with_fields(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| FieldSpec::new(f)).collect(),
            ..Default::default()
        }
    }

    /// Add an equality filter on `field`.
    pub fn where_equals(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(WhereCondition {
            field_name: field.to_string(),
            operator: Operator::EqualTo,
            values: vec![value.into()],
            include: true,
        });
        self
    }

    /// Match records where any of `fields` contains `text`.
    ///
    /// Each field becomes its own sub-group; the group ORs them together.
    pub fn contains_any(mut self, fields: &[&str], text: &str) -> Self {
        let sub_groups = fields
            .iter()
            .map(|field| SubGroup {
                conditions: vec![Condition {
                    field_name: field.to_string(),
                    operator: Operator::Contains,
                    values: vec![Value::String(text.to_string())],
                }],
                operator: GroupOperator::Or,
            })
            .collect();

        self.where_groups.push(WhereGroup {
            operator: GroupOperator::Or,
            sub_groups,
        });
        self
    }

    pub fn order_by(mut self, field: &str, sorttype: SortType) -> Self {
        self.order_by.push(OrderBy {
            field_name: field.to_string(),
            sorttype,
        });
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.paging_info = Some(PagingInfo { limit, offset });
        self
    }

    /// Names of the projected fields, in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_only_omits_optional_clauses() {
        let query = FetchQuery::with_fields(&["Name", "email_c"]);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(
            value,
            json!({
                "fields": [
                    { "field": { "Name": "Name" } },
                    { "field": { "Name": "email_c" } }
                ]
            })
        );
    }

    #[test]
    fn test_equality_order_and_paging_wire_shape() {
        let query = FetchQuery::with_fields(&["Name"])
            .where_equals("contact_id_c", 7)
            .order_by("date_c", SortType::Desc)
            .page(10, 0);
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(
            value["where"],
            json!([{
                "FieldName": "contact_id_c",
                "Operator": "EqualTo",
                "Values": [7],
                "Include": true
            }])
        );
        assert_eq!(
            value["orderBy"],
            json!([{ "fieldName": "date_c", "sorttype": "DESC" }])
        );
        assert_eq!(value["pagingInfo"], json!({ "limit": 10, "offset": 0 }));
    }

    #[test]
    fn test_contains_any_builds_one_sub_group_per_field() {
        let query = FetchQuery::with_fields(&["Name"]).contains_any(&["Name", "industry_c"], "acme");
        let value = serde_json::to_value(&query).unwrap();

        assert_eq!(
            value["whereGroups"],
            json!([{
                "operator": "OR",
                "subGroups": [
                    {
                        "conditions": [{ "fieldName": "Name", "operator": "Contains", "values": ["acme"] }],
                        "operator": "OR"
                    },
                    {
                        "conditions": [{ "fieldName": "industry_c", "operator": "Contains", "values": ["acme"] }],
                        "operator": "OR"
                    }
                ]
            }])
        );
    }

    #[test]
    fn test_field_names() {
        let query = FetchQuery::with_fields(&["Name", "stage_c"]);
        assert_eq!(query.field_names(), vec!["Name", "stage_c"]);
    }
}
