use crate::error::Result;
use crate::node::Node;
use crate::resource::Materialize;
use serde::Serialize;

/// システム/カスタムフィールドの定義（`self`を持たないのでResourceではない）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JiraField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub custom: bool,
    pub orderable: bool,
    pub navigable: bool,
    pub searchable: bool,
    #[serde(rename = "clauseNames")]
    pub clause_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<FieldSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    /// システムフィールドでは0
    #[serde(rename = "customId")]
    pub custom_id: i64,
}

impl Materialize for JiraField {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            id: node.get("id").as_string(),
            key: node.get("key").as_string(),
            name: node.get("name").as_string(),
            custom: node.get("custom").as_bool(),
            orderable: node.get("orderable").as_bool(),
            navigable: node.get("navigable").as_bool(),
            searchable: node.get("searchable").as_bool(),
            clause_names: node.get("clauseNames").as_string_list(),
            schema: node.get("schema").as_field_schema(),
        })
    }
}

impl JiraField {
    pub fn is_custom(&self) -> bool {
        self.custom
    }
}
