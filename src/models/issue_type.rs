use super::Status;
use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueType {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "iconUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub subtask: bool,
    /// プロジェクトのステータス一覧エンドポイントでのみ返される
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<Status>>,
}

impl Materialize for IssueType {
    fn materialize(node: Node<'_>) -> Result<Self> {
        let statuses = node.get("statuses");

        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
            description: node.get("description").as_string(),
            icon_url: node.get("iconUrl").as_string(),
            subtask: node.get("subtask").as_bool(),
            statuses: if statuses.is_array() {
                Some(statuses.resources()?)
            } else {
                None
            },
        })
    }
}

impl_resource!(IssueType => resource);

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
