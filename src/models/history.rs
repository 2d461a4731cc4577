use super::User;
use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 課題の変更履歴レコード（いつ・誰が・何を変更したか）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueHistory {
    #[serde(flatten)]
    pub resource: ResourceRef,
    /// 変更者
    #[serde(rename = "author")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// 変更日時
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// 変更されたフィールドの一覧（サーバーの順序のまま）
    #[serde(rename = "items")]
    pub changes: Vec<IssueHistoryItem>,
}

/// 1フィールド分の変更
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueHistoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "fieldtype")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(rename = "fieldId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(rename = "fromString")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_string: Option<String>,
    #[serde(rename = "toString")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_string: Option<String>,
}

impl Materialize for IssueHistory {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            user: node.get("author").resource()?,
            created: node.get("created").as_required_date_time("created")?,
            changes: node.get("items").resources()?,
        })
    }
}

impl Materialize for IssueHistoryItem {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            field: node.get("field").as_string(),
            field_type: node.get("fieldtype").as_string(),
            field_id: node.get("fieldId").as_string(),
            from: node.get("from").as_string(),
            to: node.get("to").as_string(),
            from_string: node.get("fromString").as_string(),
            to_string: node.get("toString").as_string(),
        })
    }
}

impl_resource!(IssueHistory => resource);

impl IssueHistory {
    /// 同じid/変更者/日時を持ち、変更だけを差し替えた新しいレコード
    ///
    /// 元のレコードは変更しない。
    pub fn with_changes(&self, changes: Vec<IssueHistoryItem>) -> Self {
        Self {
            resource: self.resource.clone(),
            user: self.user.clone(),
            created: self.created,
            changes,
        }
    }
}
