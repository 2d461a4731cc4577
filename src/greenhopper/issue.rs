//! ボード上の課題（GreenHopper形式）
//!
//! REST APIの課題と違い、フィールドはフラットに並び、種別や優先度は名前とアイコンURLだけを持つ。

use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

/// スプリント課題とエピックに共通するフィールド
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgileIssue {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "typeName")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(rename = "typeId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(rename = "typeUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_url: Option<String>,
    #[serde(rename = "priorityName")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_name: Option<String>,
    #[serde(rename = "priorityUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_url: Option<String>,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(rename = "assigneeName")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,
    #[serde(rename = "avatarUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "statusId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<String>,
    #[serde(rename = "statusName")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_name: Option<String>,
    #[serde(rename = "statusUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
    #[serde(rename = "fixVersions")]
    pub fix_versions: Vec<i64>,
    #[serde(rename = "projectId")]
    pub project_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EstimateStatistic {
    #[serde(rename = "statFieldId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat_field_id: Option<String>,
    #[serde(rename = "statFieldValue")]
    pub stat_field_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SprintIssue {
    #[serde(flatten)]
    pub issue: AgileIssue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(rename = "estimateStatistic")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_statistic: Option<EstimateStatistic>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpicStats {
    #[serde(rename = "doneEstimate")]
    pub done_estimate: f64,
    #[serde(rename = "notDoneEstimate")]
    pub not_done_estimate: f64,
    #[serde(rename = "totalEstimate")]
    pub total_estimate: f64,
    #[serde(rename = "percentageCompleted")]
    pub percentage_completed: f64,
    #[serde(rename = "estimated")]
    pub estimated: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Epic {
    #[serde(flatten)]
    pub issue: AgileIssue,
    #[serde(rename = "epicLabel")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_label: Option<String>,
    #[serde(rename = "epicColor")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_color: Option<String>,
    #[serde(rename = "epicStats")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_stats: Option<EpicStats>,
}

impl Materialize for AgileIssue {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            key: node.get("key").as_string(),
            hidden: node.get("hidden").as_bool(),
            summary: node.get("summary").as_string(),
            type_name: node.get("typeName").as_string(),
            type_id: node.get("typeId").as_string(),
            type_url: node.get("typeUrl").as_string(),
            priority_name: node.get("priorityName").as_string(),
            priority_url: node.get("priorityUrl").as_string(),
            done: node.get("done").as_bool(),
            assignee: node.get("assignee").as_string(),
            assignee_name: node.get("assigneeName").as_string(),
            avatar_url: node.get("avatarUrl").as_string(),
            color: node.get("color").as_string(),
            status_id: node.get("statusId").as_string(),
            status_name: node.get("statusName").as_string(),
            status_url: node.get("statusUrl").as_string(),
            fix_versions: node.get("fixVersions").as_integer_list(),
            project_id: node.get("projectId").as_integer(),
        })
    }
}

impl Materialize for EstimateStatistic {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            stat_field_id: node.get("statFieldId").as_string(),
            stat_field_value: node.path(&["statFieldValue", "value"]).as_float(),
        })
    }
}

impl Materialize for SprintIssue {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            issue: AgileIssue::materialize(node)?,
            epic: node.get("epic").as_string(),
            estimate_statistic: node.get("estimateStatistic").resource()?,
        })
    }
}

impl Materialize for EpicStats {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            done_estimate: node.get("doneEstimate").as_float(),
            not_done_estimate: node.get("notDoneEstimate").as_float(),
            total_estimate: node.get("totalEstimate").as_float(),
            percentage_completed: node.get("percentageCompleted").as_float(),
            estimated: node.get("estimated").as_integer(),
        })
    }
}

impl Materialize for Epic {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            issue: AgileIssue::materialize(node)?,
            epic_label: node.get("epicLabel").as_string(),
            epic_color: node.get("epicColor").as_string(),
            epic_stats: node.get("epicStats").resource()?,
        })
    }
}

impl_resource!(
    AgileIssue => resource,
    SprintIssue => issue.resource,
    Epic => issue.resource,
);

impl fmt::Display for AgileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for SprintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.issue, f)
    }
}

impl fmt::Display for Epic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.issue, f)
    }
}
