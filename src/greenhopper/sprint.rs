use super::SprintIssue;
use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sprint {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub closed: bool,
    #[serde(rename = "startDate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(rename = "endDate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(rename = "completeDate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<NaiveDateTime>,
    #[serde(rename = "issuesIds")]
    pub issues_ids: HashSet<String>,
    pub issues: Vec<SprintIssue>,
}

impl Sprint {
    /// 課題がこのスプリントに属するか
    pub fn contains(&self, issue_id: &str) -> bool {
        self.issues_ids.contains(issue_id)
    }
}

impl Materialize for Sprint {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
            state: node.get("state").as_string(),
            closed: node.get("closed").as_bool(),
            start_date: node.get("startDate").as_agile_date_time(),
            end_date: node.get("endDate").as_agile_date_time(),
            complete_date: node.get("completeDate").as_agile_date_time(),
            issues_ids: node.get("issuesIds").as_string_list().into_iter().collect(),
            issues: Vec::new(),
        })
    }
}

impl_resource!(Sprint => resource);

impl fmt::Display for Sprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
