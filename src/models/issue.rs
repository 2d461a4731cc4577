use super::{Component, IssueType, Priority, Project, Resolution, Status, User, Version, Votes};
use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Issue {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "issuetype")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IssueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<User>,
    pub labels: Vec<String>,
    pub components: Vec<Component>,
    #[serde(rename = "fixVersions")]
    pub fix_versions: Vec<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<Votes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Materialize for Issue {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            key: node.get("key").as_string(),
            fields: IssueFields::materialize(node.get("fields"))?,
        })
    }
}

impl Materialize for IssueFields {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            summary: node.get("summary").as_string(),
            description: node.get("description").as_string(),
            issue_type: node.get("issuetype").resource()?,
            status: node.get("status").resource()?,
            priority: node.get("priority").resource()?,
            resolution: node.get("resolution").resource()?,
            project: node.get("project").resource()?,
            assignee: node.get("assignee").resource()?,
            reporter: node.get("reporter").resource()?,
            labels: node.get("labels").as_string_list(),
            components: node.get("components").resources()?,
            fix_versions: node.get("fixVersions").resources()?,
            votes: node.get("votes").resource()?,
            created: node.get("created").as_date_time(),
            updated: node.get("updated").as_date_time(),
        })
    }
}

impl_resource!(Issue => resource);

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key.as_deref().unwrap_or_default())
    }
}
