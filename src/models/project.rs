use super::{Component, IssueType, User, Version};
use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Project {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "avatarUrls")]
    pub avatar_urls: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<User>,
    #[serde(rename = "assigneeType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_type: Option<String>,
    pub components: Vec<Component>,
    #[serde(rename = "issueTypes")]
    pub issue_types: Vec<IssueType>,
    pub versions: Vec<Version>,
    pub roles: HashMap<String, String>,
    #[serde(rename = "projectCategory")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProjectCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Materialize for Project {
    fn materialize(node: Node<'_>) -> Result<Self> {
        // 古いサーバーは "issuetypes" で返す
        let issue_types = if node.has("issueTypes") {
            node.get("issueTypes")
        } else {
            node.get("issuetypes")
        };

        Ok(Self {
            resource: ResourceRef::from_node(node),
            key: node.get("key").as_string(),
            name: node.get("name").as_string(),
            description: node.get("description").as_string(),
            avatar_urls: node.get("avatarUrls").as_string_map(),
            lead: node.get("lead").resource()?,
            assignee_type: node.get("assigneeType").as_string(),
            components: node.get("components").resources()?,
            issue_types: issue_types.resources()?,
            versions: node.get("versions").resources()?,
            roles: node.get("roles").as_string_map(),
            category: node.get("projectCategory").resource()?,
            email: node.get("email").as_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectCategory {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Materialize for ProjectCategory {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
            description: node.get("description").as_string(),
        })
    }
}

impl_resource!(Project => resource, ProjectCategory => resource);

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, materialize_one};
    use serde_json::json;

    fn project_json() -> serde_json::Value {
        json!({
            "self": "https://example.atlassian.net/rest/api/2/project/10000",
            "id": "10000",
            "key": "TEST",
            "name": "Test Project",
            "description": "This is a test project",
            "avatarUrls": {
                "48x48": "https://example.atlassian.net/secure/projectavatar?pid=10000&avatarId=10200&size=large",
                "16x16": "https://example.atlassian.net/secure/projectavatar?pid=10000&avatarId=10200&size=xsmall"
            },
            "lead": {
                "self": "https://example.atlassian.net/rest/api/2/user?username=lead",
                "name": "lead",
                "displayName": "Project Lead",
                "active": true
            },
            "assigneeType": "PROJECT_LEAD",
            "components": [
                {"id": "10100", "name": "Backend"},
                "not a component",
                {"id": "10101", "name": "Frontend", "isAssigneeTypeValid": true}
            ],
            "issueTypes": [
                {"id": "1", "name": "Bug", "subtask": false},
                {"id": "5", "name": "Sub-task", "subtask": true}
            ],
            "versions": [
                {"id": "10200", "name": "1.0", "released": true, "releaseDate": "2024-02-01"}
            ],
            "roles": {
                "Developers": "https://example.atlassian.net/rest/api/2/project/10000/role/10001"
            },
            "projectCategory": {"id": "10000", "name": "Internal", "description": "Internal projects"},
            "email": "test-project@example.com"
        })
    }

    #[test]
    fn test_project_materialization() {
        let project: Project = materialize_one(&project_json()).unwrap();

        assert_eq!(project.id(), Some("10000"));
        assert_eq!(project.key.as_deref(), Some("TEST"));
        assert_eq!(project.name.as_deref(), Some("Test Project"));
        assert_eq!(project.avatar_urls.len(), 2);
        assert_eq!(project.lead.as_ref().and_then(|u| u.display_name.as_deref()), Some("Project Lead"));
        assert_eq!(project.assignee_type.as_deref(), Some("PROJECT_LEAD"));
        assert_eq!(project.components.len(), 2);
        assert_eq!(project.components[1].name.as_deref(), Some("Frontend"));
        assert!(project.components[1].is_assignee_type_valid);
        assert_eq!(project.issue_types.len(), 2);
        assert!(project.issue_types[1].subtask);
        assert_eq!(project.versions[0].name.as_deref(), Some("1.0"));
        assert!(project.versions[0].release_date.is_some());
        assert!(project.roles.contains_key("Developers"));
        assert_eq!(project.category.as_ref().and_then(|c| c.name.as_deref()), Some("Internal"));
        assert_eq!(project.email.as_deref(), Some("test-project@example.com"));
        assert_eq!(project.to_string(), "Test Project");
    }

    #[test]
    fn test_project_issue_types_legacy_key() {
        let modern = project_json();
        let mut legacy = project_json();
        let types = legacy.as_object_mut().unwrap().remove("issueTypes").unwrap();
        legacy["issuetypes"] = types;

        let modern: Project = materialize_one(&modern).unwrap();
        let legacy: Project = materialize_one(&legacy).unwrap();

        assert_eq!(legacy.issue_types, modern.issue_types);
        assert_eq!(legacy, modern);
    }

    #[test]
    fn test_project_prefers_modern_issue_types_key() {
        let project: Project = materialize_one(&json!({
            "issueTypes": [{"id": "1", "name": "Bug"}],
            "issuetypes": [{"id": "2", "name": "Task"}, {"id": "3", "name": "Story"}]
        }))
        .unwrap();

        assert_eq!(project.issue_types.len(), 1);
        assert_eq!(project.issue_types[0].name.as_deref(), Some("Bug"));
    }

    #[test]
    fn test_project_without_optional_parts() {
        let project: Project = materialize_one(&json!({"key": "MIN"})).unwrap();

        assert_eq!(project.key.as_deref(), Some("MIN"));
        assert!(project.lead.is_none());
        assert!(project.category.is_none());
        assert!(project.components.is_empty());
        assert!(project.issue_types.is_empty());
        assert!(project.roles.is_empty());
        assert_eq!(project.to_string(), "");
    }
}
