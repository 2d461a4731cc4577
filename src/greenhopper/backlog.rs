//! ボードのバックログとスプリントへの課題の振り分け

use super::{Epic, Marker, RapidViewProject, RapidViewVersion, Sprint, SprintIssue};
use crate::client::JiraClient;
use crate::error::Result;
use crate::node::Node;
use crate::resource::Materialize;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// GreenHopper REST APIのルート
pub const GREENHOPPER_PATH: &str = "/rest/greenhopper/1.0/";

/// どのスプリントにも属さない課題の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BacklogIssues {
    /// 振り分けを実行していない
    #[default]
    NotComputed,
    /// 振り分けたが、すべての課題がいずれかのスプリントに属した
    Empty,
    Unclaimed(Vec<SprintIssue>),
}

impl BacklogIssues {
    /// 未割り当ての課題があるときだけ`Some`
    pub fn as_slice(&self) -> Option<&[SprintIssue]> {
        match self {
            BacklogIssues::Unclaimed(issues) => Some(issues),
            BacklogIssues::NotComputed | BacklogIssues::Empty => None,
        }
    }
}

/// 振り分け結果
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub sprints: Vec<Sprint>,
    pub backlog_issues: BacklogIssues,
}

/// 課題をスプリントとバックログに振り分ける
///
/// 課題はIDが`issuesIds`に含まれるすべてのスプリントに追加される（複数可）。
/// どのスプリントにも含まれない課題だけがバックログに入る。
pub fn partition(issues: &[SprintIssue], mut sprints: Vec<Sprint>) -> Partition {
    let mut unclaimed = Vec::new();

    for issue in issues {
        let id = issue.issue.resource.id.as_deref();
        let mut claimed = false;

        for sprint in sprints.iter_mut() {
            if id.is_some_and(|id| sprint.contains(id)) {
                sprint.issues.push(issue.clone());
                claimed = true;
            }
        }

        if !claimed {
            unclaimed.push(issue.clone());
        }
    }

    let backlog_issues = if unclaimed.is_empty() {
        BacklogIssues::Empty
    } else {
        BacklogIssues::Unclaimed(unclaimed)
    };

    Partition {
        sprints,
        backlog_issues,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpicData {
    pub epics: Vec<Epic>,
    #[serde(rename = "canEditEpics")]
    pub can_edit_epics: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Backlog {
    pub issues: Vec<SprintIssue>,
    #[serde(rename = "backlogIssues")]
    #[serde(serialize_with = "serialize_backlog_issues")]
    pub backlog_issues: BacklogIssues,
    #[serde(rename = "rankCustomFieldId")]
    pub rank_custom_field_id: i64,
    pub sprints: Vec<Sprint>,
    pub projects: Vec<RapidViewProject>,
    pub markers: Vec<Marker>,
    #[serde(rename = "epicData")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_data: Option<EpicData>,
    #[serde(rename = "canManageSprints")]
    pub can_manage_sprints: bool,
    #[serde(rename = "maxIssuesExceeded")]
    pub max_issues_exceeded: bool,
    #[serde(rename = "queryResultLimit")]
    pub query_result_limit: i64,
    #[serde(rename = "versionsPerProject")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions_per_project: Option<HashMap<String, Vec<RapidViewVersion>>>,
}

impl Backlog {
    pub fn backlog_issues(&self) -> Option<&[SprintIssue]> {
        self.backlog_issues.as_slice()
    }

    pub fn epics(&self) -> Option<&[Epic]> {
        self.epic_data.as_ref().map(|data| data.epics.as_slice())
    }

    pub fn can_edit_epics(&self) -> bool {
        self.epic_data.as_ref().is_some_and(|data| data.can_edit_epics)
    }
}

fn serialize_backlog_issues<S: Serializer>(issues: &BacklogIssues, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    issues.as_slice().serialize(serializer)
}

impl Materialize for EpicData {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            epics: node.get("epics").resources()?,
            can_edit_epics: node.get("canEditEpics").as_bool(),
        })
    }
}

impl Materialize for Backlog {
    fn materialize(node: Node<'_>) -> Result<Self> {
        let issues: Vec<SprintIssue> = node.get("issues").resources()?;
        let Partition {
            sprints,
            backlog_issues,
        } = partition(&issues, node.get("sprints").resources()?);

        Ok(Self {
            issues,
            backlog_issues,
            rank_custom_field_id: node.get("rankCustomFieldId").as_integer(),
            sprints,
            projects: node.get("projects").resources()?,
            markers: node.get("markers").resources()?,
            epic_data: node.get("epicData").resource()?,
            can_manage_sprints: node.get("canManageSprints").as_bool(),
            max_issues_exceeded: node.get("maxIssuesExceeded").as_bool(),
            query_result_limit: node.get("queryResultLimit").as_integer(),
            versions_per_project: versions_per_project(node.path(&["versionData", "versionsPerProject"]))?,
        })
    }
}

/// プロジェクトキーごとのバージョン（配列でない値は読み飛ばす）
fn versions_per_project(node: Node<'_>) -> Result<Option<HashMap<String, Vec<RapidViewVersion>>>> {
    if !node.is_object() {
        return Ok(None);
    }

    let mut versions = HashMap::new();
    for (project, list) in node.entries() {
        if list.is_array() {
            versions.insert(project.to_string(), list.resources()?);
        }
    }
    Ok(Some(versions))
}

impl JiraClient {
    /// ボード（rapid view）のバックログを取得し、課題をスプリントへ振り分ける
    pub async fn get_backlog(&self, rapid_view_id: i64) -> Result<Backlog> {
        let path = format!("{}xboard/plan/backlog/data", GREENHOPPER_PATH);
        let query = [("rapidViewId", rapid_view_id.to_string())];

        self.fetch_object(
            &path,
            &query,
            &format!("Failed to retrieve backlog data for rapid view {}", rapid_view_id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, materialize_one};
    use serde_json::json;

    fn issue(id: &str) -> SprintIssue {
        materialize_one(&json!({"id": id, "key": format!("B-{}", id)})).unwrap()
    }

    fn sprint(id: &str, issues_ids: &[&str]) -> Sprint {
        materialize_one(&json!({"id": id, "name": format!("Sprint {}", id), "issuesIds": issues_ids})).unwrap()
    }

    fn keys(issues: &[SprintIssue]) -> Vec<&str> {
        issues.iter().filter_map(|i| i.issue.key.as_deref()).collect()
    }

    #[test]
    fn test_partition_assigns_issues_to_sprints_and_backlog() {
        // Given: スプリント1に2件、スプリント2に1件、どこにも属さない課題が1件
        let issues = vec![issue("1"), issue("2"), issue("3"), issue("4")];
        let sprints = vec![sprint("10", &["1", "2"]), sprint("11", &["3"])];

        // When: 振り分ける
        let result = partition(&issues, sprints);

        // Then: スプリントには課題の順序どおりに、残りはバックログに入る
        assert_eq!(keys(&result.sprints[0].issues), vec!["B-1", "B-2"]);
        assert_eq!(keys(&result.sprints[1].issues), vec!["B-3"]);
        assert_eq!(keys(result.backlog_issues.as_slice().unwrap()), vec!["B-4"]);
    }

    #[test]
    fn test_partition_issue_in_two_sprints() {
        let issues = vec![issue("1"), issue("2")];
        let sprints = vec![sprint("10", &["1"]), sprint("11", &["1", "2"])];

        let result = partition(&issues, sprints);

        assert_eq!(keys(&result.sprints[0].issues), vec!["B-1"]);
        assert_eq!(keys(&result.sprints[1].issues), vec!["B-1", "B-2"]);
        assert_eq!(result.backlog_issues, BacklogIssues::Empty);
        assert!(result.backlog_issues.as_slice().is_none());
    }

    #[test]
    fn test_partition_without_sprints() {
        let issues = vec![issue("1"), issue("2")];

        let result = partition(&issues, Vec::new());

        assert!(result.sprints.is_empty());
        assert_eq!(keys(result.backlog_issues.as_slice().unwrap()), vec!["B-1", "B-2"]);
    }

    #[test]
    fn test_partition_without_issues() {
        let result = partition(&[], vec![sprint("10", &["1"])]);

        assert!(result.sprints[0].issues.is_empty());
        assert_eq!(result.backlog_issues, BacklogIssues::Empty);
    }

    #[test]
    fn test_partition_issue_without_id_goes_to_backlog() {
        let anonymous = SprintIssue::default();

        let result = partition(&[anonymous], vec![sprint("10", &["1"])]);

        assert_eq!(result.backlog_issues.as_slice().map(|i| i.len()), Some(1));
    }

    #[test]
    fn test_backlog_default_is_not_computed() {
        let backlog = Backlog::default();

        assert_eq!(backlog.backlog_issues, BacklogIssues::NotComputed);
        assert!(backlog.backlog_issues().is_none());
        assert!(backlog.epic_data.is_none());
        assert!(backlog.versions_per_project.is_none());
    }

    #[test]
    fn test_backlog_materialization() {
        let json_data = json!({
            "issues": [
                {"id": 10001, "key": "B-1", "summary": "In sprint"},
                "junk",
                {"id": 10002, "key": "B-2", "summary": "In backlog"}
            ],
            "rankCustomFieldId": 10004,
            "sprints": [
                {"id": 1, "name": "Sprint 1", "state": "ACTIVE", "issuesIds": [10001]}
            ],
            "projects": [{"id": 10100, "key": "B", "name": "Board"}],
            "markers": [{"id": 2, "name": "Marker 1"}],
            "epicData": {
                "epics": [{"id": 10050, "key": "B-50", "epicLabel": "Epic"}],
                "canEditEpics": true
            },
            "canManageSprints": true,
            "maxIssuesExceeded": false,
            "queryResultLimit": 2147483647,
            "versionData": {
                "versionsPerProject": {
                    "10100": [{"id": 10200, "name": "1.0", "sequence": 1, "released": true}, 7],
                    "10101": "not a list"
                }
            }
        });

        let backlog: Backlog = materialize_one(&json_data).unwrap();

        assert_eq!(keys(&backlog.issues), vec!["B-1", "B-2"]);
        assert_eq!(backlog.rank_custom_field_id, 10004);
        assert_eq!(keys(&backlog.sprints[0].issues), vec!["B-1"]);
        assert_eq!(keys(backlog.backlog_issues().unwrap()), vec!["B-2"]);
        assert_eq!(backlog.projects[0].key.as_deref(), Some("B"));
        assert_eq!(backlog.markers[0].to_string(), "Marker 1");
        assert_eq!(backlog.epics().map(|e| e.len()), Some(1));
        assert!(backlog.can_edit_epics());
        assert!(backlog.can_manage_sprints);
        assert_eq!(backlog.query_result_limit, 2147483647);

        let versions = backlog.versions_per_project.as_ref().unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions["10100"].len(), 1);
        assert_eq!(versions["10100"][0].id(), Some("10200"));
        assert!(versions["10100"][0].released);
    }

    #[test]
    fn test_backlog_optional_sections() {
        // epicDataが無効、versionDataの途中が欠落、versionsPerProjectが空
        let absent: Backlog = materialize_one(&json!({"epicData": null, "versionData": {}})).unwrap();
        assert!(absent.epic_data.is_none());
        assert!(absent.versions_per_project.is_none());
        assert_eq!(absent.backlog_issues, BacklogIssues::Empty);

        let empty: Backlog = materialize_one(&json!({"versionData": {"versionsPerProject": {}}})).unwrap();
        assert_eq!(empty.versions_per_project, Some(HashMap::new()));
    }

    #[test]
    fn test_backlog_serializes_backlog_issues_as_list() {
        let backlog: Backlog = materialize_one(&json!({"issues": [{"id": 1, "key": "B-1"}]})).unwrap();

        let json = serde_json::to_value(&backlog).unwrap();

        assert_eq!(json["backlogIssues"][0]["key"], "B-1");
        assert!(serde_json::to_value(Backlog::default()).unwrap()["backlogIssues"].is_null());
    }
}
