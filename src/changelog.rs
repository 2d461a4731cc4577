//! 課題の変更履歴の全件取得と絞り込み

use crate::client::{JiraClient, malformed_payload};
use crate::error::Result;
use crate::models::{IssueHistory, IssueHistoryItem};
use crate::node::Node;
use crate::pagination::{Page, PageSource, collect_pages};
use async_trait::async_trait;
use std::collections::HashSet;

struct ChangelogPages<'a> {
    client: &'a JiraClient,
    issue: &'a str,
}

#[async_trait]
impl PageSource for ChangelogPages<'_> {
    type Item = IssueHistory;

    async fn fetch_page(&self, start_at: usize) -> Result<Option<Page<IssueHistory>>> {
        let path = self
            .client
            .api_path(&format!("issue/{}", urlencoding::encode(self.issue)));
        let query = [
            ("startAt", start_at.to_string()),
            ("expand", "changelog.fields".to_string()),
        ];

        let Some(json) = self.client.get_json(&path, &query).await? else {
            return Ok(None);
        };

        // changelogはオブジェクトで、totalとhistoriesを必ず持つ
        let changelog = Node::new(&json).get("changelog");
        if !changelog.is_object()
            || !changelog.get("total").is_number()
            || !changelog.get("histories").is_array()
        {
            return Err(malformed_payload());
        }

        Ok(Some(Page::new(
            changelog.get("total").as_integer(),
            changelog.get("histories").resources()?,
        )))
    }
}

impl JiraClient {
    /// 課題の変更履歴をすべて取得
    ///
    /// 最初の応答にペイロードがなければ`Ok(None)`。
    /// 途中で失敗した場合は取得済みの履歴を捨ててエラーを返す。
    pub async fn get_issue_changelog(&self, issue: &str) -> Result<Option<Vec<IssueHistory>>> {
        let source = ChangelogPages {
            client: self,
            issue,
        };

        collect_pages(&source)
            .await
            .map_err(|e| e.context(format!("Failed to retrieve changelog for issue {}", issue)))
    }
}

/// 指定したフィールドの変更だけを残した履歴
///
/// `fields`はカンマ区切りのフィールド名（例: `"status,assignee"`）。
/// 該当する変更が残らない履歴は含めない。元の履歴は変更しない。
pub fn filter_changelog(histories: &[IssueHistory], fields: &str) -> Vec<IssueHistory> {
    let wanted: HashSet<&str> = fields
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .collect();

    histories
        .iter()
        .filter_map(|history| {
            let changes: Vec<IssueHistoryItem> = history
                .changes
                .iter()
                .filter(|item| item.field.as_deref().is_some_and(|field| wanted.contains(field)))
                .cloned()
                .collect();

            (!changes.is_empty()).then(|| history.with_changes(changes))
        })
        .collect()
}
