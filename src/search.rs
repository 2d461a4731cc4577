//! JQL検索とその全ページ取得

use crate::client::{JiraClient, malformed_payload};
use crate::error::Result;
use crate::models::{Issue, SearchParams, SearchResult};
use crate::node::Node;
use crate::pagination::{Page, PageSource, collect_pages};
use crate::resource::materialize_one;
use async_trait::async_trait;
use serde_json::Value;

/// 検索結果のページ（オブジェクトで数値の`total`を持つこと）
fn search_result(json: &Value) -> Result<SearchResult> {
    let node = Node::new(json);
    if !node.is_object() || !node.get("total").is_number() {
        return Err(malformed_payload());
    }
    materialize_one(json)
}

struct SearchPages<'a> {
    client: &'a JiraClient,
    jql: &'a str,
    params: &'a SearchParams,
}

#[async_trait]
impl PageSource for SearchPages<'_> {
    type Item = Issue;

    async fn fetch_page(&self, start_at: usize) -> Result<Option<Page<Issue>>> {
        let params = self
            .params
            .clone()
            .start_at(u32::try_from(start_at).unwrap_or(u32::MAX));
        let query = params.to_query(self.jql);

        let Some(json) = self.client.get_json(&self.client.api_path("search"), &query).await? else {
            return Ok(None);
        };

        let result = search_result(&json)?;
        Ok(Some(Page::new(result.total, result.issues)))
    }
}

impl JiraClient {
    /// 1ページ分の検索結果を取得
    pub async fn search_issues(&self, jql: &str, params: SearchParams) -> Result<SearchResult> {
        let query = params.to_query(jql);
        let context = format!("Failed to search issues with JQL '{}'", jql);
        let json = self.get_payload(&self.api_path("search"), &query, &context).await?;

        search_result(&json).map_err(|e| e.context(context))
    }

    /// 検索結果のすべてのページを取得
    ///
    /// `params`の`startAt`は無視し、0から取得する。結果がなければ空。
    pub async fn search_all_issues(&self, jql: &str, params: SearchParams) -> Result<Vec<Issue>> {
        let source = SearchPages {
            client: self,
            jql,
            params: &params,
        };

        collect_pages(&source)
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| e.context(format!("Failed to search issues with JQL '{}'", jql)))
    }
}
