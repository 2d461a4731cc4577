use super::Issue;
use crate::error::Result;
use crate::node::Node;
use crate::resource::Materialize;
use serde::Serialize;

/// JQL検証モード（`validateQuery`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateQuery {
    /// エラーがあれば400を返す
    Strict,
    /// エラーを警告として返す
    Warn,
    /// 検証しない
    None,
}

impl ValidateQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidateQuery::Strict => "strict",
            ValidateQuery::Warn => "warn",
            ValidateQuery::None => "none",
        }
    }
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct SearchParams {
    #[serde(rename = "startAt")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u32>,

    #[serde(rename = "maxResults")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,

    #[serde(rename = "validateQuery")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_query: Option<ValidateQuery>,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct SearchResult {
    #[serde(rename = "startAt")]
    pub start_at: i64,

    #[serde(rename = "maxResults")]
    pub max_results: i64,

    pub total: i64,

    pub issues: Vec<Issue>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_at(mut self, start_at: u32) -> Self {
        self.start_at = Some(start_at);
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn expand(mut self, expand: Vec<String>) -> Self {
        self.expand = Some(expand);
        self
    }

    pub fn validate_query(mut self, validate: ValidateQuery) -> Self {
        self.validate_query = Some(validate);
        self
    }

    /// `jql`と組み合わせたGETクエリパラメータ
    pub fn to_query(&self, jql: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![("jql", jql.to_string())];

        if let Some(start_at) = self.start_at {
            query.push(("startAt", start_at.to_string()));
        }
        if let Some(max_results) = self.max_results {
            query.push(("maxResults", max_results.to_string()));
        }
        if let Some(fields) = &self.fields {
            query.push(("fields", fields.join(",")));
        }
        if let Some(expand) = &self.expand {
            query.push(("expand", expand.join(",")));
        }
        if let Some(validate) = self.validate_query {
            query.push(("validateQuery", validate.as_str().to_string()));
        }

        query
    }
}

impl Materialize for SearchResult {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            start_at: node.get("startAt").as_integer(),
            max_results: node.get("maxResults").as_integer(),
            total: node.get("total").as_integer(),
            issues: node.get("issues").resources()?,
        })
    }
}
