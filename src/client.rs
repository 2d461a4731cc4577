use crate::error::{Error, Result};
use crate::models::{
    Filter, Issue, IssueType, JiraField, LinkType, Priority, Project, RemoteLink, Resolution, Status,
    StatusCategory, Votes,
};
use crate::node::Node;
use crate::resource::{Materialize, materialize_many, materialize_one};
use crate::transport::Transport;
use async_trait::async_trait;
use base64::Engine;
use log::debug;
use reqwest::{Client, header};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// REST APIのデフォルトリビジョン（`/rest/api/2/`）
pub const DEFAULT_API_REVISION: &str = "2";

#[derive(Debug, Clone)]
pub enum Auth {
    Basic { username: String, api_token: String },
    Bearer { token: String },
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub auth: Auth,
    pub api_revision: String,
}

impl JiraConfig {
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Result<Self> {
        let base_url = base_url.into();

        // Validate URL
        let _ = Url::parse(&base_url)
            .map_err(|_| Error::InvalidConfiguration("Invalid base URL".to_string()))?;

        Ok(Self {
            base_url,
            auth,
            api_revision: DEFAULT_API_REVISION.to_string(),
        })
    }

    pub fn with_api_revision(mut self, revision: impl Into<String>) -> Self {
        self.api_revision = revision.into();
        self
    }

    /// 環境変数（`.env`があればそれも）から設定を読み込む
    pub fn from_env() -> Result<Self> {
        use std::env;

        dotenv::dotenv().ok();

        let base_url = env::var("JIRA_URL")
            .map_err(|_| Error::ConfigurationMissing("JIRA_URL not found in environment".to_string()))?;

        let username = env::var("JIRA_USER")
            .map_err(|_| Error::ConfigurationMissing("JIRA_USER not found in environment".to_string()))?;

        let api_token = env::var("JIRA_API_TOKEN")
            .map_err(|_| Error::ConfigurationMissing("JIRA_API_TOKEN not found in environment".to_string()))?;

        let auth = Auth::Basic { username, api_token };
        let config = Self::new(base_url, auth)?;

        match env::var("JIRA_API_REVISION") {
            Ok(revision) if !revision.trim().is_empty() => Ok(config.with_api_revision(revision.trim())),
            _ => Ok(config),
        }
    }
}

/// reqwestによるHTTPトランスポート
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        // 認証ヘッダーを追加
        match &config.auth {
            Auth::Basic { username, api_token } => {
                let auth_value = format!("{}:{}", username, api_token);
                let encoded = base64::engine::general_purpose::STANDARD.encode(auth_value.as_bytes());
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Basic {}", encoded))
                        .map_err(|_| Error::InvalidConfiguration("Invalid auth header".to_string()))?,
                );
            }
            Auth::Bearer { token } => {
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Bearer {}", token))
                        .map_err(|_| Error::InvalidConfiguration("Invalid auth header".to_string()))?,
                );
            }
            Auth::Anonymous => {}
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Option<String>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}

#[derive(Clone)]
pub struct JiraClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) config: Arc<JiraConfig>,
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// 任意のトランスポートでクライアントを作成
    pub fn with_transport(config: JiraConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// `/rest/api/<revision>/<resource>`
    pub fn api_path(&self, resource: &str) -> String {
        format!("/rest/api/{}/{}", self.config.api_revision, resource)
    }

    /// GETしてJSONツリーにする（ボディなしやJSONのnullは`None`）
    pub(crate) async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Option<Value>> {
        let Some(body) = self.transport.get(path, query).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(&body)? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    /// ペイロードが必須のGET。失敗はすべて`context`付きで返す
    pub(crate) async fn get_payload(&self, path: &str, query: &[(&str, String)], context: &str) -> Result<Value> {
        match self.get_json(path, query).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(malformed(context)),
            Err(e) => Err(e.context(context)),
        }
    }

    pub(crate) async fn fetch_object<T: Materialize>(&self, path: &str, query: &[(&str, String)], context: &str) -> Result<T> {
        let json = self.get_payload(path, query, context).await?;
        if !json.is_object() {
            return Err(malformed(context));
        }
        materialize_one(&json).map_err(|e| e.context(context))
    }

    pub(crate) async fn fetch_array<T: Materialize>(&self, path: &str, query: &[(&str, String)], context: &str) -> Result<Vec<T>> {
        let json = self.get_payload(path, query, context).await?;
        if !json.is_array() {
            return Err(malformed(context));
        }
        materialize_many(&json).map_err(|e| e.context(context))
    }

    /// 任意のパスから単一リソースを取得
    pub async fn get_resource<T: Materialize>(&self, path: &str) -> Result<T> {
        self.fetch_object(path, &[], &format!("Failed to retrieve {}", path)).await
    }

    /// 任意のパスからリソース配列を取得
    pub async fn get_resources<T: Materialize>(&self, path: &str) -> Result<Vec<T>> {
        self.fetch_array(path, &[], &format!("Failed to retrieve {}", path)).await
    }

    pub async fn get_project(&self, key: &str) -> Result<Project> {
        let path = self.api_path(&format!("project/{}", urlencoding::encode(key)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve project {}", key)).await
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        self.fetch_array(&self.api_path("project"), &[], "Failed to retrieve projects").await
    }

    /// 課題タイプ名ごとの利用可能なステータス名
    pub async fn get_project_statuses(&self, key: &str) -> Result<HashMap<String, Vec<String>>> {
        let path = self.api_path(&format!("project/{}/statuses", urlencoding::encode(key)));
        let issue_types: Vec<IssueType> = self
            .fetch_array(&path, &[], &format!("Failed to retrieve statuses for project {}", key))
            .await?;

        Ok(issue_types
            .into_iter()
            .filter_map(|issue_type| {
                let name = issue_type.name?;
                let statuses = issue_type
                    .statuses
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|status| status.name)
                    .collect();
                Some((name, statuses))
            })
            .collect())
    }

    pub async fn get_issue_link_types(&self) -> Result<Vec<LinkType>> {
        let context = "Failed to retrieve issue link types";
        let json = self.get_payload(&self.api_path("issueLinkType"), &[], context).await?;
        if !json.is_object() {
            return Err(malformed(context));
        }
        Node::new(&json)
            .get("issueLinkTypes")
            .resources()
            .map_err(|e| e.context(context))
    }

    pub async fn get_link_type(&self, id: &str) -> Result<LinkType> {
        let path = self.api_path(&format!("issueLinkType/{}", urlencoding::encode(id)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve issue link type {}", id)).await
    }

    pub async fn get_issue_type(&self, id: &str) -> Result<IssueType> {
        let path = self.api_path(&format!("issuetype/{}", urlencoding::encode(id)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve issue type {}", id)).await
    }

    pub async fn get_issue_types(&self) -> Result<Vec<IssueType>> {
        self.fetch_array(&self.api_path("issuetype"), &[], "Failed to retrieve issue types").await
    }

    pub async fn get_status(&self, id: &str) -> Result<Status> {
        let path = self.api_path(&format!("status/{}", urlencoding::encode(id)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve status {}", id)).await
    }

    pub async fn get_statuses(&self) -> Result<Vec<Status>> {
        self.fetch_array(&self.api_path("status"), &[], "Failed to retrieve statuses").await
    }

    pub async fn get_status_category(&self, id: &str) -> Result<StatusCategory> {
        let path = self.api_path(&format!("statuscategory/{}", urlencoding::encode(id)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve status category {}", id)).await
    }

    pub async fn get_resolution(&self, id: &str) -> Result<Resolution> {
        let path = self.api_path(&format!("resolution/{}", urlencoding::encode(id)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve resolution {}", id)).await
    }

    pub async fn get_resolutions(&self) -> Result<Vec<Resolution>> {
        self.fetch_array(&self.api_path("resolution"), &[], "Failed to retrieve resolutions").await
    }

    pub async fn get_priorities(&self) -> Result<Vec<Priority>> {
        self.fetch_array(&self.api_path("priority"), &[], "Failed to retrieve priorities").await
    }

    pub async fn get_filter(&self, id: &str) -> Result<Filter> {
        let path = self.api_path(&format!("filter/{}", urlencoding::encode(id)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve filter {}", id)).await
    }

    pub async fn get_votes(&self, issue: &str) -> Result<Votes> {
        let path = self.api_path(&format!("issue/{}/votes", urlencoding::encode(issue)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve votes for issue {}", issue)).await
    }

    pub async fn get_fields(&self) -> Result<Vec<JiraField>> {
        self.fetch_array(&self.api_path("field"), &[], "Failed to retrieve fields").await
    }

    pub async fn get_remote_links(&self, issue: &str) -> Result<Vec<RemoteLink>> {
        let path = self.api_path(&format!("issue/{}/remotelink", urlencoding::encode(issue)));
        self.fetch_array(&path, &[], &format!("Failed to retrieve remote links for issue {}", issue)).await
    }

    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        let path = self.api_path(&format!("issue/{}", urlencoding::encode(key)));
        self.fetch_object(&path, &[], &format!("Failed to retrieve issue {}", key)).await
    }
}

/// 期待した形でないペイロード（コンテキストは呼び出し側で付ける）
pub(crate) fn malformed_payload() -> Error {
    Error::MalformedPayload("JSON payload is malformed".to_string())
}

fn malformed(context: &str) -> Error {
    malformed_payload().context(context)
}
