/// JQL検索のテスト（HTTPはwiremockでモック）

use jira_client::{Auth, Error, JiraClient, JiraConfig, SearchParams, ValidateQuery};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup_client(base_url: String) -> JiraClient {
    let config = JiraConfig::new(base_url, Auth::Bearer { token: "token".to_string() }).unwrap();
    JiraClient::new(config).unwrap()
}

fn issue(n: u32) -> Value {
    json!({
        "id": (10000 + n).to_string(),
        "key": format!("TEST-{}", n),
        "self": format!("https://example.atlassian.net/rest/api/2/issue/{}", 10000 + n),
        "fields": {
            "summary": format!("Issue {}", n),
            "status": {"id": "1", "name": "Open"},
            "created": "2024-01-01T00:00:00.000+0000"
        }
    })
}

fn search_page(start_at: u32, total: u32, numbers: &[u32]) -> Value {
    json!({
        "startAt": start_at,
        "maxResults": 2,
        "total": total,
        "issues": numbers.iter().map(|n| issue(*n)).collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_search_issues_single_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .and(query_param("jql", "project = TEST"))
        .and(query_param("startAt", "0"))
        .and(query_param("maxResults", "2"))
        .and(query_param("fields", "summary,status"))
        .and(query_param("validateQuery", "strict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(0, 3, &[1, 2])))
        .mount(&mock_server)
        .await;

    let client = setup_client(mock_server.uri());
    let params = SearchParams::new()
        .start_at(0)
        .max_results(2)
        .fields(vec!["summary".to_string(), "status".to_string()])
        .validate_query(ValidateQuery::Strict);

    let result = client.search_issues("project = TEST", params).await.unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.issues.len(), 2);
    assert_eq!(result.issues[0].key.as_deref(), Some("TEST-1"));
    assert_eq!(
        result.issues[1].fields.status.as_ref().map(|s| s.to_string()),
        Some("Open".to_string())
    );
}

#[tokio::test]
async fn test_search_all_issues_walks_pages() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .and(query_param("startAt", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(0, 5, &[1, 2])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .and(query_param("startAt", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(2, 5, &[3, 4])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .and(query_param("startAt", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(4, 5, &[5])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(mock_server.uri());

    let issues = client
        .search_all_issues("project = TEST", SearchParams::new().max_results(2))
        .await
        .unwrap();

    let keys: Vec<_> = issues.iter().filter_map(|i| i.key.as_deref()).collect();
    assert_eq!(keys, vec!["TEST-1", "TEST-2", "TEST-3", "TEST-4", "TEST-5"]);
}

#[tokio::test]
async fn test_search_all_issues_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(0, 0, &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(mock_server.uri());

    let issues = client
        .search_all_issues("project = EMPTY", SearchParams::new())
        .await
        .unwrap();

    assert!(issues.is_empty());
}

#[tokio::test]
async fn test_search_invalid_jql() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("{\"errorMessages\":[\"Error in the JQL Query\"]}"),
        )
        .mount(&mock_server)
        .await;

    let client = setup_client(mock_server.uri());

    let err = client
        .search_issues("project = = TEST", SearchParams::new())
        .await
        .unwrap_err();

    assert!(
        err.to_string()
            .starts_with("Failed to search issues with JQL 'project = = TEST'")
    );
    assert!(matches!(err.root_cause(), Error::ApiError { status: 400, .. }));
}

#[tokio::test]
async fn test_search_all_issues_wrong_shape_is_malformed() {
    // 配列、totalなしのオブジェクト、文字列のtotal
    let payloads = [
        json!([issue(1), issue(2)]),
        json!({"startAt": 0, "issues": [issue(1)]}),
        json!({"startAt": 0, "total": "1", "issues": [issue(1)]}),
    ];

    for payload in payloads {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = setup_client(mock_server.uri());

        match client.search_all_issues("project = TEST", SearchParams::new()).await {
            Err(Error::MalformedPayload(msg)) => {
                assert_eq!(
                    msg,
                    "Failed to search issues with JQL 'project = TEST': JSON payload is malformed"
                );
            }
            other => panic!("Expected MalformedPayload for {}, got {:?}", payload, other),
        }
    }
}

#[tokio::test]
async fn test_search_issues_wrong_shape_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue(1)])))
        .mount(&mock_server)
        .await;

    let client = setup_client(mock_server.uri());

    let err = client
        .search_issues("project = TEST", SearchParams::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MalformedPayload(_)));
}
