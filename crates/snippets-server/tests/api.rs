//! Router-level tests against the in-memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use snippets_core::{CODE_MAX_LENGTH, SnippetFields, SnippetId};
use snippets_server::{AppState, ServerConfig, auth::create_token, routes::build_router};
use snippets_store::{MemoryStore, Repository};
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    text: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("response body should be JSON")
    }
}

fn app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let config = ServerConfig {
        jwt_secret: SECRET.to_string(),
        allow_dev_identity: true,
        ..ServerConfig::default()
    };
    let state = AppState::new(store.clone(), config);
    TestApp {
        router: build_router(state),
        store,
    }
}

impl TestApp {
    async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "testserver");
        if let Some(user) = user {
            builder = builder.header("x-username", user);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            text: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    async fn create(&self, user: &str, body: Value) -> Value {
        let response = self
            .request(Method::POST, "/snippets/", Some(user), Some(body))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.json()
    }
}

// ============================================================================
// Walkthrough
// ============================================================================

#[tokio::test]
async fn test_alice_bob_and_anonymous() {
    let app = app();

    // alice creates a snippet
    let created = app.create("alice", json!({"code": "print(1)"})).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["owner"], "alice");
    assert_eq!(created["language"], "python");
    assert_eq!(created["style"], "friendly");
    assert_eq!(created["linenos"], false);
    assert_eq!(created["title"], "");
    assert_eq!(created["url"], "http://testserver/snippets/1/");
    assert_eq!(created["highlight"], "http://testserver/snippets/1/highlight/");

    // bob may not touch it
    let response = app
        .request(Method::PUT, "/snippets/1/", Some("bob"), Some(json!({"code": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get("/snippets/1/").await.json()["code"], "print(1)");

    // anyone may read
    let list = app.get("/snippets/").await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.json().as_array().unwrap().len(), 1);

    // anonymous writes are refused
    let response = app.request(Method::DELETE, "/snippets/1/", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers[header::WWW_AUTHENTICATE], "Bearer");

    // alice updates only the title
    let response = app
        .request(
            Method::PUT,
            "/snippets/1/",
            Some("alice"),
            Some(json!({"title": "Hello"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["title"], "Hello");
    assert_eq!(updated["code"], "print(1)");

    // alice deletes it
    let response = app.request(Method::DELETE, "/snippets/1/", Some("alice"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.text.is_empty());
    assert_eq!(app.get("/snippets/1/").await.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_anonymous_create_is_unauthorized_and_persists_nothing() {
    let app = app();
    let response = app
        .request(Method::POST, "/snippets/", None, Some(json!({"code": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["code"], "UNAUTHORIZED");
    assert!(app.store.list_snippets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_owner_comes_from_requester_not_body() {
    let app = app();
    let created = app
        .create("alice", json!({"code": "x", "owner": "mallory"}))
        .await;
    assert_eq!(created["owner"], "alice");
}

#[tokio::test]
async fn test_create_sets_location_header() {
    let app = app();
    let response = app
        .request(Method::POST, "/snippets/", Some("alice"), Some(json!({"code": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.headers[header::LOCATION],
        "http://testserver/snippets/1/"
    );
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = app();
    let response = app
        .request(
            Method::POST,
            "/snippets/",
            Some("alice"),
            Some(json!({"title": "t".repeat(101), "language": "cobol"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields = &body["error"]["fields"];
    assert_eq!(fields["code"][0], "This field is required.");
    assert_eq!(fields["language"][0], "\"cobol\" is not a valid choice.");
    assert_eq!(
        fields["title"][0],
        "Ensure this field has no more than 100 characters."
    );
    assert!(app.store.list_snippets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_code_is_rejected() {
    let app = app();
    let code = "x".repeat(CODE_MAX_LENGTH + 1);
    let response = app
        .request(Method::POST, "/snippets/", Some("alice"), Some(json!({"code": code})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"]["fields"]["code"].is_array());
    assert!(app.store.list_snippets().await.unwrap().is_empty());

    app.create("alice", json!({"code": "small"})).await;
    let response = app
        .request(Method::PATCH, "/snippets/1/", Some("alice"), Some(json!({"code": code})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let stored = app.store.get_snippet(SnippetId(1)).await.unwrap();
    assert_eq!(stored.fields.code, "small");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/snippets/")
        .header("x-username", "alice")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let app = app();
    let response = app
        .request(Method::POST, "/snippets/", Some("alice"), Some(json!(["code"])))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["error"]["fields"]["non_field_errors"][0],
        "Invalid data. Expected a dictionary, but got array."
    );
}

// ============================================================================
// Update / delete
// ============================================================================

#[tokio::test]
async fn test_identical_put_is_idempotent() {
    let app = app();
    app.create("alice", json!({"code": "a = 1"})).await;

    let body = json!({"code": "b = 2", "language": "rust", "linenos": true});
    let first = app
        .request(Method::PUT, "/snippets/1/", Some("alice"), Some(body.clone()))
        .await;
    let after_first = app.store.get_snippet(SnippetId(1)).await.unwrap();
    let second = app
        .request(Method::PUT, "/snippets/1/", Some("alice"), Some(body))
        .await;
    let after_second = app.store.get_snippet(SnippetId(1)).await.unwrap();

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), second.json());
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn test_update_rerenders_highlight() {
    let app = app();
    app.create("alice", json!({"code": "old_name = 1"})).await;
    let before = app.get("/snippets/1/highlight/").await.text;

    app.request(
        Method::PATCH,
        "/snippets/1/",
        Some("alice"),
        Some(json!({"code": "new_name = 2", "linenos": true})),
    )
    .await;

    let after = app.get("/snippets/1/highlight/").await.text;
    assert_ne!(before, after);
    assert!(after.contains("new_name"));
    assert!(!before.contains("<td class=\"linenos\">"));
    assert!(after.contains("<td class=\"linenos\">"));
}

#[tokio::test]
async fn test_empty_patch_changes_nothing() {
    let app = app();
    app.create("alice", json!({"code": "x", "title": "keep"})).await;
    let before = app.store.get_snippet(SnippetId(1)).await.unwrap();

    let response = app.request(Method::PATCH, "/snippets/1/", Some("alice"), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.store.get_snippet(SnippetId(1)).await.unwrap();
    assert_eq!(before.fields, after.fields);
}

#[tokio::test]
async fn test_invalid_update_leaves_record_unchanged() {
    let app = app();
    app.create("alice", json!({"code": "x"})).await;

    let response = app
        .request(
            Method::PUT,
            "/snippets/1/",
            Some("alice"),
            Some(json!({"code": "", "title": "new"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let stored = app.store.get_snippet(SnippetId(1)).await.unwrap();
    assert_eq!(stored.fields.code, "x");
    assert_eq!(stored.fields.title, "");
}

#[tokio::test]
async fn test_non_owner_delete_is_forbidden() {
    let app = app();
    app.create("alice", json!({"code": "x"})).await;

    let response = app.request(Method::DELETE, "/snippets/1/", Some("bob"), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["error"]["code"], "FORBIDDEN");
    assert!(app.store.get_snippet(SnippetId(1)).await.is_ok());
}

#[tokio::test]
async fn test_missing_snippet_is_not_found() {
    let app = app();
    for uri in ["/snippets/99/", "/snippets/abc/", "/snippets/99/highlight/"] {
        assert_eq!(app.get(uri).await.status, StatusCode::NOT_FOUND, "{uri}");
    }
    let response = app
        .request(Method::PUT, "/snippets/99/", Some("alice"), Some(json!({"code": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app.request(Method::DELETE, "/snippets/99/", Some("alice"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ownerless_snippet_is_read_only() {
    let app = app();
    let fields = SnippetFields {
        code: "legacy".to_string(),
        ..SnippetFields::default()
    };
    let legacy = app.store.insert_snippet(&fields, "<html/>", None).await.unwrap();
    let uri = format!("/snippets/{}/", legacy.id);

    let response = app.get(&uri).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json()["owner"].is_null());

    let response = app
        .request(Method::PUT, &uri, Some("alice"), Some(json!({"code": "mine"})))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

// ============================================================================
// Highlight, users, root
// ============================================================================

#[tokio::test]
async fn test_highlight_is_html() {
    let app = app();
    app.create(
        "alice",
        json!({"code": "fn main() {}", "language": "rust", "title": "Main"}),
    )
    .await;

    let response = app.get("/snippets/1/highlight/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(response.text.contains("<title>Main</title>"));
    assert!(response.text.contains("main"));
}

#[tokio::test]
async fn test_users_list_owned_snippets() {
    let app = app();
    app.create("alice", json!({"code": "1"})).await;
    app.create("bob", json!({"code": "2"})).await;
    app.create("alice", json!({"code": "3"})).await;

    let users = app.get("/users/").await.json();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);

    let alice = &users[0];
    assert_eq!(alice["username"], "alice");
    assert_eq!(alice["url"], "http://testserver/users/1/");
    assert_eq!(
        alice["snippets"],
        json!([
            "http://testserver/snippets/1/",
            "http://testserver/snippets/3/"
        ])
    );

    let bob = app.get("/users/2/").await.json();
    assert_eq!(bob["snippets"], json!(["http://testserver/snippets/2/"]));
    assert_eq!(app.get("/users/42/").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_root_links() {
    let app = app();
    let body = app.get("/").await.json();
    assert_eq!(body["snippets"], "http://testserver/snippets/");
    assert_eq!(body["users"], "http://testserver/users/");
}

#[tokio::test]
async fn test_browsable_format() {
    let app = app();
    let response = app.get("/snippets/?format=api").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("<h1>Snippet List</h1>"));

    let request = Request::builder()
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert!(response.text.contains("Api Root"));

    let response = app.get("/?format=json").await;
    assert!(response.json().is_object());
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_bearer_token_identity() {
    let app = app();
    let token = create_token("carol", SECRET, 1).unwrap();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/snippets/")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"code": "x"}).to_string()))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["owner"], "carol");
}

#[tokio::test]
async fn test_bad_token_is_not_treated_as_anonymous() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/snippets/")
        .header(header::AUTHORIZATION, "Bearer not-a-token")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"code": "x"}).to_string()))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(
        response.json()["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Invalid token")
    );
    assert!(app.store.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_overlong_username_is_rejected() {
    let app = app();
    let name = "u".repeat(151);
    let response = app
        .request(Method::POST, "/snippets/", Some(name.as_str()), Some(json!({"code": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.list_users().await.unwrap().is_empty());
    assert!(app.store.list_snippets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_links_follow_forwarded_proto() {
    let app = app();
    let request = Request::builder()
        .uri("/")
        .header(header::HOST, "api.example")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let body = app.send(request).await.json();
    assert_eq!(body["snippets"], "https://api.example/snippets/");
    assert_eq!(body["users"], "https://api.example/users/");
}

// ============================================================================
// Method coverage
// ============================================================================

#[tokio::test]
async fn test_head_and_options_are_open_to_anonymous() {
    let app = app();
    app.create("alice", json!({"code": "x"})).await;

    let response = app.request(Method::HEAD, "/snippets/1/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.is_empty());

    let response = app.request(Method::OPTIONS, "/snippets/1/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let allow = response.headers[header::ALLOW].to_str().unwrap();
    for method in ["GET", "PUT", "PATCH", "DELETE", "OPTIONS"] {
        assert!(allow.contains(method), "{method} missing from {allow}");
    }
    assert_eq!(response.json()["name"], "Snippet Instance");
    assert!(app.store.get_snippet(SnippetId(1)).await.is_ok());
}

#[tokio::test]
async fn test_every_route_answers_options() {
    let app = app();
    app.create("alice", json!({"code": "x"})).await;
    for uri in ["/", "/snippets/", "/snippets/1/highlight/", "/users/", "/users/1/"] {
        let response = app.request(Method::OPTIONS, uri, None, None).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert!(response.headers.contains_key(header::ALLOW), "{uri}");
    }

    let response = app.request(Method::OPTIONS, "/users/", None, None).await;
    assert!(!response.headers[header::ALLOW].to_str().unwrap().contains("POST"));
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}
