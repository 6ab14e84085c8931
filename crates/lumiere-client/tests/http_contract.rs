use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
};
use serde_json::{Value, json};

use lumiere_api::catalog::{Brand, Tag};
use lumiere_api::{EntityId, ListResponse, ResourceKind};
use lumiere_client::{ClientError, HttpClient, ListQuery, RequestBody, RequestOptions, Session};

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route(
            "/api/brand",
            get(|headers: HeaderMap| async move {
                Json(json!([
                    {"id": 1, "name": "Acme", "description": header(&headers, "authorization")}
                ]))
            }),
        )
        .route(
            "/api/voucher",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Database unavailable"})),
                )
            }),
        )
        .route("/api/category", get(|| async { StatusCode::NOT_FOUND }))
        .route(
            "/api/product",
            get(|| async {
                Json(json!({
                    "items": [{"id": "p-1", "name": "Toner", "price": 250000}],
                    "totalPages": 4,
                    "totalItems": 61
                }))
            }),
        )
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({"token": "tok-1"})))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"message": "Wrong email or password"})),
                    )
                }
            }),
        )
        .route(
            "/api/tag/soft-deletion/{id}",
            delete(|Path(id): Path<i64>| async move {
                if id == 5 {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::NOT_FOUND
                }
            }),
        )
        .route(
            "/api/echo",
            get(|headers: HeaderMap| async move {
                Json(json!({
                    "accept": header(&headers, "accept"),
                    "requestId": header(&headers, "x-request-id"),
                }))
            }),
        )
        .route(
            "/api/product/{id}/image",
            post(|headers: HeaderMap| async move {
                Json(json!({"contentType": header(&headers, "content-type")}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, session: Session) -> HttpClient {
    HttpClient::new(format!("http://{addr}"), session).unwrap()
}

#[tokio::test]
async fn test_bearer_token_attached_from_session() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::with_token("tok-xyz"));

    let brands = client.resource::<Brand>().list().send().await.unwrap();
    let ListResponse::Plain(brands) = brands else {
        panic!("expected a bare array");
    };
    assert_eq!(brands[0].description, "Bearer tok-xyz");
}

#[tokio::test]
async fn test_no_authorization_without_token() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let ListResponse::Plain(brands) = client.resource::<Brand>().list().send().await.unwrap()
    else {
        panic!("expected a bare array");
    };
    assert_eq!(brands[0].description, "");
}

#[tokio::test]
async fn test_login_sets_session_and_logout_clears_it() {
    let addr = spawn_backend().await;
    let session = Session::new();
    let client = client(addr, session.clone());

    let token = client.login("staff@lumiere.vn", "secret").await.unwrap();
    assert_eq!(token, "tok-1");
    assert_eq!(session.token().as_deref(), Some("tok-1"));

    client.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_rejected_login_carries_server_message() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let err = client.login("staff@lumiere.vn", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message(), "Wrong email or password");
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let err = client
        .list_kind(ResourceKind::Voucher, &ListQuery::default())
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Database unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_message_falls_back_to_generic() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let err = client
        .list_kind(ResourceKind::Category, &ListQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Request failed with status 404");
}

#[tokio::test]
async fn test_server_paged_response() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let query = ListQuery {
        page: Some(2),
        page_size: Some(20),
        ..ListQuery::default()
    };
    let ListResponse::Paged(page) = client.list_kind(ResourceKind::Product, &query).await.unwrap()
    else {
        panic!("expected a page");
    };
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.total_items, 61);
    assert_eq!(page.items[0]["name"], "Toner");
}

#[tokio::test]
async fn test_soft_deletion_path() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    client.resource::<Tag>().delete(&EntityId::Number(5)).await.unwrap();
    let err = client
        .resource::<Tag>()
        .delete(&EntityId::Number(6))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_orders_cannot_be_deleted() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let err = client
        .delete_kind(ResourceKind::Order, &EntityId::Number(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unsupported(_)));
}

#[tokio::test]
async fn test_image_upload_is_multipart() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toner.png");
    tokio::fs::write(&path, b"\x89PNG fake").await.unwrap();

    let response = client
        .upload_kind_image(ResourceKind::Product, &EntityId::Number(3), &path)
        .await
        .unwrap();

    assert!(
        response["contentType"]
            .as_str()
            .unwrap()
            .starts_with("multipart/form-data")
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(addr, Session::new());
    let err = client
        .list_kind(ResourceKind::Brand, &ListQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.user_message(), lumiere_client::error::TRANSPORT_MESSAGE);
}

#[tokio::test]
async fn test_request_headers_override_defaults() {
    let addr = spawn_backend().await;
    let client = client(addr, Session::new());

    let defaults = client
        .request(reqwest::Method::GET, "/api/echo", RequestBody::Empty, RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(defaults["accept"], "application/json");

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(reqwest::header::ACCEPT, "text/plain".parse().unwrap());
    headers.insert("x-request-id", "req-42".parse().unwrap());
    let echoed = client
        .request(
            reqwest::Method::GET,
            "/api/echo",
            RequestBody::Empty,
            RequestOptions { headers },
        )
        .await
        .unwrap();
    assert_eq!(echoed["accept"], "text/plain");
    assert_eq!(echoed["requestId"], "req-42");
}
