//! Client behavior against a mock Zammad server.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zammad_cli::config::Config;
use zammad_cli::error::{ApiErrorKind, ZammadError};
use zammad_cli::models::{CreateArticle, UpdateTicket};
use zammad_cli::pagination::fetch_all_tickets;
use zammad_cli::zammad_client::{RequestOptions, ZammadClient};

const TOKEN: &str = "test-token-abc123";
const AUTH: &str = "Token token=test-token-abc123";

fn client_for(server: &MockServer) -> ZammadClient {
    ZammadClient::new(&Config::new(server.uri(), TOKEN)).expect("client")
}

fn ticket_json(id: u64) -> Value {
    json!({
        "id": id,
        "number": format!("{}", 10000 + id),
        "title": format!("Ticket {}", id),
        "state_id": 2,
        "priority_id": 2,
        "customer_id": 3,
        "state": "open",
        "priority": "2 normal",
        "customer": "jane@example.com",
        "created_at": "2025-01-01T00:00:00.000Z",
        "updated_at": "2025-01-02T12:00:00.000Z"
    })
}

fn article_json(id: u64, ticket_id: u64) -> Value {
    json!({
        "id": id,
        "ticket_id": ticket_id,
        "from": "Agent Smith",
        "content_type": "text/html",
        "body": "<p>Hello</p>",
        "internal": false,
        "type": "note",
        "sender": "Agent",
        "created_at": "2025-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_list_tickets_sends_paging_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "25"))
        .and(query_param("expand", "true"))
        .and(header("Authorization", AUTH))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ticket_json(1), ticket_json(2)])))
        .expect(1)
        .mount(&server)
        .await;

    let tickets = client_for(&server).list_tickets(2, 25).await.unwrap();

    let ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(tickets[0].display_state(), "open");
}

#[tokio::test]
async fn test_trailing_slashes_are_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "login": "agent", "firstname": "Ada", "lastname": "Agent",
            "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        ZammadClient::new(&Config::new(format!("{}///", server.uri()), TOKEN)).unwrap();
    let user = client.current_user().await.unwrap();

    assert_eq!(user.display_name(), "Ada Agent");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/api/v1/users/me");
}

#[tokio::test]
async fn test_get_ticket_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets/9"))
        .and(query_param("expand", "true"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Couldn't find Ticket with 'id'=9"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_ticket(9).await.unwrap_err();

    match &err {
        ZammadError::Api { status, detail, path } => {
            assert_eq!(*status, 404);
            assert_eq!(detail, "Couldn't find Ticket with 'id'=9");
            assert_eq!(path, "/api/v1/tickets/9?expand=true");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert_eq!(err.api_kind(), Some(ApiErrorKind::NotFound));
}

#[tokio::test]
async fn test_unauthorized_plain_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).current_user().await.unwrap_err();

    match err {
        ZammadError::Api { status, detail, .. } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Unauthorized");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_message_field_and_token_redaction() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ticket_states"))
        .and(header("Authorization", AUTH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": format!("token {} is broken", TOKEN)
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).ticket_states().await.unwrap_err();

    match err {
        ZammadError::Api { status, detail, .. } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "token [REDACTED] is broken");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_ticket(1).await.unwrap_err();
    assert!(matches!(err, ZammadError::Serialization(_)));
}

#[tokio::test]
async fn test_search_encodes_query_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets/search"))
        .and(query_param("query", "login issue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ticket_json(5)])))
        .expect(1)
        .mount(&server)
        .await;

    let tickets = client_for(&server)
        .search_tickets("login issue", 1, 10)
        .await
        .unwrap();

    assert_eq!(tickets.len(), 1);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("query=login+issue&page=1&per_page=10&expand=true")
    );
}

#[tokio::test]
async fn test_close_ticket_sends_only_state() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/tickets/7"))
        .and(header("Authorization", AUTH))
        .and(body_json(json!({"state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json(7)))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = client_for(&server).close_ticket(7).await.unwrap();
    assert_eq!(ticket.id, 7);
}

#[tokio::test]
async fn test_update_ticket_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/tickets/8"))
        .and(header("Authorization", AUTH))
        .and(body_json(json!({"title": "Renamed", "priority": "3 high"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json(8)))
        .expect(1)
        .mount(&server)
        .await;

    let update = UpdateTicket::new()
        .with_title("Renamed")
        .with_priority("3 high");
    client_for(&server).update_ticket(8, &update).await.unwrap();
}

#[tokio::test]
async fn test_create_article_applies_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ticket_articles"))
        .and(header("Authorization", AUTH))
        .and(body_json(json!({
            "ticket_id": 1,
            "body": "Reply text",
            "content_type": "text/html",
            "type": "note",
            "internal": false,
            "sender": "Agent"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(article_json(100, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let article = client_for(&server)
        .create_article(CreateArticle::new(1, "Reply text"))
        .await
        .unwrap();
    assert_eq!(article.id, 100);
}

#[tokio::test]
async fn test_create_article_email_overrides() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ticket_articles"))
        .and(header("Authorization", AUTH))
        .and(body_json(json!({
            "ticket_id": 1,
            "body": "Hi",
            "content_type": "text/html",
            "type": "email",
            "internal": false,
            "sender": "Agent",
            "to": "jane@example.com",
            "subject": "Re: VPN"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(article_json(101, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let params = CreateArticle::new(1, "Hi")
        .with_type("email")
        .with_to("jane@example.com")
        .with_subject("Re: VPN");
    client_for(&server).create_article(params).await.unwrap();
}

#[tokio::test]
async fn test_list_articles_and_states() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ticket_articles/by_ticket/7"))
        .and(header("Authorization", AUTH))
        .and(query_param("expand", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([article_json(1, 7), article_json(2, 7)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ticket_states"))
        .and(header("Authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "new", "default_create": true, "active": true},
            {"id": 4, "name": "closed", "active": true}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let articles = client.list_articles(7).await.unwrap();
    let states = client.ticket_states().await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].ticket_id, 7);
    let names: Vec<&str> = states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["new", "closed"]);
}

#[tokio::test]
async fn test_request_extra_header_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("Authorization", "Bearer other"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let user: Value = client_for(&server)
        .request(
            "/api/v1/users/me",
            RequestOptions::get().with_header("Authorization", "Bearer other"),
        )
        .await
        .unwrap();
    assert_eq!(user["id"], 1);
}

#[tokio::test]
async fn test_fetch_all_tickets_walks_pages() {
    let server = MockServer::start().await;
    for (page, ids) in [(1, vec![1, 2]), (2, vec![3, 4]), (3, vec![5])] {
        let body: Vec<Value> = ids.into_iter().map(ticket_json).collect();
        Mock::given(method("GET"))
            .and(path("/api/v1/tickets"))
            .and(query_param("page", page.to_string()))
            .and(query_param("per_page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let tickets = fetch_all_tickets(&client_for(&server), 2, 20).await.unwrap();

    let ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_fetch_all_tickets_stops_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([ticket_json(1), ticket_json(2)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch_all_tickets(&client_for(&server), 2, 5).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}
