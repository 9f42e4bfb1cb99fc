//! HTTP tests for the operations endpoint wired the way the server wires it.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use contacts_backend::Trace;
use contacts_backend::domain::TRACE_ID_HEADER;
use contacts_backend::inbound::http::error::json_error_handler;
use contacts_backend::inbound::http::health::{HealthState, live, ready};
use contacts_backend::inbound::http::operations::execute_operation;
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::outbound::credentials::{CredentialSettings, JwtCredentialCodec};
use contacts_backend::outbound::memory::{InMemoryPersonRepository, InMemoryUserRepository};
use mockable::DefaultClock;
use serde_json::{Value, json};

fn http_state() -> HttpState {
    let settings = CredentialSettings::new(vec![b'h'; 32], Duration::from_secs(600));
    HttpState::from_adapters(
        Arc::new(InMemoryPersonRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(JwtCredentialCodec::new(&settings, Arc::new(DefaultClock))),
    )
}

macro_rules! server_app {
    ($health:expr) => {
        test::init_service(
            App::new()
                .app_data($health)
                .app_data(web::Data::new(http_state()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .wrap(Trace)
                .service(web::scope("/api/v1").service(execute_operation))
                .service(ready)
                .service(live),
        )
        .await
    };
}

fn operation_request(body: Value, authorization: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::post()
        .uri("/api/v1/operations")
        .set_json(&body);
    if let Some(value) = authorization {
        req = req.insert_header((AUTHORIZATION, value.to_owned()));
    }
    req.to_request()
}

#[actix_web::test]
async fn credential_round_trip_with_lowercase_scheme() {
    let app = server_app!(web::Data::new(HealthState::new()));

    let created = test::call_service(
        &app,
        operation_request(
            json!({ "operation": "createUser", "arguments": { "username": "alice" } }),
            None,
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);

    let login: Value = test::call_and_read_body_json(
        &app,
        operation_request(
            json!({
                "operation": "login",
                "arguments": { "username": "alice", "password": "secret" }
            }),
            None,
        ),
    )
    .await;
    let token = login["data"]["value"].as_str().expect("token");

    let me: Value = test::call_and_read_body_json(
        &app,
        operation_request(
            json!({ "operation": "me" }),
            Some(&format!("bearer {token}")),
        ),
    )
    .await;
    assert_eq!(me["data"]["username"], "alice");
    assert_eq!(me["data"]["friends"], json!([]));
}

#[actix_web::test]
async fn unauthorized_response_carries_trace_id() {
    let app = server_app!(web::Data::new(HealthState::new()));

    let res = test::call_service(
        &app,
        operation_request(json!({ "operation": "allUsers" }), None),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
        .expect("trace id header");

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], Value::from(header));
}

#[actix_web::test]
async fn malformed_json_is_invalid_request() {
    let app = server_app!(web::Data::new(HealthState::new()));

    let req = test::TestRequest::post()
        .uri("/api/v1/operations")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn readiness_follows_health_state() {
    let health = web::Data::new(HealthState::new());
    let app = server_app!(health.clone());

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    health.mark_ready();
    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}
