use actix_web::{test, web, web::ServiceConfig, App};
use chrono::{DateTime, Days, Utc};
use pp_common::Secret;
use serde::Serialize;

use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::AuthConfig,
};

pub fn test_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("pawpaw-endpoint-test-secret".to_string()) }
}

pub fn issue_token(user_id: i64, expires_at: DateTime<Utc>) -> String {
    TokenIssuer::new(&test_auth_config()).issue_token(user_id, expires_at).expect("Error issuing test token")
}

/// A token for `user_id` that is valid for the duration of a test.
pub fn valid_token(user_id: i64) -> String {
    issue_token(user_id, Utc::now() + Days::new(1))
}

pub async fn get_request<F>(token: &str, uri: &str, configure: F) -> (u16, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = test::init_service(
        App::new().app_data(web::Data::new(TokenVerifier::new(&test_auth_config()))).configure(configure),
    )
    .await;
    let mut req = test::TestRequest::get().uri(uri);
    if !token.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status().as_u16();
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("Response body was not utf8");
    (status, body)
}

pub async fn post_request<F, B>(token: &str, uri: &str, body: &B, configure: F) -> (u16, String)
where
    F: FnOnce(&mut ServiceConfig),
    B: Serialize,
{
    let app = test::init_service(
        App::new().app_data(web::Data::new(TokenVerifier::new(&test_auth_config()))).configure(configure),
    )
    .await;
    let mut req = test::TestRequest::post().uri(uri).set_json(body);
    if !token.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status().as_u16();
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("Response body was not utf8");
    (status, body)
}

pub async fn delete_request<F>(token: &str, uri: &str, configure: F) -> (u16, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = test::init_service(
        App::new().app_data(web::Data::new(TokenVerifier::new(&test_auth_config()))).configure(configure),
    )
    .await;
    let mut req = test::TestRequest::delete().uri(uri);
    if !token.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status().as_u16();
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("Response body was not utf8");
    (status, body)
}
