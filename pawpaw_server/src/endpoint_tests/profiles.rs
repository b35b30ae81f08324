use actix_web::{web, web::ServiceConfig};
use chrono::{Days, Utc};
use pawpaw_engine::{db_types::PetProfile, traits::ProfileApiError, ProfileApi};

use super::{
    helpers::{delete_request, get_request, issue_token, post_request, valid_token},
    mocks::MockProfileManager,
};
use crate::{
    data_objects::NewProfileRequest,
    routes::{CreateProfileRoute, DeleteProfileRoute, GetProfileRoute},
};

fn bella(owner_id: i64) -> PetProfile {
    PetProfile {
        id: 7,
        owner_id,
        name: "bella".to_string(),
        species: "dog".to_string(),
        bio: Some("Loves tennis balls".to_string()),
        photo_url: Some("https://pics.pawpaw.app/bella.jpg".to_string()),
        likes_count: 3,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn configure(cfg: &mut ServiceConfig, mock: MockProfileManager) {
    let api = ProfileApi::new(mock);
    cfg.service(GetProfileRoute::<MockProfileManager>::new())
        .service(CreateProfileRoute::<MockProfileManager>::new())
        .service(DeleteProfileRoute::<MockProfileManager>::new())
        .app_data(web::Data::new(api));
}

#[actix_web::test]
async fn fetching_a_profile_requires_a_session() {
    let (status, body) = get_request("", "/profile/7", |cfg| configure(cfg, MockProfileManager::new())).await;
    assert_eq!(status, 401);
    assert!(body.contains("No bearer token"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn expired_tokens_are_rejected() {
    let token = issue_token(1, Utc::now() - Days::new(2));
    let (status, body) = get_request(&token, "/profile/7", |cfg| configure(cfg, MockProfileManager::new())).await;
    assert_eq!(status, 401);
    assert!(body.contains("Access token is invalid"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn fetch_profile_returns_the_view() {
    let mut mock = MockProfileManager::new();
    mock.expect_fetch_profile().returning(|_| Ok(Some(bella(2))));
    let (status, body) = get_request(&valid_token(1), "/profile/7", |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["name"], "bella");
    assert_eq!(json["photoUrl"], "https://pics.pawpaw.app/bella.jpg");
    assert_eq!(json["likesCount"], 3);
}

#[actix_web::test]
async fn fetch_missing_profile_is_404() {
    let mut mock = MockProfileManager::new();
    mock.expect_fetch_profile().returning(|_| Ok(None));
    let (status, body) = get_request(&valid_token(1), "/profile/99", |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 404);
    assert!(body.contains("does not exist"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn creating_a_profile_returns_201() {
    let mut mock = MockProfileManager::new();
    mock.expect_create_profile().returning(|p| {
        let mut created = bella(1);
        created.name = p.name;
        Ok(created)
    });
    let req = NewProfileRequest {
        name: "bella".to_string(),
        species: None,
        bio: None,
        photo_url: None,
    };
    let (status, body) = post_request(&valid_token(1), "/profile", &req, |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 201);
    assert!(body.contains("bella"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn a_second_profile_is_a_domain_violation() {
    let mut mock = MockProfileManager::new();
    mock.expect_create_profile().returning(|_| Err(ProfileApiError::ProfileAlreadyExists(1)));
    let req = NewProfileRequest { name: "rex".to_string(), species: None, bio: None, photo_url: None };
    let (status, body) = post_request(&valid_token(1), "/profile", &req, |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 400);
    assert!(body.contains("already has a pet profile"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn only_the_owner_may_delete() {
    let mut mock = MockProfileManager::new();
    // Owned by user 2; user 1 is asking. No delete expectation: reaching the delete is a bug.
    mock.expect_fetch_profile().returning(|_| Ok(Some(bella(2))));
    let (status, body) = delete_request(&valid_token(1), "/profile/7", |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 403);
    assert!(body.contains("owner"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn the_owner_deletes_their_profile() {
    let mut mock = MockProfileManager::new();
    mock.expect_fetch_profile().returning(|_| Ok(Some(bella(1))));
    mock.expect_delete_profile().returning(|_| Ok(()));
    let (status, body) = delete_request(&valid_token(1), "/profile/7", |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 200);
    assert!(body.contains("deleted"), "Unexpected body: {body}");
}
