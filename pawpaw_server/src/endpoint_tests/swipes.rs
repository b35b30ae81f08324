//! Swipe-flow endpoint tests run against a real throwaway SQLite database, since the interesting
//! behaviour (duplicate rejection, mutual-match detection) lives in the storage constraints.
use actix_web::{web, web::ServiceConfig};
use pawpaw_engine::{
    db_types::{NewProfile, SwipeDecision},
    events::EventProducers,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::ProfileManagement,
    SqliteDatabase,
    SwipeFlowApi,
};

use super::helpers::{post_request, valid_token};
use crate::{
    data_objects::SwipeRequest,
    routes::RecordSwipeRoute,
};

const ALICE: i64 = 1;
const BOB: i64 = 2;

async fn test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 1).await.expect("Error creating test database")
}

fn configure(cfg: &mut ServiceConfig, db: SqliteDatabase) {
    let api = SwipeFlowApi::new(db, EventProducers::default());
    cfg.service(RecordSwipeRoute::<SqliteDatabase>::new()).app_data(web::Data::new(api));
}

#[actix_web::test]
async fn swiping_requires_a_session() {
    let db = test_db().await;
    let req = SwipeRequest { profile_id: 1, decision: SwipeDecision::Like };
    let (status, _body) = post_request("", "/swipe", &req, |cfg| configure(cfg, db)).await;
    assert_eq!(status, 401);
}

#[actix_web::test]
async fn swiping_a_missing_profile_is_404() {
    let db = test_db().await;
    let req = SwipeRequest { profile_id: 999, decision: SwipeDecision::Like };
    let (status, body) = post_request(&valid_token(ALICE), "/swipe", &req, |cfg| configure(cfg, db)).await;
    assert_eq!(status, 404);
    assert!(body.contains("does not exist"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn self_swipes_are_rejected() {
    let db = test_db().await;
    let own = db.create_profile(NewProfile::new(ALICE, "rex")).await.unwrap();
    let req = SwipeRequest { profile_id: own.id, decision: SwipeDecision::Like };
    let (status, body) = post_request(&valid_token(ALICE), "/swipe", &req, |cfg| configure(cfg, db)).await;
    assert_eq!(status, 400);
    assert!(body.contains("their own pet"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn duplicate_swipes_are_rejected() {
    let db = test_db().await;
    let _rex = db.create_profile(NewProfile::new(ALICE, "rex")).await.unwrap();
    let bella = db.create_profile(NewProfile::new(BOB, "bella")).await.unwrap();
    let req = SwipeRequest { profile_id: bella.id, decision: SwipeDecision::Like };

    let (status, _body) = post_request(&valid_token(ALICE), "/swipe", &req, {
        let db = db.clone();
        |cfg| configure(cfg, db)
    })
    .await;
    assert_eq!(status, 200);

    let (status, body) = post_request(&valid_token(ALICE), "/swipe", &req, |cfg| configure(cfg, db)).await;
    assert_eq!(status, 400);
    assert!(body.contains("already swiped"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn a_mutual_like_carries_the_match_in_the_response() {
    let db = test_db().await;
    let rex = db
        .create_profile(NewProfile::new(ALICE, "rex").with_photo_url("https://pics.pawpaw.app/rex.jpg"))
        .await
        .unwrap();
    let bella = db.create_profile(NewProfile::new(BOB, "bella")).await.unwrap();

    let like_bella = SwipeRequest { profile_id: bella.id, decision: SwipeDecision::Like };
    let (status, body) = post_request(&valid_token(ALICE), "/swipe", &like_bella, {
        let db = db.clone();
        |cfg| configure(cfg, db)
    })
    .await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    assert!(json.get("match").is_none(), "No match before the like is reciprocated");

    let like_rex = SwipeRequest { profile_id: rex.id, decision: SwipeDecision::Like };
    let (status, body) = post_request(&valid_token(BOB), "/swipe", &like_rex, |cfg| configure(cfg, db)).await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    // Bob is shown Alice's pet
    assert_eq!(json["match"]["pet"]["name"], "rex");
    assert_eq!(json["match"]["pet"]["photoUrl"], "https://pics.pawpaw.app/rex.jpg");
}
