use actix_web::{web, web::ServiceConfig};
use chrono::Utc;
use pawpaw_engine::{
    db_types::{Gift, GiftKind, Wallet},
    traits::{GiftReceipt, WalletApiError},
    WalletApi,
};
use pp_common::Coins;

use super::{
    helpers::{get_request, post_request, valid_token},
    mocks::MockWalletManager,
};
use crate::{
    data_objects::GiftRequest,
    routes::{MyGiftsRoute, MyWalletRoute, SendGiftRoute},
};

fn wallet(user_id: i64, balance: i64, earned: i64) -> Wallet {
    Wallet {
        user_id,
        balance: Coins::from(balance),
        total_earned: Coins::from(earned),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn configure(cfg: &mut ServiceConfig, mock: MockWalletManager) {
    let api = WalletApi::new(mock);
    cfg.service(MyWalletRoute::<MockWalletManager>::new())
        .service(SendGiftRoute::<MockWalletManager>::new())
        .service(MyGiftsRoute::<MockWalletManager>::new())
        .app_data(web::Data::new(api));
}

#[actix_web::test]
async fn wallet_read_requires_a_session() {
    let (status, _body) = get_request("", "/wallet", |cfg| configure(cfg, MockWalletManager::new())).await;
    assert_eq!(status, 401);
}

#[actix_web::test]
async fn wallet_read_returns_the_lazy_default() {
    let mut mock = MockWalletManager::new();
    mock.expect_fetch_or_create_wallet().returning(|user_id| Ok(wallet(user_id, 100, 0)));
    let (status, body) = get_request(&valid_token(5), "/wallet", |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"balance": 100, "totalEarned": 0}));
}

#[actix_web::test]
async fn sending_a_gift_returns_the_new_balance() {
    let mut mock = MockWalletManager::new();
    mock.expect_process_gift().returning(|gift| {
        let cost = gift.cost();
        Ok(GiftReceipt {
            gift: Gift {
                id: 1,
                sender_id: gift.sender_id,
                receiver_id: gift.receiver_id,
                kind: gift.kind,
                coin_value: cost,
                created_at: Utc::now(),
            },
            new_sender_balance: Coins::from(100) - cost,
        })
    });
    let req = GiftRequest { receiver_id: 2, kind: "toy".to_string() };
    let (status, body) = post_request(&valid_token(1), "/gift", &req, |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"success": true, "newBalance": 50}));
}

#[actix_web::test]
async fn an_overdraw_is_a_400_and_retryable_later() {
    let mut mock = MockWalletManager::new();
    mock.expect_process_gift().returning(|gift| {
        Err(WalletApiError::InsufficientFunds { balance: Coins::from(50), required: gift.cost() })
    });
    let req = GiftRequest { receiver_id: 2, kind: "steak".to_string() };
    let (status, body) = post_request(&valid_token(1), "/gift", &req, |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 400);
    assert!(body.contains("Insufficient funds"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn an_unknown_gift_kind_never_touches_the_wallet() {
    // No expectations at all: if the handler reaches the ledger, the mock panics and the test fails
    let mock = MockWalletManager::new();
    let req = GiftRequest { receiver_id: 2, kind: "sausage".to_string() };
    let (status, body) = post_request(&valid_token(1), "/gift", &req, |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 400);
    assert!(body.contains("Unrecognised gift kind"), "Unexpected body: {body}");
}

#[actix_web::test]
async fn received_gifts_are_listed() {
    let mut mock = MockWalletManager::new();
    mock.expect_fetch_gifts_for_receiver().returning(|user_id| {
        Ok(vec![Gift {
            id: 3,
            sender_id: 9,
            receiver_id: user_id,
            kind: GiftKind::Treat,
            coin_value: GiftKind::Treat.price(),
            created_at: Utc::now(),
        }])
    });
    let (status, body) = get_request(&valid_token(5), "/gifts", |cfg| configure(cfg, mock)).await;
    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json[0]["kind"], "Treat");
    assert_eq!(json[0]["coinValue"], 150);
    assert_eq!(json[0]["senderId"], 9);
}
