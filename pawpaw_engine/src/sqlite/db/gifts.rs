use sqlx::SqliteConnection;

use crate::{
    db_types::{Gift, NewGift},
    traits::WalletApiError,
};

/// Writes the immutable gift row. `coin_value` records the catalogue price at send time.
pub async fn insert_gift(gift: NewGift, conn: &mut SqliteConnection) -> Result<Gift, WalletApiError> {
    let cost = gift.cost();
    let gift = sqlx::query_as(
        r#"
            INSERT INTO gifts (sender_id, receiver_id, kind, coin_value) VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(gift.sender_id)
    .bind(gift.receiver_id)
    .bind(gift.kind)
    .bind(cost.value())
    .fetch_one(conn)
    .await?;
    Ok(gift)
}

pub async fn fetch_gifts_for_receiver(
    user_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Gift>, WalletApiError> {
    let gifts = sqlx::query_as("SELECT * FROM gifts WHERE receiver_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(gifts)
}
