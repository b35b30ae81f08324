use sqlx::SqliteConnection;

use crate::{
    db_types::{NewSwipe, Swipe, SwipeDecision},
    traits::SocialGatewayError,
};

/// Inserts the swipe, guarded by the `(swiper_id, profile_id)` uniqueness invariant. First write
/// wins; a duplicate attempt surfaces as [`SocialGatewayError::AlreadySwiped`] and must abort any
/// enclosing transaction before downstream effects run.
pub async fn guarded_insert(swipe: NewSwipe, conn: &mut SqliteConnection) -> Result<Swipe, SocialGatewayError> {
    let NewSwipe { swiper_id, profile_id, decision } = swipe;
    let swipe = sqlx::query_as(
        r#"
            INSERT INTO swipes (swiper_id, profile_id, decision) VALUES ($1, $2, $3)
            RETURNING *;
        "#,
    )
    .bind(swiper_id)
    .bind(profile_id)
    .bind(decision)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => {
            SocialGatewayError::AlreadySwiped { user_id: swiper_id, profile_id }
        },
        _ => SocialGatewayError::from(e),
    })?;
    Ok(swipe)
}

pub async fn fetch_swipe(
    swiper_id: i64,
    profile_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Swipe>, SocialGatewayError> {
    let swipe = sqlx::query_as("SELECT * FROM swipes WHERE swiper_id = $1 AND profile_id = $2")
        .bind(swiper_id)
        .bind(profile_id)
        .fetch_optional(conn)
        .await?;
    Ok(swipe)
}

/// Whether the reverse-direction like exists: has `swiper_id` already liked `profile_id`?
/// This is the mutual-match probe.
pub async fn like_exists(
    swiper_id: i64,
    profile_id: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, SocialGatewayError> {
    let existing = fetch_swipe(swiper_id, profile_id, conn).await?;
    Ok(existing.map(|s| s.decision == SwipeDecision::Like).unwrap_or(false))
}
