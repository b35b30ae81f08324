use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{MatchPair, PetMatch},
    traits::SocialGatewayError,
};

/// Inserts a match for the normalised pair, returning `false` in the second element if the pair was
/// already matched. Two reverse-direction likes can race; the loser hits the unique constraint and
/// is handed the existing record instead of an error.
pub async fn idempotent_insert(
    pair: MatchPair,
    conn: &mut SqliteConnection,
) -> Result<(PetMatch, bool), SocialGatewayError> {
    let result = sqlx::query_as(
        r#"
            INSERT INTO pet_matches (user_a, user_b, profile_a, profile_b)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(pair.user_a)
    .bind(pair.user_b)
    .bind(pair.profile_a)
    .bind(pair.profile_b)
    .fetch_one(&mut *conn)
    .await;
    match result {
        Ok(record) => Ok((record, true)),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            debug!("🗃️ Match for pair ({}, {}) already exists. Returning the existing record.", pair.user_a, pair.user_b);
            let existing = fetch_match_for_pair(pair.user_a, pair.user_b, conn).await?.ok_or_else(|| {
                SocialGatewayError::DatabaseError(format!(
                    "Match insert for pair ({}, {}) lost a race, but the winning record is missing",
                    pair.user_a, pair.user_b
                ))
            })?;
            Ok((existing, false))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_match_for_pair(
    user_1: i64,
    user_2: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<PetMatch>, SocialGatewayError> {
    let (user_a, user_b) = if user_1 <= user_2 { (user_1, user_2) } else { (user_2, user_1) };
    let record = sqlx::query_as("SELECT * FROM pet_matches WHERE user_a = $1 AND user_b = $2")
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(conn)
        .await?;
    Ok(record)
}

pub async fn fetch_matches_for_user(
    user_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<PetMatch>, SocialGatewayError> {
    let records =
        sqlx::query_as("SELECT * FROM pet_matches WHERE user_a = $1 OR user_b = $1 ORDER BY created_at DESC, id DESC")
            .bind(user_id)
            .fetch_all(conn)
            .await?;
    Ok(records)
}
