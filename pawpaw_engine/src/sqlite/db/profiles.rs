use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewProfile, PetProfile},
    traits::ProfileApiError,
};

pub async fn insert_profile(
    profile: NewProfile,
    conn: &mut SqliteConnection,
) -> Result<PetProfile, ProfileApiError> {
    let owner_id = profile.owner_id;
    let profile = sqlx::query_as(
        r#"
            INSERT INTO pet_profiles (owner_id, name, species, bio, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(profile.owner_id)
    .bind(profile.name)
    .bind(profile.species)
    .bind(profile.bio)
    .bind(profile.photo_url)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => ProfileApiError::ProfileAlreadyExists(owner_id),
        _ => ProfileApiError::from(e),
    })?;
    Ok(profile)
}

pub async fn fetch_profile(
    profile_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<PetProfile>, ProfileApiError> {
    let profile = sqlx::query_as("SELECT * FROM pet_profiles WHERE id = $1")
        .bind(profile_id)
        .fetch_optional(conn)
        .await?;
    Ok(profile)
}

pub async fn fetch_profile_for_owner(
    owner_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<PetProfile>, ProfileApiError> {
    let profile = sqlx::query_as("SELECT * FROM pet_profiles WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;
    Ok(profile)
}

/// Deletes the profile, returning `true` if a row was removed.
pub async fn delete_profile(profile_id: i64, conn: &mut SqliteConnection) -> Result<bool, ProfileApiError> {
    let result = sqlx::query("DELETE FROM pet_profiles WHERE id = $1").bind(profile_id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

/// Profiles the user has not swiped on yet and does not own, newest first.
pub async fn discovery_feed(
    user_id: i64,
    limit: u32,
    conn: &mut SqliteConnection,
) -> Result<Vec<PetProfile>, ProfileApiError> {
    let profiles = sqlx::query_as(
        r#"
        SELECT * FROM pet_profiles
        WHERE owner_id != $1
          AND id NOT IN (SELECT profile_id FROM swipes WHERE swiper_id = $1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2"#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(conn)
    .await?;
    Ok(profiles)
}

/// Bumps the denormalised likes counter by exactly one. Returns `false` when the profile row is
/// gone; callers log and carry on, since the swipe row is the durable fact.
pub async fn increment_likes(profile_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE pet_profiles SET likes_count = likes_count + 1, updated_at = CURRENT_TIMESTAMP WHERE id = $1",
    )
    .bind(profile_id)
    .execute(conn)
    .await?;
    trace!("🗃️ likes_count bump for profile {profile_id} touched {} row(s)", result.rows_affected());
    Ok(result.rows_affected() > 0)
}

/// Recounts likes from the swipe log. The counter is a convenience; this is the truth.
pub async fn recount_likes(profile_id: i64, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM swipes WHERE profile_id = $1 AND decision = 'Like'")
        .bind(profile_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}
