use pp_common::Coins;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Wallet, DEFAULT_STARTING_BALANCE},
    traits::WalletApiError,
};

/// Atomic insert-if-absent wallet creation. Two concurrent first touches for the same user both
/// succeed and converge on a single row with the default starting balance.
pub async fn ensure_wallet(user_id: i64, conn: &mut SqliteConnection) -> Result<(), WalletApiError> {
    sqlx::query(
        r#"
            INSERT INTO wallets (user_id, balance, total_earned) VALUES ($1, $2, 0)
            ON CONFLICT (user_id) DO NOTHING;
        "#,
    )
    .bind(user_id)
    .bind(DEFAULT_STARTING_BALANCE)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn fetch_wallet(user_id: i64, conn: &mut SqliteConnection) -> Result<Option<Wallet>, WalletApiError> {
    let wallet =
        sqlx::query_as("SELECT * FROM wallets WHERE user_id = $1").bind(user_id).fetch_optional(conn).await?;
    Ok(wallet)
}

/// The conditional debit. The sufficiency check and the decrement are one statement, so concurrent
/// transfers from the same sender can never both pass against a stale balance.
///
/// Returns the new balance, or `None` when the check failed and nothing was touched.
pub async fn debit_balance(
    user_id: i64,
    amount: Coins,
    conn: &mut SqliteConnection,
) -> Result<Option<Coins>, WalletApiError> {
    let new_balance: Option<i64> = sqlx::query_scalar(
        r#"
            UPDATE wallets SET balance = balance - $1, updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $2 AND balance >= $3
            RETURNING balance;
        "#,
    )
    .bind(amount.value())
    .bind(user_id)
    .bind(amount.value())
    .fetch_optional(conn)
    .await?;
    Ok(new_balance.map(Coins::from))
}

/// Grows the receiver's lifetime-earned counter. Spendable balance is untouched.
pub async fn credit_earned(user_id: i64, amount: Coins, conn: &mut SqliteConnection) -> Result<(), WalletApiError> {
    let result = sqlx::query(
        r#"
            UPDATE wallets SET total_earned = total_earned + $1, updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $2;
        "#,
    )
    .bind(amount.value())
    .bind(user_id)
    .execute(conn)
    .await?;
    if result.rows_affected() == 0 {
        return Err(WalletApiError::DatabaseError(format!(
            "Wallet for user {user_id} is missing, but it was just created in this transaction"
        )));
    }
    Ok(())
}
