use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::str::FromStr;
use uuid::Uuid;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        format!("Value for column '{col_name}' is too long (max {N} chars)").into()
    })
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| {
            format!("Value for column '{col_name}' is too long (max {N} chars)").into()
        })
}

/// Loads the rows of `table` matching `ids`, returned in the order of `ids`.
pub async fn load_by_ids<T>(
    pool: &PgPool,
    table: &str,
    ids: &[Uuid],
) -> Result<Vec<Option<T>>, Box<dyn Error + Send + Sync>>
where
    T: TryFromRow<PgRow> + temple_admin_db::models::Identifiable,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!("SELECT * FROM {table} WHERE id = ANY($1)");
    let rows = sqlx::query(&query).bind(ids).fetch_all(pool).await?;

    let mut item_map = std::collections::HashMap::new();
    for row in rows {
        let item = T::try_from_row(&row)?;
        item_map.insert(item.get_id(), item);
    }

    Ok(ids.iter().map(|id| item_map.remove(id)).collect())
}

/// Loads every row of `table` in the given order.
pub async fn load_all<T: TryFromRow<PgRow>>(
    pool: &PgPool,
    table: &str,
    order_by: &str,
) -> Result<Vec<T>, Box<dyn Error + Send + Sync>> {
    let query = format!("SELECT * FROM {table} ORDER BY {order_by}");
    let rows = sqlx::query(&query).fetch_all(pool).await?;
    rows.iter().map(T::try_from_row).collect()
}

/// Deletes the rows of `table` matching `ids` in one transaction.
pub async fn delete_by_ids(
    pool: &PgPool,
    table: &str,
    ids: &[Uuid],
) -> Result<usize, Box<dyn Error + Send + Sync>> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let query = format!("DELETE FROM {table} WHERE id = ANY($1)");
    let result = sqlx::query(&query).bind(ids).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(result.rows_affected() as usize)
}

/// Reports, for each id, whether a row exists in `table`.
pub async fn exist_by_ids(
    pool: &PgPool,
    table: &str,
    ids: &[Uuid],
) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!("SELECT id FROM {table} WHERE id = ANY($1)");
    let rows = sqlx::query(&query).bind(ids).fetch_all(pool).await?;
    let existing: std::collections::HashSet<Uuid> =
        rows.iter().map(|row| row.get::<Uuid, _>("id")).collect();

    Ok(ids.iter().map(|id| (*id, existing.contains(id))).collect())
}
