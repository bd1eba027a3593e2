//! Schema and connectivity checks behind the `db-check` binary.

use sqlx::PgPool;
use std::fmt;

/// Columns the `users` table must expose.
pub const EXPECTED_USER_COLUMNS: &[&str] = &[
    "id",
    "username",
    "email",
    "password_hash",
    "role",
    "status",
    "last_login",
    "created_at",
    "audit_log_id",
];

/// Tables whose row counts are sampled.
pub const SAMPLED_TABLES: &[&str] = &[
    "users",
    "shops",
    "tenants",
    "agreements",
    "loans",
    "rent_penalties",
    "transactions",
];

#[derive(Debug, Default)]
pub struct DiagnosticReport {
    pub user_columns: Vec<String>,
    pub missing_user_columns: Vec<String>,
    pub table_counts: Vec<(String, Result<i64, String>)>,
}

impl DiagnosticReport {
    pub fn is_healthy(&self) -> bool {
        self.missing_user_columns.is_empty()
            && self.table_counts.iter().all(|(_, count)| count.is_ok())
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "users columns: {}", self.user_columns.join(", "))?;
        if self.missing_user_columns.is_empty() {
            writeln!(f, "  all expected columns present")?;
        } else {
            writeln!(f, "  MISSING: {}", self.missing_user_columns.join(", "))?;
        }
        writeln!(f, "row counts:")?;
        for (table, count) in &self.table_counts {
            match count {
                Ok(n) => writeln!(f, "  {table:<16} {n}")?,
                Err(e) => writeln!(f, "  {table:<16} ERROR {e}")?,
            }
        }
        write!(f, "status: {}", if self.is_healthy() { "OK" } else { "FAILED" })
    }
}

/// Expected columns absent from `actual`, in expected order.
pub fn missing_columns(actual: &[String]) -> Vec<String> {
    EXPECTED_USER_COLUMNS
        .iter()
        .filter(|expected| !actual.iter().any(|column| column == *expected))
        .map(|column| column.to_string())
        .collect()
}

pub async fn run_diagnostics(pool: &PgPool) -> Result<DiagnosticReport, sqlx::Error> {
    let user_columns: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT column_name::text FROM information_schema.columns
        WHERE table_name = 'users'
        ORDER BY ordinal_position
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut report = DiagnosticReport {
        missing_user_columns: missing_columns(&user_columns),
        user_columns,
        table_counts: Vec::with_capacity(SAMPLED_TABLES.len()),
    };

    for table in SAMPLED_TABLES {
        let query = format!("SELECT COUNT(*) FROM {table}");
        let count = sqlx::query_scalar::<_, i64>(&query)
            .fetch_one(pool)
            .await
            .map_err(|e| e.to_string());
        report.table_counts.push((table.to_string(), count));
    }

    Ok(report)
}
