use anyhow::{Context, Result};

use super::connection::DbConn;

// Children first so foreign keys never block the drop
const TABLES: [&str; 5] = [
    "league_game_participants",
    "matches",
    "league_games",
    "players",
    "users",
];

/// Creates missing tables; safe to run on every start
pub fn create_schema(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::debug!("Database schema ensured ({} statements)", statements.len());
    Ok(())
}

pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    for table in TABLES {
        execute_sql(conn, &format!("DROP TABLE IF EXISTS {}", table))
            .with_context(|| format!("Failed to drop table {}", table))?;
    }

    create_schema(conn)?;
    log::info!("Database schema reset successfully");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(strip_comments)
        .filter(|s| !s.is_empty())
        .collect()
}

fn strip_comments(statement: &str) -> String {
    statement
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::get_connection;
    use crate::database::connection::test_support::temp_pool;

    fn table_count(conn: &DbConn) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            [],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn schema_statements_skip_comments() {
        let statements = split_sql_statements("-- header\nCREATE TABLE a (x);\n\n-- trailing only\n");
        assert_eq!(statements, vec!["CREATE TABLE a (x)".to_string()]);
    }

    #[test]
    fn create_schema_is_idempotent() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();

        create_schema(&mut conn).unwrap();

        assert_eq!(table_count(&conn), 5);
    }

    #[test]
    fn reset_empties_tables() {
        let (_dir, pool) = temp_pool();
        let mut conn = get_connection(&pool).unwrap();
        conn.execute("INSERT INTO players (name) VALUES ('Alice')", []).unwrap();

        reset_database(&mut conn).unwrap();

        let players: i64 = conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
            .unwrap();
        assert_eq!(players, 0);
        assert_eq!(table_count(&conn), 5);
    }
}
