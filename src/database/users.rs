use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::NewUser;
use crate::domain::User;
use crate::errors::LeagueError;

const COLUMNS: &str = "id, email, first_name, last_name, profile_image_url, role, is_active, created_at, updated_at";

pub fn insert_user(conn: &mut DbConn, user: &NewUser) -> Result<User> {
    if let Some(email) = &user.email {
        if find_by_email(conn, email)?.is_some() {
            return Err(LeagueError::DuplicateEmail(email.clone()).into());
        }
    }

    let sql = format!(
        "INSERT INTO users (email, first_name, last_name, profile_image_url, role) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {}",
        COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            user.email,
            user.first_name,
            user.last_name,
            user.profile_image_url,
            user.role
        ],
        parse_user_row,
    )
    .context("Failed to insert user")
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        profile_image_url: row.get(4)?,
        role: row.get(5)?,
        is_active: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub fn find_by_email(conn: &mut DbConn, email: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE email = ?1", COLUMNS);

    conn.query_row(&sql, params![email], parse_user_row)
        .optional()
        .context("Failed to query user by email")
}
