use thiserror::Error;

/// Domain errors that callers are expected to match on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("Invalid {kind} value: {value}")]
    InvalidEnum { kind: &'static str, value: String },

    #[error("League game {0} not found")]
    LeagueGameNotFound(String),

    #[error("League game {0} is already completed")]
    AlreadyCompleted(String),

    #[error("Player {0} not found")]
    PlayerNotFound(String),

    #[error("Player {id} is still referenced by {references} matches or participants")]
    PlayerInUse { id: String, references: i64 },

    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcasts_through_anyhow_context() {
        use anyhow::Context;

        let result: anyhow::Result<()> = Err(LeagueError::AlreadyCompleted("lg1".into()))
            .context("Failed to complete league game");
        let err = result.unwrap_err();

        assert_eq!(
            err.downcast_ref::<LeagueError>(),
            Some(&LeagueError::AlreadyCompleted("lg1".into()))
        );
    }

    #[test]
    fn context_messages_name_the_subject() {
        assert_eq!(fetch_context("http://x/players"), "Failed to fetch from: http://x/players");
        assert_eq!(parse_context("matches"), "Failed to parse matches");
        assert_eq!(cache_context("write", "players"), "Failed to write cache for key: players");
    }
}
