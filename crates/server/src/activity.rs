//! Append-only CSV activity logs.
//!
//! Two files live in the log directory:
//! - `user_logs.csv`: one row per recommendation request
//! - `user_actions.csv`: one row per title a user picked
//!
//! Each write opens the file, appends one record and closes it again. A file
//! that doesn't exist yet is created with its header row; reading a file that
//! doesn't exist yields an empty history.

use chrono::Local;
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const RECOMMENDATION_LOG: &str = "user_logs.csv";
pub const USER_ACTION_LOG: &str = "user_actions.csv";

const RECOMMENDATION_HEADER: [&str; 3] = ["timestamp", "movie_selected", "recommended_movies"];
const USER_ACTION_HEADER: [&str; 3] = ["user_id", "timestamp", "movie_selected"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ActivityError>;

/// A row of `user_logs.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub timestamp: String,
    pub movie_selected: String,
    /// Recommended titles joined with ", "
    pub recommended_movies: String,
}

/// A row of `user_actions.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActionRecord {
    pub user_id: String,
    pub timestamp: String,
    pub movie_selected: String,
}

/// Handle on the log directory
#[derive(Debug, Clone)]
pub struct ActivityLog {
    dir: PathBuf,
}

impl ActivityLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn recommendations_path(&self) -> PathBuf {
        self.dir.join(RECOMMENDATION_LOG)
    }

    pub fn user_actions_path(&self) -> PathBuf {
        self.dir.join(USER_ACTION_LOG)
    }

    /// Create the directory and both files with headers, if missing
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        ensure_header(&self.recommendations_path(), &RECOMMENDATION_HEADER)?;
        ensure_header(&self.user_actions_path(), &USER_ACTION_HEADER)?;
        Ok(())
    }

    /// Record one recommendation request
    pub fn log_recommendation(
        &self,
        selected: &str,
        recommended: &[String],
    ) -> Result<RecommendationRecord> {
        let record = RecommendationRecord {
            timestamp: now(),
            movie_selected: selected.to_string(),
            recommended_movies: recommended.join(", "),
        };
        append(&self.recommendations_path(), &RECOMMENDATION_HEADER, &record)?;
        Ok(record)
    }

    /// Record that `user_id` picked `selected`
    pub fn log_user_action(&self, user_id: &str, selected: &str) -> Result<UserActionRecord> {
        let record = UserActionRecord {
            user_id: user_id.to_string(),
            timestamp: now(),
            movie_selected: selected.to_string(),
        };
        append(&self.user_actions_path(), &USER_ACTION_HEADER, &record)?;
        Ok(record)
    }

    /// Latest recommendation requests, newest first
    pub fn recommendation_history(&self, limit: usize) -> Result<Vec<RecommendationRecord>> {
        let records: Vec<RecommendationRecord> = read_all(&self.recommendations_path())?;
        Ok(records.into_iter().rev().take(limit).collect())
    }

    /// A user's latest picks, newest first
    pub fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<UserActionRecord>> {
        let records: Vec<UserActionRecord> = read_all(&self.user_actions_path())?;
        Ok(records
            .into_iter()
            .rev()
            .filter(|record| record.user_id == user_id)
            .take(limit)
            .collect())
    }

    /// Most picked titles across all users
    ///
    /// Sorted by count descending, ties by title ascending.
    pub fn popularity(&self, limit: usize) -> Result<Vec<(String, usize)>> {
        let records: Vec<UserActionRecord> = read_all(&self.user_actions_path())?;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.movie_selected).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn is_missing_or_empty(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

fn ensure_header(path: &Path, header: &[&str]) -> Result<()> {
    if !is_missing_or_empty(path) {
        return Ok(());
    }
    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

fn append<T: Serialize>(path: &Path, header: &[&str], record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let needs_header = is_missing_or_empty(path);

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if needs_header {
        writer.write_record(header)?;
    }
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

fn read_all<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let records = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log() -> (tempfile::TempDir, ActivityLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = ActivityLog::new(dir.path().join("logs"));
        (dir, log)
    }

    #[test]
    fn test_initialize_writes_headers_once() {
        let (_dir, log) = temp_log();

        log.initialize().unwrap();
        log.initialize().unwrap();

        let content = fs::read_to_string(log.recommendations_path()).unwrap();
        assert_eq!(content, "timestamp,movie_selected,recommended_movies\n");
        let content = fs::read_to_string(log.user_actions_path()).unwrap();
        assert_eq!(content, "user_id,timestamp,movie_selected\n");
    }

    #[test]
    fn test_missing_files_are_empty_history() {
        let (_dir, log) = temp_log();

        assert!(log.recommendation_history(10).unwrap().is_empty());
        assert!(log.recent_for_user("alice", 10).unwrap().is_empty());
        assert!(log.popularity(10).unwrap().is_empty());
    }

    #[test]
    fn test_log_recommendation_creates_file_with_header() {
        let (_dir, log) = temp_log();

        let recommended = vec!["Grumpier Old Men".to_string(), "Jumanji".to_string()];
        let record = log.log_recommendation("Toy Story", &recommended).unwrap();
        assert_eq!(record.recommended_movies, "Grumpier Old Men, Jumanji");
        assert_eq!(record.timestamp.len(), "2024-01-01 00:00:00".len());

        let content = fs::read_to_string(log.recommendations_path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("timestamp,movie_selected,recommended_movies"));
        assert!(lines.next().unwrap().ends_with(",Toy Story,\"Grumpier Old Men, Jumanji\""));

        let history = log.recommendation_history(10).unwrap();
        assert_eq!(history, vec![record]);
    }

    #[test]
    fn test_recent_for_user_is_newest_first() {
        let (_dir, log) = temp_log();
        log.initialize().unwrap();

        log.log_user_action("alice", "Heat").unwrap();
        log.log_user_action("bob", "Sabrina").unwrap();
        log.log_user_action("alice", "Jumanji").unwrap();
        log.log_user_action("alice", "Toy Story").unwrap();

        let recent: Vec<String> = log
            .recent_for_user("alice", 2)
            .unwrap()
            .into_iter()
            .map(|r| r.movie_selected)
            .collect();

        assert_eq!(recent, vec!["Toy Story", "Jumanji"]);
    }

    #[test]
    fn test_popularity() {
        let (_dir, log) = temp_log();

        for (user, title) in [
            ("alice", "Heat"),
            ("bob", "Toy Story"),
            ("carol", "Heat"),
            ("dave", "Toy Story"),
            ("erin", "Jumanji"),
            ("frank", "Heat"),
        ] {
            log.log_user_action(user, title).unwrap();
        }

        let ranked = log.popularity(2).unwrap();

        assert_eq!(
            ranked,
            vec![("Heat".to_string(), 3), ("Toy Story".to_string(), 2)]
        );
    }
}
