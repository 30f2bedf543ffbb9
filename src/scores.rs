//! Leaderboard persistence
//!
//! Append-only `name,score` records in a plain text file. I/O failures are
//! logged and degrade: a failed save is a no-op, a failed load is an empty
//! leaderboard. Nothing here can take the game down.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single leaderboard record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// File-backed leaderboard
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    path: PathBuf,
}

impl ScoreBoard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one record. The delimiter is reserved, so commas in the name
    /// are replaced with spaces.
    pub fn save_score(&self, name: &str, score: u32) {
        let name = name.replace(',', " ");
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{},{}", name.trim(), score));

        match result {
            Ok(()) => log::info!("saved score {} for {:?}", score, name.trim()),
            Err(e) => log::error!("failed to save score: {}", e),
        }
    }

    /// All well-formed records, sorted descending by score.
    ///
    /// A missing file is an empty leaderboard; malformed lines are skipped.
    pub fn load_scores(&self) -> Vec<ScoreEntry> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::error!("failed to load scores: {}", e);
                return Vec::new();
            }
        };

        let mut entries: Vec<ScoreEntry> = text
            .lines()
            .filter_map(|line| {
                let (name, score) = line.split_once(',')?;
                let score = score.trim().parse().ok()?;
                Some(ScoreEntry {
                    name: name.trim().to_string(),
                    score,
                })
            })
            .collect();

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries
    }

    /// Clear every record
    pub fn reset(&self) {
        if let Err(e) = fs::write(&self.path, "") {
            log::error!("failed to reset scores: {}", e);
        }
    }

    /// True if `score` beats every recorded score (trivially true when the
    /// leaderboard is empty)
    pub fn is_new_high_score(&self, score: u32) -> bool {
        self.load_scores().first().is_none_or(|top| score > top.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(dir: &tempfile::TempDir) -> ScoreBoard {
        ScoreBoard::new(dir.path().join("scores.txt"))
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let board = board(&dir);

        board.save_score("ava", 400);
        board.save_score("ben", 900);
        board.save_score("cole", 650);

        let scores = board.load_scores();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].name, "ben");
        assert_eq!(scores[0].score, 900);
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(board(&dir).load_scores().is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let board = board(&dir);
        fs::write(
            dir.path().join("scores.txt"),
            "ava,400\nnot a record\nben,NaN\ncole,650\n",
        )
        .unwrap();

        let scores = board.load_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].name, "cole");
    }

    #[test]
    fn test_reset_clears() {
        let dir = tempfile::tempdir().unwrap();
        let board = board(&dir);
        board.save_score("ava", 400);
        board.reset();
        assert!(board.load_scores().is_empty());
    }

    #[test]
    fn test_new_high_score() {
        let dir = tempfile::tempdir().unwrap();
        let board = board(&dir);
        // Empty leaderboard: anything qualifies
        assert!(board.is_new_high_score(0));

        board.save_score("ava", 400);
        assert!(board.is_new_high_score(401));
        assert!(!board.is_new_high_score(400));
    }

    #[test]
    fn test_comma_in_name_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let board = board(&dir);
        board.save_score("ava,the,great", 100);

        let scores = board.load_scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, "ava the great");
        assert_eq!(scores[0].score, 100);
    }
}
