use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Entries kept on the board.
pub const CAPACITY: usize = 10;

pub const DEFAULT_PATH: &str = "dat/score.dat";

/// Final result of a run. Ordered by `point`, then `depth`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub point: i64,
    pub depth: i64,
}

impl Score {
    pub fn new(point: i64, depth: i64) -> Self {
        Self { point, depth }
    }

    /// Point and depth columns, right-aligned.
    pub fn row(&self) -> String {
        format!("{:>10}  {:>10}", self.point, self.depth)
    }

    pub fn detail(&self) -> String {
        format!("SCORE {}", self.row())
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            .then(self.depth.cmp(&other.depth))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// "1ST", "2ND", "3RD", then "4TH", "5TH"...
pub fn rank_label(index: usize) -> String {
    const SUFFIX: [&str; 4] = ["ST", "ND", "RD", "TH"];
    format!("{}{}", index + 1, SUFFIX[index.min(3)])
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode scores: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode scores: {0}")]
    Decode(#[source] bincode::Error),
}

/// Best scores, best first, plus the most recent submission.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    scores: Vec<Score>,
    last: Option<Score>,
    path: Option<PathBuf>,
}

impl ScoreBoard {
    /// A board that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the board stored at `path`. A missing file is an empty board;
    /// an unreadable or corrupt one is logged and treated the same.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = if path.exists() {
            match read_scores(&path) {
                Ok(scores) => scores,
                Err(e) => {
                    log::warn!("{e}, starting with an empty score board");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        let mut board = Self {
            scores,
            last: None,
            path: Some(path),
        };
        board.normalize();
        board
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn last(&self) -> Option<Score> {
        self.last
    }

    pub fn highscore(&self) -> Option<Score> {
        self.scores.first().copied()
    }

    /// Record `score` as the last submission and rank it. Returns its index
    /// on the board, or `None` if it did not make the cut.
    pub fn register(&mut self, score: Score) -> Option<usize> {
        self.last = Some(score);
        // Ties rank below entries already on the board.
        let index = self.scores.partition_point(|s| *s >= score);
        let rank = (index < CAPACITY).then(|| {
            self.scores.insert(index, score);
            self.scores.truncate(CAPACITY);
            index
        });
        log::info!("score {} at depth {} ranked {:?}", score.point, score.depth, rank);
        rank
    }

    /// Rewrite the whole board. No-op for in-memory boards.
    pub fn save(&self) -> Result<(), ScoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let bytes = bincode::serialize(&self.scores).map_err(ScoreError::Encode)?;
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|source| ScoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, bytes).map_err(|source| ScoreError::Io {
            path: path.clone(),
            source,
        })
    }

    fn normalize(&mut self) {
        self.scores.sort_by(|a, b| b.cmp(a));
        self.scores.truncate(CAPACITY);
    }
}

fn read_scores(path: &Path) -> Result<Vec<Score>, ScoreError> {
    let bytes = fs::read(path).map_err(|source| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    bincode::deserialize(&bytes).map_err(ScoreError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_point_then_depth() {
        let mut board = ScoreBoard::in_memory();
        board.register(Score::new(100, 3));
        board.register(Score::new(50, 9));
        board.register(Score::new(100, 5));
        assert_eq!(
            board.scores(),
            &[Score::new(100, 5), Score::new(100, 3), Score::new(50, 9)]
        );
        assert_eq!(board.highscore(), Some(Score::new(100, 5)));
    }

    #[test]
    fn keeps_top_ten_and_last() {
        let mut board = ScoreBoard::in_memory();
        for i in 1..=10 {
            board.register(Score::new(i * 10, i));
        }
        let rank = board.register(Score::new(1, 1));
        assert_eq!(rank, None);
        assert_eq!(board.scores().len(), CAPACITY);
        assert_eq!(board.last(), Some(Score::new(1, 1)));

        let rank = board.register(Score::new(55, 0));
        assert_eq!(rank, Some(5));
        assert_eq!(board.scores().len(), CAPACITY);
        assert_eq!(board.scores().last(), Some(&Score::new(20, 2)));
    }

    #[test]
    fn tie_with_tenth_does_not_rank() {
        let mut board = ScoreBoard::in_memory();
        for i in 1..=10 {
            board.register(Score::new(i * 10, i));
        }
        let before = board.scores().to_vec();
        assert_eq!(board.register(Score::new(10, 1)), None);
        assert_eq!(board.scores(), &before[..]);
        assert_eq!(board.last(), Some(Score::new(10, 1)));

        // A tie above the cut lands just below its twin.
        assert_eq!(board.register(Score::new(50, 5)), Some(6));
        assert_eq!(board.scores()[5], Score::new(50, 5));
        assert_eq!(board.scores()[6], Score::new(50, 5));
    }

    #[test]
    fn rank_labels() {
        let labels: Vec<String> = (0..5).map(rank_label).collect();
        assert_eq!(labels, vec!["1ST", "2ND", "3RD", "4TH", "5TH"]);
        assert_eq!(rank_label(9), "10TH");
    }

    #[test]
    fn save_then_load_restores_board() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dat").join("score.dat");

        let mut board = ScoreBoard::load(&path);
        assert!(board.scores().is_empty());
        board.register(Score::new(42, 7));
        board.register(Score::new(9, 100));
        board.save().expect("save");

        let reloaded = ScoreBoard::load(&path);
        assert_eq!(reloaded.scores(), board.scores());
        // The last submission is per session.
        assert_eq!(reloaded.last(), None);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("score.dat");
        fs::write(&path, [0xFF, 0xFF, 0xFF]).expect("write");
        let board = ScoreBoard::load(&path);
        assert!(board.scores().is_empty());
    }

    #[test]
    fn row_formatting() {
        let score = Score::new(1234, 56);
        assert_eq!(score.row(), "      1234          56");
        assert!(score.detail().starts_with("SCORE"));
    }
}
