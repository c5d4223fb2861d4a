use std::fs;
use std::path::{Path, PathBuf};

use super::MAX_SCORE;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("a leaderboard name cannot be empty")]
    EmptyName,
    #[error("a score of {0} is above the maximum of {max}", max = MAX_SCORE)]
    ScoreOutOfRange(u32),
    #[error("could not write the leaderboard: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode the leaderboard: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top scores kept in a JSON file next to the game.
///
/// The file is rewritten wholesale on every `record`. There is no locking;
/// one local player at a time is assumed.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub const CAPACITY: usize = 5;

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load(&path);
        log::info!(
            "leaderboard {} has {} entries",
            path.display(),
            entries.len()
        );
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Adds a score, keeps the best five and writes them back.
    ///
    /// Returns the 1-based rank of the new entry, or `None` if it did not
    /// make the cut. Equal scores keep their recording order.
    pub fn record(&mut self, name: &str, score: u32) -> Result<Option<usize>, LeaderboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::EmptyName);
        }
        if score > MAX_SCORE {
            return Err(LeaderboardError::ScoreOutOfRange(score));
        }

        // Pick up anything written since we last looked
        let mut entries = load(&self.path);
        entries.push(LeaderboardEntry::new(name, score));
        let new_index = entries.len() - 1;

        let mut ranked: Vec<(usize, LeaderboardEntry)> = entries.into_iter().enumerate().collect();
        ranked.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
        ranked.truncate(Self::CAPACITY);

        let rank = ranked
            .iter()
            .position(|(index, _)| *index == new_index)
            .map(|position| position + 1);
        let entries: Vec<LeaderboardEntry> = ranked.into_iter().map(|(_, entry)| entry).collect();

        save(&self.path, &entries)?;
        log::info!("recorded {} with {} points (rank {:?})", name, score, rank);
        self.entries = entries;
        Ok(rank)
    }
}

/// Reads the stored entries, best first. A missing or unreadable file is an
/// empty leaderboard.
pub fn load(path: &Path) -> Vec<LeaderboardEntry> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            log::warn!("cannot read leaderboard {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    let mut entries: Vec<LeaderboardEntry> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("ignoring corrupt leaderboard {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    // Hand-edited files may be unsorted or hold impossible scores
    entries.retain(|entry| {
        let keep = entry.score <= MAX_SCORE;
        if !keep {
            log::warn!("dropping leaderboard entry {:?} with score {}", entry.name, entry.score);
        }
        keep
    });
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(Leaderboard::CAPACITY);
    entries
}

pub fn save(path: &Path, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
    let json = serde_json::to_string_pretty(entries)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    Ok(())
}
