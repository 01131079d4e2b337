//! Replay script loading and validation.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::{Position, PositionError};

/// Errors when loading or validating a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Failed to read the script file.
    #[error("Failed to read script: {0}")]
    Io(#[from] io::Error),

    /// The script is not valid JSON.
    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    /// A fix carries out-of-range coordinates.
    #[error("Fix {index} is invalid: {source}")]
    InvalidFix {
        index: usize,
        source: PositionError,
    },

    /// Fix offsets must be monotonically non-decreasing.
    #[error("Fix {index} has offset {offset_ms}ms before its predecessor")]
    NonMonotonicOffset { index: usize, offset_ms: u64 },
}

/// One scheduled fix in a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFix {
    /// Offset from script start at which this fix is installed.
    pub offset_ms: u64,
    /// The position to install as the override.
    pub position: Position,
}

impl ReplayFix {
    /// The offset as a `Duration`.
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms)
    }
}

/// A validated sequence of timed fixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    fixes: Vec<ReplayFix>,
}

impl ReplayScript {
    /// Creates a script from fixes, validating coordinates and offset
    /// ordering.
    pub fn new(fixes: Vec<ReplayFix>) -> Result<Self, ReplayError> {
        let script = Self { fixes };
        script.validate()?;
        Ok(script)
    }

    /// Loads and validates a script from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_reader(reader)?;
        script.validate()?;
        Ok(script)
    }

    /// Loads and validates a script from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn validate(&self) -> Result<(), ReplayError> {
        let mut previous = 0u64;
        for (index, fix) in self.fixes.iter().enumerate() {
            fix.position
                .validate()
                .map_err(|source| ReplayError::InvalidFix { index, source })?;
            if fix.offset_ms < previous {
                return Err(ReplayError::NonMonotonicOffset {
                    index,
                    offset_ms: fix.offset_ms,
                });
            }
            previous = fix.offset_ms;
        }
        Ok(())
    }

    /// The scheduled fixes, in order.
    pub fn fixes(&self) -> &[ReplayFix] {
        &self.fixes
    }

    /// Number of fixes.
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// Whether the script contains no fixes.
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Time from script start to the last fix.
    pub fn duration(&self) -> Duration {
        self.fixes
            .last()
            .map(ReplayFix::offset)
            .unwrap_or(Duration::ZERO)
    }
}
