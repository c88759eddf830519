//! Puzzle inputs read from a local data directory

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based store of puzzle inputs
///
/// Looks for `{dir}/{year}/day_{day}.txt` first, then `{dir}/day_{day}.txt`.
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Candidate paths for a year/day, most specific first
    pub fn candidates(&self, year: u16, day: u8) -> [PathBuf; 2] {
        let file = format!("day_{}.txt", day);
        [self.dir.join(year.to_string()).join(&file), self.dir.join(file)]
    }

    /// First candidate that exists on disk
    pub fn path(&self, year: u16, day: u8) -> Option<PathBuf> {
        self.candidates(year, day).into_iter().find(|p| p.is_file())
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_some()
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day).ok_or_else(|| InputError::Missing {
            year,
            day,
            searched: self.candidates(year, day).to_vec(),
        })?;
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing {
                year,
                day,
                searched: vec![path.clone()],
            },
            _ => InputError::Io { path, source },
        })
    }
}
