//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! A witness is a sentinel file whose modification time records when a
//! target area was last produced successfully.

use crate::core::fileset::FileSet;
use crate::error::Fault;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const WITNESS_FILE: &str = "TIMESTAMP";

#[derive(Debug, PartialEq, Clone)]
pub struct Witness {
    path: PathBuf,
}

impl Witness {
    /// References the witness kept inside the target area `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(WITNESS_FILE),
        }
    }

    pub fn get_path(&self) -> &PathBuf {
        &self.path
    }

    /// Checks if any file in `files` (relative to `root`) is newer than the witness.
    pub fn is_stale(&self, files: &FileSet, root: &Path) -> Result<bool, Fault> {
        is_stale(&self.path, files.iter().map(|f| root.join(f)))
    }

    /// Creates the witness dated at the epoch, so that an interrupted stage is
    /// always considered stale.
    pub fn reset(&self) -> Result<(), Fault> {
        self.stamp(UNIX_EPOCH)
    }

    /// Dates the witness to the current time, marking the target area fresh.
    pub fn touch(&self) -> Result<(), Fault> {
        self.stamp(SystemTime::now())
    }

    fn stamp(&self, time: SystemTime) -> Result<(), Fault> {
        let file = File::options()
            .write(true)
            .create(true)
            .open(&self.path)?;
        file.set_modified(time)?;
        Ok(())
    }
}

/// Decides if the target whose witness lives at `witness` must be rebuilt.
///
/// Returns `true` if the witness does not exist or if any dependency was
/// modified strictly after it. Stops at the first newer dependency. A
/// dependency that cannot be read is treated as newer, leaving the toolchain
/// to report it.
pub fn is_stale<I, P>(witness: &Path, deps: I) -> Result<bool, Fault>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    if witness.exists() == false {
        return Ok(true);
    }
    let built = std::fs::metadata(witness)?.modified()?;
    for dep in deps {
        let modified = match std::fs::metadata(dep.as_ref()).and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(_) => return Ok(true),
        };
        if modified > built {
            return Ok(true);
        }
    }
    Ok(false)
}
