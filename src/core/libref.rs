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

//! A library reference is a manifest `sources` entry that names another
//! directory instead of a single HDL file.

use crate::error::Error;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Marks an import from the shared top-level library area.
pub const LIBRARY_PREFIX: &str = "+/";

/// The `<owner>/<name>` identity of a library hosted on a remote archive.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct LibraryId {
    owner: String,
    name: String,
}

impl LibraryId {
    pub fn get_owner(&self) -> &str {
        &self.owner
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Computes where this library lives within the library area `libs`.
    pub fn local_dir(&self, libs: &Path) -> PathBuf {
        libs.join(&self.owner).join(&self.name)
    }

    /// Verifies a part is nonempty and only holds `ascii alphanumeric`, `-`, `_`, or `.`.
    fn is_valid_part(s: &str) -> bool {
        s.is_empty() == false
            && s != "."
            && s != ".."
            && s.chars()
                .find(|&c| !c.is_ascii_alphanumeric() && c != '_' && c != '-' && c != '.')
                .is_none()
    }
}

impl FromStr for LibraryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name))
                if Self::is_valid_part(owner) == true && Self::is_valid_part(name) == true =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::InvalidLibraryId(s.to_string())),
        }
    }
}

impl Display for LibraryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A classified entry from a manifest's `sources` list.
#[derive(Debug, PartialEq)]
pub enum SourceRef {
    /// `+/<owner>/<name>[/<subpath>]` into the library area.
    Library(LibraryId, Option<String>),
    /// A path relative to the manifest's directory (file or nested library).
    Relative(String),
}

impl SourceRef {
    /// Classifies an entry whose variables were already substituted.
    pub fn classify(entry: &str) -> Result<Self, Error> {
        match entry.strip_prefix(LIBRARY_PREFIX) {
            Some(rest) => {
                let mut parts = rest.splitn(3, '/');
                let owner = parts.next().unwrap_or_default();
                let name = parts.next().unwrap_or_default();
                let id = LibraryId::from_str(&format!("{}/{}", owner, name))
                    .map_err(|_| Error::InvalidLibraryId(entry.to_string()))?;
                let subpath = parts
                    .next()
                    .map(|p| p.trim_end_matches('/').to_string())
                    .filter(|p| p.is_empty() == false);
                Ok(Self::Library(id, subpath))
            }
            None => Ok(Self::Relative(entry.to_string())),
        }
    }

    /// Checks if `entry` imports from the library area without fully classifying it.
    pub fn is_library(entry: &str) -> bool {
        entry.starts_with(LIBRARY_PREFIX)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_id() {
        let id = LibraryId::from_str("makestuff/comm-fpga").unwrap();
        assert_eq!(id.get_owner(), "makestuff");
        assert_eq!(id.get_name(), "comm-fpga");
        assert_eq!(id.to_string(), "makestuff/comm-fpga");
        assert_eq!(
            id.local_dir(Path::new("/opt/libs")),
            PathBuf::from("/opt/libs/makestuff/comm-fpga")
        );

        assert_eq!(LibraryId::from_str("makestuff").is_err(), true);
        assert_eq!(LibraryId::from_str("/corelib").is_err(), true);
        assert_eq!(LibraryId::from_str("acme/core/lib").is_err(), true);
        assert_eq!(LibraryId::from_str("acme/..").is_err(), true);
    }

    #[test]
    fn classify_entries() {
        assert_eq!(
            SourceRef::classify("+/acme/corelib").unwrap(),
            SourceRef::Library(LibraryId::from_str("acme/corelib").unwrap(), None)
        );
        assert_eq!(
            SourceRef::classify("+/acme/corelib/vhdl/fifo/").unwrap(),
            SourceRef::Library(
                LibraryId::from_str("acme/corelib").unwrap(),
                Some(String::from("vhdl/fifo"))
            )
        );
        assert_eq!(
            SourceRef::classify("src/alu.vhdl").unwrap(),
            SourceRef::Relative(String::from("src/alu.vhdl"))
        );
        assert_eq!(
            SourceRef::classify("+/acme").unwrap_err(),
            Error::InvalidLibraryId(String::from("+/acme"))
        );
        assert_eq!(SourceRef::is_library("+/acme/corelib"), true);
        assert_eq!(SourceRef::is_library("acme/corelib"), false);
    }
}
