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

use crate::error::{AnyError, Fault, LastError};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE: &str = "config.toml";

/// User settings read from the tool's home directory.
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    library: Option<LibraryConfig>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    path: Option<PathBuf>,
    url: Option<String>,
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Config {
    /// Reads the configuration file at `path`, if it exists.
    pub fn load(path: &Path) -> Result<Self, Fault> {
        if path.exists() == false {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        match Self::from_str(&text) {
            Ok(c) => Ok(c),
            Err(e) => Err(AnyError(format!(
                "failed to parse configuration file {:?}: {}",
                path,
                LastError(e.to_string())
            )))?,
        }
    }

    pub fn get_library_path(&self) -> Option<&PathBuf> {
        self.library.as_ref()?.path.as_ref()
    }

    pub fn get_library_url(&self) -> Option<&String> {
        self.library.as_ref()?.url.as_ref()
    }
}
