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

use crate::error::{Error, Fault, LastError};
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const MANIFEST_FILE: &str = "hdlmake.toml";

/// The declarative description of one directory's build unit.
///
/// The first entry of `sources` is the canonical "top" file for the directory.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Manifest {
    sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    artifacts: Vec<String>,
    generate: Option<String>,
    stop_time: Option<String>,
    signals: Option<Vec<String>>,
    sigmaps: Option<BTreeMap<String, SignalMap>>,
    /// Tool-specific keys passed through untouched.
    #[serde(flatten)]
    metadata: toml::Table,
}

/// Translates raw values of one waveform signal into readable names.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct SignalMap {
    name: String,
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl SignalMap {
    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl FromStr for Manifest {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Manifest {
    /// Reads the manifest stored in the directory `dir`.
    ///
    /// Every call reads from storage, so files written by a generation rule are
    /// always observed. Errors if the file is missing, fails to parse, or
    /// lists no sources.
    pub fn load(dir: &Path) -> Result<Self, Fault> {
        let path = Self::path_in(dir);
        if path.is_file() == false {
            return Err(Error::MissingManifest(dir.to_path_buf()))?;
        }
        let contents = std::fs::read_to_string(&path)?;
        let man = match Self::from_str(&contents) {
            Ok(m) => m,
            Err(e) => return Err(Error::InvalidManifest(path, LastError(e.to_string())))?,
        };
        if man.sources.is_empty() == true {
            return Err(Error::EmptySources(path))?;
        }
        Ok(man)
    }

    /// Checks if the directory `dir` declares a manifest.
    pub fn exists(dir: &Path) -> bool {
        dir.join(MANIFEST_FILE).is_file()
    }

    /// References the first declared source.
    pub fn get_top(&self) -> &String {
        &self.sources[0]
    }

    pub fn get_sources(&self) -> &Vec<String> {
        &self.sources
    }

    pub fn get_artifacts(&self) -> &Vec<String> {
        &self.artifacts
    }

    pub fn get_generate(&self) -> Option<&String> {
        self.generate.as_ref()
    }

    pub fn get_stop_time(&self) -> Option<&String> {
        self.stop_time.as_ref()
    }

    pub fn get_signals(&self) -> Option<&Vec<String>> {
        self.signals.as_ref()
    }

    pub fn get_sigmaps(&self) -> Option<&BTreeMap<String, SignalMap>> {
        self.sigmaps.as_ref()
    }

    pub fn get_metadata(&self) -> &toml::Table {
        &self.metadata
    }

    /// Returns the path to the manifest file living in `dir`.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EX1: &str = r#"sources = ["top_level.vhdl", "+/makestuff/comm-fpga"]
"#;

    const EX2: &str = r#"sources = ["fifo.vhd"]
artifacts = ["fifo.ngc"]
generate = "coregen -b fifo.batch"
board = "atlys"
"#;

    const EX3: &str = r#"sources = ["tb_alu.vhdl"]
stop_time = "12us"
signals = ["top.tb_alu.clk", "---", "top.tb_alu.result[7:0]"]

[sigmaps.state]
name = "uut.state"
"00" = "IDLE"
"01" = "BUSY"
"#;

    #[test]
    fn ut_minimal() {
        let man = Manifest::from_str(EX1).unwrap();
        assert_eq!(man.get_top(), "top_level.vhdl");
        assert_eq!(man.get_sources().len(), 2);
        assert_eq!(man.get_artifacts().is_empty(), true);
        assert_eq!(man.get_generate(), None);
        assert_eq!(man.get_metadata().is_empty(), true);
    }

    #[test]
    fn ut_generated_block() {
        let man = Manifest::from_str(EX2).unwrap();
        assert_eq!(man.get_artifacts(), &vec![String::from("fifo.ngc")]);
        assert_eq!(
            man.get_generate(),
            Some(&String::from("coregen -b fifo.batch"))
        );
        // unknown keys pass through
        assert_eq!(
            man.get_metadata().get("board").and_then(|v| v.as_str()),
            Some("atlys")
        );
    }

    #[test]
    fn ut_testbench_keys() {
        let man = Manifest::from_str(EX3).unwrap();
        assert_eq!(man.get_stop_time(), Some(&String::from("12us")));
        assert_eq!(man.get_signals().unwrap()[1], "---");
        let state = man.get_sigmaps().unwrap().get("state").unwrap();
        assert_eq!(state.get_name(), "uut.state");
        assert_eq!(state.get_values().get("01"), Some(&String::from("BUSY")));
        assert_eq!(state.get_values().len(), 2);
    }

    #[test]
    fn ut_bad() {
        assert_eq!(Manifest::from_str("artifacts = [\"a.ngc\"]\n").is_err(), true);
        assert_eq!(Manifest::from_str("sources = 1\n").is_err(), true);
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let e = Manifest::load(dir.path()).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::MissingManifest(dir.path().to_path_buf()))
        );

        std::fs::write(Manifest::path_in(dir.path()), "sources = []\n").unwrap();
        let e = Manifest::load(dir.path()).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::EmptySources(Manifest::path_in(dir.path())))
        );

        std::fs::write(Manifest::path_in(dir.path()), EX2).unwrap();
        assert_eq!(Manifest::load(dir.path()).unwrap().get_top(), "fifo.vhd");
    }
}
