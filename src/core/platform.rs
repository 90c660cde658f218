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
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const PLATFORM_FILE: &str = "platform.toml";

/// Name of the directory beside a template holding its platforms.
const PLATFORMS_DIR: &str = "platforms";

#[derive(Debug, PartialEq, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Xilinx,
    Altera,
    Cpld,
}

/// Board settings for one platform of a template.
#[derive(Debug, PartialEq, Deserialize)]
pub struct Platform {
    vendor: Vendor,
    fpga: Option<String>,
    device: Option<String>,
    map_flags: Option<String>,
    par_flags: Option<String>,
    #[serde(skip)]
    dir: PathBuf,
}

impl FromStr for Platform {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Platform {
    /// Locates the directory of `platform` for the template at `template`.
    ///
    /// Platforms live beside the template: `<template>/../platforms/<platform>`.
    pub fn locate(template: &Path, platform: &str) -> PathBuf {
        template
            .parent()
            .unwrap_or(Path::new(""))
            .join(PLATFORMS_DIR)
            .join(platform)
    }

    /// Loads the platform file from `dir`, which is read relative to `cwd`.
    pub fn load(cwd: &Path, dir: &Path) -> Result<Self, Fault> {
        let path = cwd.join(dir).join(PLATFORM_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => return Err(Error::InvalidPlatform(path, LastError(e.to_string())))?,
        };
        let mut platform = match Self::from_str(&text) {
            Ok(p) => p,
            Err(e) => return Err(Error::InvalidPlatform(path, LastError(e.to_string())))?,
        };
        platform.dir = dir.to_path_buf();
        Ok(platform)
    }

    pub fn get_vendor(&self) -> Vendor {
        self.vendor
    }

    /// Composes the path to a file stored in the platform directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn get_fpga(&self) -> Result<&String, Fault> {
        self.require("fpga", self.fpga.as_ref())
    }

    pub fn get_device(&self) -> Result<&String, Fault> {
        self.require("device", self.device.as_ref())
    }

    pub fn get_map_flags(&self) -> &str {
        self.map_flags.as_deref().unwrap_or_default()
    }

    pub fn get_par_flags(&self) -> &str {
        self.par_flags.as_deref().unwrap_or_default()
    }

    fn require<'a>(&self, key: &str, value: Option<&'a String>) -> Result<&'a String, Fault> {
        match value {
            Some(v) => Ok(v),
            None => Err(Error::InvalidPlatform(
                self.file(PLATFORM_FILE),
                LastError(format!("missing key \"{}\" for vendor {:?}", key, self.vendor)),
            ))?,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn locate_beside_template() {
        assert_eq!(
            Platform::locate(Path::new("../templates/fx2all/vhdl"), "nexys2-1200"),
            PathBuf::from("../templates/fx2all/platforms/nexys2-1200")
        );
    }

    #[test]
    fn parse_xilinx() {
        let p = Platform::from_str(
            "vendor = \"xilinx\"\nfpga = \"xc3s1200e-fg320-4\"\nmap_flags = \"-global_opt speed\"\n",
        )
        .unwrap();
        assert_eq!(p.get_vendor(), Vendor::Xilinx);
        assert_eq!(p.get_fpga().unwrap(), "xc3s1200e-fg320-4");
        assert_eq!(p.get_map_flags(), "-global_opt speed");
        assert_eq!(p.get_par_flags(), "");
        assert_eq!(p.get_device().is_err(), true);
    }

    #[test]
    fn reject_unknown_vendor() {
        assert_eq!(Platform::from_str("vendor = \"lattice\"\n").is_err(), true);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let e = Platform::load(dir.path(), Path::new("platforms/atlys")).unwrap_err();
        assert_eq!(
            matches!(e.downcast_ref::<Error>(), Some(Error::InvalidPlatform(_, _))),
            true
        );
    }
}
