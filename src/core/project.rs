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

//! Text generation for the project files handed to vendor toolchains.

use crate::core::fileset::FileSet;
use std::path::Path;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Language {
    Vhdl,
    Verilog,
}

impl Language {
    /// Classifies a source by its extension; anything else is not fed to a toolchain.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "vhd" | "vhdl" => Some(Self::Vhdl),
            "v" => Some(Self::Verilog),
            _ => None,
        }
    }

    fn as_xst(&self) -> &str {
        match self {
            Self::Vhdl => "vhdl",
            Self::Verilog => "verilog",
        }
    }

    fn as_quartus(&self) -> &str {
        match self {
            Self::Vhdl => "VHDL_FILE",
            Self::Verilog => "VERILOG_FILE",
        }
    }
}

/// Writes an XST `.prj` listing, one `<lang> work "<path>"` line per source.
pub fn xst_project<'a, I>(files: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    files
        .into_iter()
        .filter_map(|f| Language::from_path(f).map(|l| (l, f)))
        .map(|(l, f)| format!("{} work \"{}\"\n", l.as_xst(), f))
        .collect()
}

/// Writes the Quartus settings lines assigning every source to the project.
pub fn quartus_assignments<'a, I>(files: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    files
        .into_iter()
        .filter_map(|f| Language::from_path(f).map(|l| (l, f)))
        .map(|(l, f)| format!("set_global_assignment -name {} {}\n", l.as_quartus(), f))
        .collect()
}

/// Writes the XST script synthesizing `top` from `top_level.prj` for `device`.
pub fn xst_script(top: &str, device: &str) -> String {
    let mut script = String::new();
    script.push_str("set -tmpdir \"xst/projnav.tmp\"\n");
    script.push_str("set -xsthdpdir \"xst\"\n");
    script.push_str("run\n");
    script.push_str("-ifn top_level.prj\n");
    script.push_str("-ifmt mixed\n");
    script.push_str(&format!("-ofn {}\n", top));
    script.push_str("-ofmt NGC\n");
    script.push_str(&format!("-p {}\n", device));
    script.push_str(&format!("-top {}\n", top));
    script.push_str("-opt_mode Speed\n");
    script.push_str("-opt_level 1\n");
    script
}

/// Returns the set as seen from the direct subdirectory a tool runs in.
pub fn child_view(files: &FileSet) -> FileSet {
    files.clone().rebase_to_child()
}

#[cfg(test)]
mod test {
    use super::*;

    fn set(files: &[&str]) -> FileSet {
        files.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn xst_listing_skips_unknown() {
        let files = set(&["a.vhd", "b.V", "c.ucf", "d.vhdl"]);
        assert_eq!(
            xst_project(&files),
            "vhdl work \"a.vhd\"\nverilog work \"b.V\"\nvhdl work \"d.vhdl\"\n"
        );
    }

    #[test]
    fn quartus_listing() {
        let files = child_view(&set(&["top.vhdl", "uart.v"]));
        assert_eq!(
            quartus_assignments(&files),
            "set_global_assignment -name VHDL_FILE ../top.vhdl\nset_global_assignment -name VERILOG_FILE ../uart.v\n"
        );
    }

    #[test]
    fn xst_script_names_top() {
        let script = xst_script("alu8", "xc6slx9-2-tqg144");
        assert_eq!(script.contains("-top alu8\n"), true);
        assert_eq!(script.contains("-ofn alu8\n"), true);
        assert_eq!(script.contains("-p xc6slx9-2-tqg144\n"), true);
    }
}
