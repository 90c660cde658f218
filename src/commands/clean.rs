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

use crate::commands::helps::clean;
use crate::core::context::Context;
use crate::core::simulate::{RESULTS_FILE, SIMULATION_DIR};
use crate::core::validate::SYNTHESIS_DIR;
use crate::core::walk;
use crate::error::Fault;
use crate::util::filesystem;
use std::path::Path;

use cliproc::{cli, proc, stage::*};
use cliproc::{Cli, Help, Subcommand};

/// Files written by the vendor toolchains.
const OUTPUT_PATTERNS: [&str; 54] = [
    "*.bak", "*.bgn", "*.bit", "*.bld", "*.cmd", "*.cmd_log", "*.csv", "*.csvf", "*.done",
    "*.dpf", "*.drc", "*.edif", "*.gise", "*.html", "*.ise", "*.jdi", "*.log", "*.lso", "*.map",
    "*.mrp", "*.ncd", "*.ngc", "*.ngd", "*.ngm", "*.ngr", "*.ntrc_log", "*.pad", "*.par",
    "*.pcf", "*.pin", "*.pof", "*.prj", "*.ptwx", "*.qpf", "*.qsf", "*.rpt", "*.sdc", "*.smsg",
    "*.sof", "*.srf", "*.stx", "*.summary", "*.svf", "*.syr", "*.twr", "*.twx", "*.txt",
    "*.unroutes", "*.xml", "*.xpi", "*.xrpt", "*.xsvf", "*.xwbt", RESULTS_FILE,
];

/// Directories written by the vendor toolchains.
const OUTPUT_DIRS: [&str; 10] = [
    "xst",
    "db",
    "incremental_db",
    "_ngo",
    "_xmsgs",
    "auto_project_xdb",
    "iseconfig",
    "xlnx_auto_0_xdb",
    SIMULATION_DIR,
    SYNTHESIS_DIR,
];

#[derive(Debug, PartialEq)]
pub struct Clean;

impl Subcommand<Context> for Clean {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(clean::HELP))?;
        Ok(Clean)
    }

    fn execute(self, _: &Context) -> proc::Result {
        let cwd = std::env::current_dir()?;
        Self::clean(&cwd)?;
        Ok(())
    }
}

impl Clean {
    /// Removes toolchain outputs from `dir` and each of its testbenches.
    fn clean(dir: &Path) -> Result<(), Fault> {
        for pattern in OUTPUT_PATTERNS {
            filesystem::wildcard_delete(dir, pattern)?;
        }
        let dirs: Vec<_> = OUTPUT_DIRS.iter().map(|d| dir.join(d)).collect();
        filesystem::remove(&dirs)?;
        for tb in walk::testbenches(dir)? {
            Self::clean(&tb)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn clean_recurses_into_testbenches() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for f in [
            "hdlmake.toml",
            "top.vhdl",
            "top_level.bit",
            "top_level.syr",
            "tb_top/hdlmake.toml",
            "tb_top/results.sim",
            "tb_top/expected.sim",
            "tb_top/simulation/TIMESTAMP",
            "synthesis/TIMESTAMP",
            "_xmsgs/xst.xmsgs",
        ] {
            let path = root.join(f);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        Clean::clean(root).unwrap();
        assert_eq!(
            filesystem::glob_names(root, "*").unwrap(),
            vec!["hdlmake.toml", "tb_top", "top.vhdl"]
        );
        assert_eq!(
            filesystem::glob_names(&root.join("tb_top"), "*").unwrap(),
            vec!["expected.sim", "hdlmake.toml"]
        );
    }
}
