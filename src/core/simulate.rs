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

//! Compiles and runs a testbench with GHDL, then checks its results.

use crate::core::exec::Executor;
use crate::core::fileset::{self, FileSet};
use crate::core::validate::args;
use crate::error::{Error, Fault};
use std::path::Path;

/// Directory within a testbench holding simulation outputs.
pub const SIMULATION_DIR: &str = "simulation";

pub const DEFAULT_STOP_TIME: &str = "41280ns";

/// Fixture a testbench may provide to check its produced results against.
pub const EXPECTED_FILE: &str = "expected.sim";
/// File a testbench writes its results to.
pub const RESULTS_FILE: &str = "results.sim";

const GHDL_FLAGS: [&str; 13] = [
    "--ieee=synopsys",
    "--std=93c",
    "--vital-checks",
    "--warn-binding",
    "--warn-reserved",
    "--warn-library",
    "--warn-vital-generic",
    "--warn-delayed-checks",
    "--warn-body",
    "--warn-specs",
    "--warn-unused",
    "--warn-error",
    "--workdir=simulation",
];

/// Derives the simulation unit name from the testbench's top file name.
pub fn unit_name(top: &str) -> String {
    match Path::new(top).file_stem() {
        Some(s) => s.to_string_lossy().to_string(),
        None => top.to_string(),
    }
}

/// Analyzes `files`, elaborates `unit` and runs it until `stop_time`, all from
/// the testbench directory `tb`.
pub fn simulate(
    tb: &Path,
    unit: &str,
    files: &FileSet,
    stop_time: Option<&String>,
    exec: &dyn Executor,
) -> Result<(), Fault> {
    let mut analyze = vec![String::from("-i")];
    analyze.extend(ghdl_flags());
    analyze.extend(files.iter().cloned());
    exec.run("ghdl", &analyze, tb)?;

    let binary = format!("{}/{}", SIMULATION_DIR, unit);
    let mut elaborate = vec![String::from("-m")];
    elaborate.extend(ghdl_flags());
    elaborate.extend(args(&["-o", binary.as_str(), unit]));
    exec.run("ghdl", &elaborate, tb)?;

    let stop_time = stop_time.map(|s| s.as_str()).unwrap_or(DEFAULT_STOP_TIME);
    exec.run(
        &fileset::standardize(&tb.join(&binary)),
        &[
            format!("--stop-time={}", stop_time),
            format!("--wave={}.ghw", binary),
        ],
        tb,
    )
}

fn ghdl_flags() -> Vec<String> {
    let mut flags = args(&GHDL_FLAGS);
    flags.push(String::from("--work=work"));
    flags
}

/// Compares the results the testbench in `tb` produced against its expected fixture.
///
/// A testbench without a fixture always passes.
pub fn compare_results(tb: &Path) -> Result<(), Fault> {
    let expected = tb.join(EXPECTED_FILE);
    if expected.exists() == false {
        return Ok(());
    }
    let results = tb.join(RESULTS_FILE);
    if results.exists() == false {
        return Err(Error::MissingResult(tb.to_path_buf()))?;
    }
    match std::fs::read(&expected)? == std::fs::read(&results)? {
        true => Ok(()),
        false => Err(Error::SimulationMismatch(tb.to_path_buf()))?,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::exec::recorder::Recorder;
    use std::fs;

    #[test]
    fn unit_from_top() {
        assert_eq!(unit_name("tb_alu8.vhdl"), "tb_alu8");
        assert_eq!(unit_name("src/tb_top.vhd"), "tb_top");
    }

    #[test]
    fn ghdl_stages() {
        let dir = tempfile::tempdir().unwrap();
        let exec = Recorder::new();
        let files: FileSet = vec![String::from("tb_alu8.vhdl"), String::from("../alu8.vhdl")]
            .into_iter()
            .collect();
        simulate(dir.path(), "tb_alu8", &files, None, &exec).unwrap();

        let calls = exec.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].args[0], "-i");
        assert_eq!(
            calls[0].args[calls[0].args.len() - 2..],
            [String::from("../alu8.vhdl"), String::from("tb_alu8.vhdl")]
        );
        assert_eq!(calls[1].args[0], "-m");
        assert_eq!(calls[1].args.last().unwrap(), "tb_alu8");
        assert_eq!(calls[1].args.contains(&String::from("simulation/tb_alu8")), true);
        assert_eq!(calls[2].command.ends_with("simulation/tb_alu8"), true);
        assert_eq!(
            calls[2].args,
            vec![
                String::from("--stop-time=41280ns"),
                String::from("--wave=simulation/tb_alu8.ghw")
            ]
        );
        assert_eq!(calls.iter().all(|c| c.cwd == dir.path()), true);
    }

    #[test]
    fn custom_stop_time() {
        let dir = tempfile::tempdir().unwrap();
        let exec = Recorder::new();
        simulate(
            dir.path(),
            "tb",
            &FileSet::new(),
            Some(&String::from("10us")),
            &exec,
        )
        .unwrap();
        assert_eq!(exec.calls()[2].args[0], "--stop-time=10us");
    }

    #[test]
    fn result_comparison() {
        let dir = tempfile::tempdir().unwrap();
        let tb = dir.path();
        // no fixture
        assert_eq!(compare_results(tb).is_ok(), true);

        fs::write(tb.join(EXPECTED_FILE), "00\n01\n").unwrap();
        let e = compare_results(tb).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::MissingResult(tb.to_path_buf()))
        );

        fs::write(tb.join(RESULTS_FILE), "00\n11\n").unwrap();
        let e = compare_results(tb).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::SimulationMismatch(tb.to_path_buf()))
        );

        fs::write(tb.join(RESULTS_FILE), "00\n01\n").unwrap();
        assert_eq!(compare_results(tb).is_ok(), true);
    }
}
