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

//! A synthesis-only dry run that checks an application's HDL compiles cleanly.

use crate::core::exec::Executor;
use crate::core::fileset::FileSet;
use crate::core::project;
use crate::core::resolver::Resolution;
use crate::core::toplevel;
use crate::core::witness::Witness;
use crate::error::{Error, Fault, Hint};
use colored::Colorize;
use std::path::Path;
use std::str::FromStr;

/// Directory within the application holding validation outputs.
pub const SYNTHESIS_DIR: &str = "synthesis";

const XST_DEVICE: &str = "xc6slx9-2-tqg144";
const QUARTUS_FAMILY: &str = "Cyclone II";
const QUARTUS_DEVICE: &str = "EP2C5T144C8";

/// XST warning codes reported but tolerated.
const XST_WARN_CODES: [&str; 1] = ["647"];
/// XST warning codes dropped entirely.
const XST_IGNORE_CODES: [&str; 1] = ["2036"];

const XST_WARNING_KEY: &str = "XST_NUMBER_OF_WARNINGS\" value=\"";
const QUARTUS_SUMMARY: &str = "Info: Quartus II Analysis & Synthesis was successful. ";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Validator {
    Xilinx,
    Altera,
}

impl FromStr for Validator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Self::Xilinx),
            "a" => Ok(Self::Altera),
            _ => Err(Error::UnsupportedValidator(s.to_string(), Hint::ValidatorList)),
        }
    }
}

/// Validates the application in `root` whose sources were resolved into `res`.
///
/// Nothing runs if the synthesis witness is newer than every source, unless
/// `force` is set.
pub fn validate(
    tool: Validator,
    root: &Path,
    res: &Resolution,
    exec: &dyn Executor,
    force: bool,
) -> Result<(), Fault> {
    res.get_files().display();
    let syn_dir = root.join(SYNTHESIS_DIR);
    let witness = Witness::in_dir(&syn_dir);
    if force == false && witness.is_stale(res.get_files(), root)? == false {
        println!("HDL validation: Nothing to do");
        return Ok(());
    }
    println!("HDL validation:");
    std::fs::create_dir_all(&syn_dir)?;
    witness.reset()?;

    let top = toplevel::extract_top_name(&root.join(res.get_top()))?;
    println!("info: deduced top-level entity: {}", top);

    let files = project::child_view(res.get_files());
    match tool {
        Validator::Xilinx => run_xst(&syn_dir, &top, &files, exec)?,
        Validator::Altera => run_quartus(&syn_dir, &top, &files, exec)?,
    }
    witness.touch()
}

fn run_xst(dir: &Path, top: &str, files: &FileSet, exec: &dyn Executor) -> Result<(), Fault> {
    std::fs::write(dir.join("top_level.prj"), project::xst_project(files))?;
    std::fs::write(dir.join("top_level.xst"), project::xst_script(top, XST_DEVICE))?;
    std::fs::create_dir_all(dir.join("xst").join("projnav.tmp"))?;
    exec.run(
        "xst",
        &args(&["-intstyle", "ise", "-ifn", "top_level.xst", "-ofn", "top_level.syr"]),
        dir,
    )?;

    let report = dir.join(format!("{}_xst.xrpt", top));
    let count = match xst_warning_count(&std::fs::read_to_string(&report)?) {
        Some(n) => n,
        None => return Err(Error::ReportMissingSummary(report))?,
    };
    if count == 0 {
        return Ok(());
    }
    let summary = XstSummary::scan(&std::fs::read_to_string(dir.join("top_level.syr"))?);
    summary.report()
}

fn run_quartus(dir: &Path, top: &str, files: &FileSet, exec: &dyn Executor) -> Result<(), Fault> {
    let mut qsf = String::new();
    qsf.push_str(&format!("set_global_assignment -name FAMILY \"{}\"\n", QUARTUS_FAMILY));
    qsf.push_str(&format!("set_global_assignment -name DEVICE {}\n", QUARTUS_DEVICE));
    qsf.push_str(&format!("set_global_assignment -name TOP_LEVEL_ENTITY {}\n", top));
    qsf.push_str(&project::quartus_assignments(files));
    std::fs::write(dir.join("top_level.qsf"), qsf)?;
    exec.run("quartus_map", &quartus_args(), dir)?;

    let report = dir.join("top_level.map.rpt");
    let (errors, warnings) = match quartus_summary(&std::fs::read_to_string(&report)?) {
        Some(s) => s,
        None => return Err(Error::ReportMissingSummary(report))?,
    };
    match errors + warnings {
        0 => Ok(()),
        _ => Err(Error::SynthesisProblems(errors, warnings))?,
    }
}

pub fn quartus_args() -> Vec<String> {
    args(&[
        "--parallel=1",
        "--read_settings_files=on",
        "--write_settings_files=off",
        "top_level",
        "-c",
        "top_level",
    ])
}

pub fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Finds the number of warnings recorded in an XST `.xrpt` report.
fn xst_warning_count(report: &str) -> Option<usize> {
    report.lines().find_map(|line| {
        let i = line.find(XST_WARNING_KEY)?;
        leading_number(&line[i + XST_WARNING_KEY.len()..])
    })
}

/// Finds the `(errors, warnings)` counts in a Quartus map report.
fn quartus_summary(report: &str) -> Option<(usize, usize)> {
    report.lines().find_map(|line| {
        let rest = line.strip_prefix(QUARTUS_SUMMARY)?;
        let (errors, rest) = rest.split_once(" errors, ")?;
        let warnings = rest.strip_suffix(" warnings").unwrap_or(rest);
        Some((errors.parse().ok()?, leading_number(warnings)?))
    })
}

fn leading_number(s: &str) -> Option<usize> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Classified `WARNING:Xst:<code> - <msg>` lines of an XST `.syr` log.
#[derive(Debug, PartialEq, Default)]
struct XstSummary {
    warnings: Vec<String>,
    errors: Vec<String>,
    ignored: usize,
}

impl XstSummary {
    fn scan(log: &str) -> Self {
        let mut summary = Self::default();
        for line in log.lines() {
            let (code, msg) = match line
                .strip_prefix("WARNING:Xst:")
                .and_then(|rest| rest.split_once(" - "))
            {
                Some((c, m)) => (c.trim(), m.trim()),
                None => continue,
            };
            if code.chars().all(|c| c.is_ascii_digit()) == false {
                continue;
            }
            let entry = format!("\n  {}: {}", code, msg);
            if XST_WARN_CODES.contains(&code) {
                summary.warnings.push(entry);
            } else if XST_IGNORE_CODES.contains(&code) {
                summary.ignored += 1;
            } else {
                summary.errors.push(entry);
            }
        }
        summary
    }

    fn report(&self) -> Result<(), Fault> {
        if self.warnings.is_empty() == false {
            let ignored = match self.ignored {
                0 => String::new(),
                n => format!(" (ignored {})", n),
            };
            println!(
                "\n{}: found {} warnings{}:{}\n",
                "warning".yellow(),
                self.warnings.len(),
                ignored,
                self.warnings.concat()
            );
        }
        match self.errors.is_empty() {
            true => Ok(()),
            false => Err(Error::SynthesisErrors(self.errors.len(), self.errors.concat()))?,
        }
    }
}
