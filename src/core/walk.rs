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

//! The top-level walk over an application directory and its testbenches.
//!
//! A directory whose name starts with `tb_` is a testbench; any other
//! directory is an application. An application first runs every testbench
//! beneath it and only then dispatches the vendor build, so a failing test
//! stops the walk before anything is built.

use crate::core::exec::Executor;
use crate::core::fetch::Fetch;
use crate::core::fileset::FileSet;
use crate::core::manifest::Manifest;
use crate::core::platform::Platform;
use crate::core::resolver::{Resolution, Resolver};
use crate::core::simulate::{self, SIMULATION_DIR};
use crate::core::swap::VariableMap;
use crate::core::validate::{self, Validator};
use crate::core::vendor;
use crate::core::waves;
use crate::core::witness::Witness;
use crate::error::{Error, Fault, Hint};
use crate::util::filesystem;
use std::path::{Path, PathBuf};

pub const TESTBENCH_PREFIX: &str = "tb_";

/// Platform name bound while validating and simulating.
pub const SIM_PLATFORM: &str = "sim";

#[derive(Debug, PartialEq, Default)]
pub struct WalkOptions {
    pub validate: Option<Validator>,
    pub template: Option<PathBuf>,
    pub platform: Option<String>,
    pub waves: bool,
    pub ide: Option<PathBuf>,
    pub force: bool,
}

impl WalkOptions {
    /// Verifies a template and platform were requested together (or not at all).
    pub fn check(&self) -> Result<(), Fault> {
        match (&self.template, &self.platform) {
            (Some(_), None) => Err(Error::TemplateWithoutPlatform(Hint::PairTemplatePlatform))?,
            (None, Some(_)) => Err(Error::PlatformWithoutTemplate(Hint::PairTemplatePlatform))?,
            _ => Ok(()),
        }
    }
}

pub struct Walk<'a> {
    libs: &'a Path,
    fetcher: &'a dyn Fetch,
    exec: &'a dyn Executor,
    opts: WalkOptions,
}

impl<'a> Walk<'a> {
    pub fn new(
        libs: &'a Path,
        fetcher: &'a dyn Fetch,
        exec: &'a dyn Executor,
        opts: WalkOptions,
    ) -> Result<Self, Fault> {
        opts.check()?;
        Ok(Self {
            libs,
            fetcher,
            exec,
            opts,
        })
    }

    /// Walks the directory `dir`, choosing its role by its name.
    pub fn run(&self, dir: &Path) -> Result<(), Fault> {
        match is_testbench(dir) {
            true => self.testbench(dir, true),
            false => self.application(dir),
        }
    }

    fn resolver<'b>(&'b self, cwd: &'b Path) -> Resolver<'b> {
        Resolver::new(cwd, self.libs, self.fetcher, self.exec)
    }

    /// Resolves the manifest in `dir`, if it has one.
    fn resolve(&self, dir: &Path, vars: &VariableMap) -> Result<Option<Resolution>, Fault> {
        self.resolver(dir).resolve_dir(Path::new(""), vars)
    }

    fn application(&self, dir: &Path) -> Result<(), Fault> {
        if let Some(tool) = self.opts.validate {
            println!("[Validating HDLs]");
            self.validate(dir, tool)?;
        }
        println!("[Running tests]");
        for tb in testbenches(dir)? {
            self.testbench(&tb, false)?;
        }
        println!("[Finished testing]");
        if let (Some(template), Some(platform)) = (&self.opts.template, &self.opts.platform) {
            self.build(dir, template, platform)?;
        }
        Ok(())
    }

    fn validate(&self, dir: &Path, tool: Validator) -> Result<(), Fault> {
        match self.resolve(dir, &VariableMap::with_platform(SIM_PLATFORM))? {
            Some(res) => validate::validate(tool, dir, &res, self.exec, self.opts.force),
            None => Err(Error::MissingManifest(dir.to_path_buf()))?,
        }
    }

    /// Runs the testbench `tb`, validating its parent application first when
    /// `validate_parent` is set and validation was requested.
    fn testbench(&self, tb: &Path, validate_parent: bool) -> Result<(), Fault> {
        let name = tb
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("[Testbench: {}]", name);
        let vars = VariableMap::with_platform(SIM_PLATFORM);

        let man = Manifest::load(tb)?;
        let tb_res = self.resolver(tb).resolve(&man, Path::new(""), &vars)?;
        let unit = simulate::unit_name(tb_res.get_top());

        // the application under test lives in the parent directory
        let app_dir = tb.parent().unwrap_or(Path::new(".")).to_path_buf();
        if let (Some(tool), true) = (self.opts.validate, validate_parent) {
            self.validate(&app_dir, tool)?;
        }
        let mut files: FileSet = tb_res.into_files();
        if let Some(app) = self.resolve(&app_dir, &vars)? {
            files.merge(app.into_files().rebase_to_child());
        }

        let sim_dir = tb.join(SIMULATION_DIR);
        let witness = Witness::in_dir(&sim_dir);
        if self.opts.force == true || witness.is_stale(&files, tb)? == true {
            println!("HDL simulation:");
            if sim_dir.exists() == true {
                std::fs::remove_dir_all(&sim_dir)?;
            }
            std::fs::create_dir_all(&sim_dir)?;
            witness.reset()?;
            simulate::simulate(tb, &unit, &files, man.get_stop_time(), self.exec)?;
            simulate::compare_results(tb)?;
            witness.touch()?;
        } else {
            println!("HDL simulation: Nothing to do");
        }

        if self.opts.waves == true {
            if let Some(signals) = man.get_signals() {
                waves::show(tb, &unit, signals, man.get_sigmaps(), self.exec)?;
            }
        }
        Ok(())
    }

    fn build(&self, dir: &Path, template: &Path, platform: &str) -> Result<(), Fault> {
        let vars = VariableMap::with_platform(platform);
        let resolver = self.resolver(dir);
        let mut files = FileSet::new();
        if let Some(app) = resolver.resolve_dir(Path::new(""), &vars)? {
            files.merge(app.into_files());
        }
        match resolver.resolve_dir(template, &vars)? {
            Some(tmpl) => files.merge(tmpl.into_files()),
            None => return Err(Error::MissingManifest(dir.join(template)))?,
        }
        let board = Platform::load(dir, &Platform::locate(template, platform))?;
        files.display();

        match &self.opts.ide {
            Some(subdir) => vendor::prepare_ide(dir, subdir, &board, &files),
            None => vendor::build(dir, &board, &files, self.exec),
        }
    }
}

/// Checks if the directory's name marks it as a testbench.
pub fn is_testbench(dir: &Path) -> bool {
    let name = match dir.file_name() {
        Some(n) => n.to_string_lossy().to_string(),
        // the working directory may be given as "." or with a trailing component
        None => match dir.canonicalize() {
            Ok(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            Err(_) => return false,
        },
    };
    name.starts_with(TESTBENCH_PREFIX)
}

/// Lists the testbench directories directly beneath `dir`, sorted by name.
pub fn testbenches(dir: &Path) -> Result<Vec<PathBuf>, Fault> {
    Ok(
        filesystem::glob_in(dir, &format!("{}*", TESTBENCH_PREFIX))?
            .into_iter()
            .filter(|p| p.is_dir())
            .collect(),
    )
}
