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

use crate::commands::helps::build;
use crate::core::context::Context;
use crate::core::exec::SystemExecutor;
use crate::core::fetch::ArchiveFetcher;
use crate::core::validate::Validator;
use crate::core::walk::{Walk, WalkOptions};
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Build {
    validate: Option<Validator>,
    template: Option<PathBuf>,
    platform: Option<String>,
    ide: Option<PathBuf>,
    waves: bool,
    force: bool,
    verbose: bool,
}

impl Subcommand<Context> for Build {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(build::HELP))?;
        Ok(Build {
            // Flags
            waves: cli.check(Arg::flag("waves").switch('w'))?,
            force: cli.check(Arg::flag("force"))?,
            verbose: cli.check(Arg::flag("verbose"))?,
            // Options
            validate: cli.get(Arg::option("validate").switch('v').value("tool"))?,
            template: cli.get(Arg::option("template").switch('t').value("path"))?,
            platform: cli.get(Arg::option("platform").switch('p').value("name"))?,
            ide: cli.get(Arg::option("ide").switch('i').value("subdir"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let cwd = std::env::current_dir()?;
        let exec = SystemExecutor::new(self.verbose);
        let fetcher = ArchiveFetcher::new(c.get_archive_url());
        let walk = Walk::new(
            c.get_libs_path(),
            &fetcher,
            &exec,
            WalkOptions {
                validate: self.validate,
                template: self.template,
                platform: self.platform,
                waves: self.waves,
                ide: self.ide,
                force: self.force,
            },
        )?;
        walk.run(&cwd)?;
        println!("info: success");
        Ok(())
    }
}
