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

use crate::commands::helps::deps;
use crate::core::context::Context;
use crate::core::exec::SystemExecutor;
use crate::core::fetch::ArchiveFetcher;
use crate::core::resolver::{Resolution, Resolver};
use crate::core::swap::VariableMap;
use crate::core::walk::SIM_PLATFORM;
use crate::error::Error;
use serde_derive::Serialize;
use std::path::Path;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Deps {
    platform: Option<String>,
    json: bool,
}

impl Subcommand<Context> for Deps {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(deps::HELP))?;
        Ok(Deps {
            json: cli.check(Arg::flag("json"))?,
            platform: cli.get(Arg::option("platform").value("name"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let cwd = std::env::current_dir()?;
        let exec = SystemExecutor::new(false);
        let fetcher = ArchiveFetcher::new(c.get_archive_url());
        let vars = VariableMap::with_platform(self.platform.as_deref().unwrap_or(SIM_PLATFORM));

        let res = match Resolver::new(&cwd, c.get_libs_path(), &fetcher, &exec)
            .resolve_dir(Path::new(""), &vars)?
        {
            Some(r) => r,
            None => return Err(Error::MissingManifest(cwd))?,
        };
        match self.json {
            true => println!("{}", Self::to_json(&res)?),
            false => {
                println!("top: {}", res.get_top());
                res.get_files().display();
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    top: &'a str,
    files: Vec<&'a String>,
}

impl Deps {
    fn to_json(res: &Resolution) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Listing {
            top: res.get_top(),
            files: res.get_files().iter().collect(),
        })
    }
}
