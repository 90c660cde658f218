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

use crate::commands::helps::fetch;
use crate::core::context::Context;
use crate::core::fetch::ArchiveFetcher;
use crate::core::fetch::Fetch as _;
use crate::core::libref::LibraryId;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Fetch {
    library: LibraryId,
}

impl Subcommand<Context> for Fetch {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(fetch::HELP))?;
        Ok(Fetch {
            library: cli.require(Arg::positional("library"))?,
        })
    }

    fn execute(self, c: &Context) -> proc::Result {
        let fetcher = ArchiveFetcher::new(c.get_archive_url());
        let dir = fetcher.fetch(&self.library, c.get_libs_path())?;
        println!("info: library {} is available at {:?}", self.library, dir);
        Ok(())
    }
}
