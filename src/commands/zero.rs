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

use crate::commands::helps::zero;
use crate::core::block;
use crate::core::context::Context;
use crate::error::Error;
use crate::util::prompt;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Zero {
    force: bool,
}

impl Subcommand<Context> for Zero {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(zero::HELP))?;
        Ok(Zero {
            force: cli.check(Arg::flag("force"))?,
        })
    }

    fn execute(self, _: &Context) -> proc::Result {
        let cwd = std::env::current_dir()?;
        let listing = block::zero_listing(&cwd)?;
        println!("Current directory contains:");
        for (name, keep) in &listing {
            match keep {
                true => println!("  {} *", name),
                false => println!("  {}", name),
            }
        }
        if self.force == false
            && prompt::confirm(
                "\nThis operation will erase everything apart from *.batch and\nhdlmake.toml. Are you sure you want to proceed?",
            )? == false
        {
            return Err(Error::ZeroAborted)?;
        }
        block::zero(&cwd)?;
        Ok(())
    }
}
