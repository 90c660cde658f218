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

use crate::commands::helps::block;
use crate::core::block::{self as scaffold, Wizard};
use crate::core::context::Context;
use crate::core::exec::SystemExecutor;
use crate::error::AnyError;
use std::path::PathBuf;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Help, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Block {
    xilinx: bool,
    altera: bool,
    dir: PathBuf,
}

impl Subcommand<Context> for Block {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(block::HELP))?;
        Ok(Block {
            xilinx: cli.check(Arg::flag("xilinx").switch('x'))?,
            altera: cli.check(Arg::flag("altera").switch('a'))?,
            dir: cli.require(Arg::positional("subdir"))?,
        })
    }

    fn execute(self, _: &Context) -> proc::Result {
        let wizard = match (self.xilinx, self.altera) {
            (true, false) => Wizard::Coregen,
            (false, true) => Wizard::Megawizard,
            _ => {
                return Err(AnyError(String::from(
                    "exactly one of \"--xilinx\" or \"--altera\" must be given",
                )))?
            }
        };
        let cwd = std::env::current_dir()?;
        scaffold::scaffold(wizard, &cwd.join(&self.dir), &SystemExecutor::new(false))?;
        println!("info: created block {:?}", self.dir);
        Ok(())
    }
}
