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

use crate::commands::helps::hdlmake;
use crate::core::config::CONFIG_FILE;
use crate::core::context::Context;
use crate::error::AnyError;
use crate::util::environment::{HDLMAKE_HOME, HDLMAKE_LIBS};
use std::str::FromStr;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Command, Help, Subcommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq)]
pub struct Hdlmake {
    version: bool,
    color: Option<ColorMode>,
    command: Option<HdlmakeSubcommand>,
}

impl Command for Hdlmake {
    fn interpret(cli: &mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(Help::with(hdlmake::HELP))?;
        Ok(Hdlmake {
            version: cli.check(Arg::flag("version"))?,
            color: cli.get(Arg::option("color").value("when"))?,
            command: cli.nest(Arg::subcommand("command"))?,
        })
    }

    fn execute(self) -> proc::Result {
        // need to set this coloring mode ASAP
        if let Some(mode) = &self.color {
            mode.apply();
        }
        // prioritize version information
        if self.version == true {
            println!("hdlmake {}", VERSION);
            Ok(())
        // run the specified command
        } else if let Some(c) = self.command {
            match c {
                // help never needs the context
                HdlmakeSubcommand::Help(h) => h.execute(&()),
                _ => {
                    let context = Context::new()
                        .home(HDLMAKE_HOME)?
                        .settings(CONFIG_FILE)?
                        .libraries(HDLMAKE_LIBS)?;
                    c.execute(&context)
                }
            }
        // if no command is given then print default help
        } else {
            Ok(println!("{}", hdlmake::HELP))
        }
    }
}

#[derive(Debug, PartialEq)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn apply(&self) {
        match self {
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
            Self::Auto => (),
        }
    }
}

impl FromStr for ColorMode {
    type Err = AnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(AnyError(String::from(
                "color mode must be \"auto\", \"always\", or \"never\"",
            ))),
        }
    }
}

use crate::commands::block::Block;
use crate::commands::build::Build;
use crate::commands::clean::Clean;
use crate::commands::deps::Deps;
use crate::commands::fetch::Fetch;
use crate::commands::help::Help as HelpCommand;
use crate::commands::zero::Zero;

#[derive(Debug, PartialEq)]
enum HdlmakeSubcommand {
    Help(HelpCommand),
    Build(Build),
    Deps(Deps),
    Clean(Clean),
    Fetch(Fetch),
    Block(Block),
    Zero(Zero),
}

impl Subcommand<Context> for HdlmakeSubcommand {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        match cli
            .select(&["help", "build", "b", "deps", "clean", "fetch", "block", "zero"])?
            .as_ref()
        {
            "help" => Ok(HdlmakeSubcommand::Help(HelpCommand::interpret(cli)?)),
            "b" | "build" => Ok(HdlmakeSubcommand::Build(Build::interpret(cli)?)),
            "deps" => Ok(HdlmakeSubcommand::Deps(Deps::interpret(cli)?)),
            "clean" => Ok(HdlmakeSubcommand::Clean(Clean::interpret(cli)?)),
            "fetch" => Ok(HdlmakeSubcommand::Fetch(Fetch::interpret(cli)?)),
            "block" => Ok(HdlmakeSubcommand::Block(Block::interpret(cli)?)),
            "zero" => Ok(HdlmakeSubcommand::Zero(Zero::interpret(cli)?)),
            _ => panic!("an unimplemented command was passed through!"),
        }
    }

    fn execute(self, context: &Context) -> proc::Result {
        match self {
            HdlmakeSubcommand::Help(c) => c.execute(&()),
            HdlmakeSubcommand::Build(c) => c.execute(context),
            HdlmakeSubcommand::Deps(c) => c.execute(context),
            HdlmakeSubcommand::Clean(c) => c.execute(context),
            HdlmakeSubcommand::Fetch(c) => c.execute(context),
            HdlmakeSubcommand::Block(c) => c.execute(context),
            HdlmakeSubcommand::Zero(c) => c.execute(context),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_color_mode() {
        assert_eq!(ColorMode::from_str("never").unwrap(), ColorMode::Never);
        assert_eq!(ColorMode::from_str("sometimes").is_err(), true);
    }
}
