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

use crate::commands::manuals;
use crate::error::AnyError;

use cliproc::{cli, proc, stage::*};
use cliproc::{Arg, Cli, Subcommand};

#[derive(Debug, PartialEq)]
pub struct Help {
    topic: Option<Topic>,
    list: bool,
}

impl Subcommand<()> for Help {
    fn interpret<'c>(cli: &'c mut Cli<Memory>) -> cli::Result<Self> {
        cli.help(cliproc::Help::with(HELP))?;
        Ok(Help {
            list: cli.check(Arg::flag("list"))?,
            topic: cli.get(Arg::positional("topic"))?,
        })
    }

    fn execute(self, _: &()) -> proc::Result {
        self.run();
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
enum Topic {
    Build,
    Deps,
    Clean,
    Fetch,
    Block,
    Zero,
}

impl Topic {
    fn list_all() -> String {
        let list = ["build", "deps", "clean", "fetch", "block", "zero"];
        list.into_iter().fold(String::new(), |mut acc, x| {
            acc.push_str(&format!("{}\n", x));
            acc
        })
    }

    /// Transforms the variant to its corresponding manual page.
    fn as_manual(&self) -> &str {
        use Topic::*;
        match &self {
            Build => manuals::build::MANUAL,
            Deps => manuals::deps::MANUAL,
            Clean => manuals::clean::MANUAL,
            Fetch => manuals::fetch::MANUAL,
            Block => manuals::block::MANUAL,
            Zero => manuals::zero::MANUAL,
        }
    }
}

impl std::str::FromStr for Topic {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "build" => Self::Build,
            "deps" => Self::Deps,
            "clean" => Self::Clean,
            "fetch" => Self::Fetch,
            "block" => Self::Block,
            "zero" => Self::Zero,
            _ => return Err(AnyError(format!("topic '{}' not found", s))),
        })
    }
}

impl Help {
    fn run(&self) {
        if self.list == true {
            println!("{}", Topic::list_all());
        } else {
            let contents = match &self.topic {
                Some(t) => t.as_manual(),
                None => manuals::hdlmake::MANUAL,
            };
            println!("{}", contents);
        }
    }
}

const HELP: &str = "\
Read in-depth documentation on hdlmake topics.

Usage:
    hdlmake help [<topic>]

Args:
    <topic>         a listed topic or any hdlmake subcommand

Use 'hdlmake help --list' to see all available topics.
";

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn every_topic_has_a_manual() {
        for name in Topic::list_all().lines() {
            let topic = Topic::from_str(name).unwrap();
            assert_eq!(topic.as_manual().contains(name), true);
        }
        assert_eq!(Topic::from_str("install").is_err(), true);
    }
}
