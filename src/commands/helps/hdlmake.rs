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

pub const HELP: &str = r#"Build and test HDL projects with recursive library resolution.

Usage:
    hdlmake [options] [command]

Commands:
    build           validate, test and optionally build the current directory
    deps            list the resolved source files of the current directory
    clean           delete generated build outputs
    fetch           download a library into the library area
    block           scaffold a generated-block directory
    zero            strip a generated-block directory to its batch file
    help            read in-depth help for a command

Options:
    --version           print version information and exit
    --color <when>      coloring: auto, always, never
    --help, -h          print help information

Use 'hdlmake help <command>' for more information about a command.
"#;
