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

pub const HELP: &str = r#"Validate, test and optionally build the current directory.

Usage:
    hdlmake build [options]

Options:
    --validate, -v <tool>   synthesis-only check first: x (Xilinx) or a (Altera)
    --template, -t <path>   the template to build the application with
    --platform, -p <name>   the template's platform to build for
    --waves, -w             open GTKWave after each testbench simulation
    --ide, -i <subdir>      copy the sources into <subdir> instead of building
    --force                 ignore timestamps and rerun every stage
    --verbose               display every external command before it runs

Use 'hdlmake help build' to read more about the command.
"#;
