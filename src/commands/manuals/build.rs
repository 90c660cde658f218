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

pub const MANUAL: &str = r#"NAME
    build - validate, test and optionally build the current directory

SYNOPSIS
    hdlmake build [options]

DESCRIPTION
    The walk starts in the current directory. When run from an application
    directory, the application is first validated (if requested), then every
    testbench directory beneath it (named 'tb_*') is simulated in name order,
    and finally the vendor build runs if a template and platform were given.
    The first failure stops the walk.

    When run from a testbench directory, only that testbench is simulated.

    Validation and simulation keep a TIMESTAMP file in their output directories
    ('synthesis' and 'simulation'). A stage is skipped when its TIMESTAMP is
    newer than every file it depends on. Use '--force' to rerun every stage.

    A testbench passes when its simulation exits successfully and, if the
    testbench has an 'expected.sim' file, the simulation wrote an identical
    'results.sim' file.

    The platform settings are read from
    '<template>/../platforms/<platform>/platform.toml', whose 'vendor' key
    selects the toolchain: xilinx, altera, or cpld.

OPTIONS
    --validate, -v <tool>
        Run a synthesis-only check first with x (Xilinx XST) or a (Altera Quartus)

    --template, -t <path>
        The template to build the application with

    --platform, -p <name>
        The template's platform to build for

    --waves, -w
        Open GTKWave after simulating each testbench that lists 'signals'

    --ide, -i <subdir>
        Copy the sources into <subdir> instead of running the vendor build

    --force
        Ignore timestamps and rerun every stage

    --verbose
        Display every external command before it runs

EXAMPLES
    hdlmake build -v x
    hdlmake build -t ../../templates/fx2all/vhdl -p nexys2-1200
"#;
