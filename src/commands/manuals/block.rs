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
    block - scaffold a generated-block directory

SYNOPSIS
    hdlmake block [options] <subdir>

DESCRIPTION
    Creates <subdir> and launches a vendor IP wizard inside it. Once the wizard
    exits, the wizard's settings are saved as '<name>.batch', every generated
    file is deleted, and a manifest is written whose 'generate' command replays
    the batch file. The block's files are then regenerated on demand whenever a
    build finds them missing.

ARGS
    <subdir>
        The new directory to create

OPTIONS
    --xilinx, -x
        Launch the Xilinx CORE Generator

    --altera, -a
        Launch the Altera MegaWizard

EXAMPLES
    hdlmake block -x fifo
"#;
