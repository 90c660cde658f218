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
    deps - list the resolved source files of the current directory

SYNOPSIS
    hdlmake deps [options]

DESCRIPTION
    Resolves the current directory's manifest and prints its top-level file and
    the sorted, deduplicated set of every source file it depends on. Missing
    libraries are downloaded and missing generated files are regenerated, just
    as during a build.

OPTIONS
    --platform <name>
        Value bound to ${platform} (default: sim)

    --json
        Print the listing as json

EXAMPLES
    hdlmake deps
    hdlmake deps --platform atlys --json
"#;
