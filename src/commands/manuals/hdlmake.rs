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
    hdlmake - build and test HDL projects

SYNOPSIS
    hdlmake [options] [command]

DESCRIPTION
    Every directory taking part in a build declares its contents in a manifest
    file named 'hdlmake.toml'. The 'sources' key lists the directory's HDL files
    in order, with the first entry being the directory's top-level file. An
    entry naming a directory imports that directory as a nested library, and an
    entry of the form '+/<owner>/<name>' imports a library from the shared
    library area, downloading it first when it is missing.

    A library may declare 'artifacts', pre-generated files that are copied into
    the directory being built, and a 'generate' command that is run from the
    library's directory whenever one of its declared files is missing.

    The placeholder '${platform}' may appear in any entry and is replaced with
    the platform being built for ('sim' when validating or simulating).

ENVIRONMENT
    HDLMAKE_HOME
        The tool's home directory (default: ~/.hdlmake)

    HDLMAKE_LIBS
        The shared library area (default: $HDLMAKE_HOME/libs)

FILES
    $HDLMAKE_HOME/config.toml
        Optional settings. The '[library]' table accepts 'path', overriding the
        library area, and 'url', the download location for libraries with
        '{owner}' and '{name}' placeholders.
"#;
