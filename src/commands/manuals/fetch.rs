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
    fetch - download a library into the library area

SYNOPSIS
    hdlmake fetch <library>

DESCRIPTION
    Downloads the archive of the library '<owner>/<name>' and unpacks it into
    '$HDLMAKE_LIBS/<owner>/<name>'. A library that is already present is left
    untouched.

ARGS
    <library>
        The library's <owner>/<name> identifier

EXAMPLES
    hdlmake fetch makestuff/comm-fpga
"#;
