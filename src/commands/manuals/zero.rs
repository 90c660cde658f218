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
    zero - strip a generated-block directory to its batch file

SYNOPSIS
    hdlmake zero [options]

DESCRIPTION
    Lists the current directory, marking with '*' the entries that are kept,
    and after confirmation deletes everything except the single '*.batch' file
    and the manifest. The directory must hold exactly one batch file.

OPTIONS
    --force
        Skip the confirmation prompt
"#;
