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

use std::io;
use std::io::{BufRead, Error};

/// Outputs the question `s` and waits for a y/n answer. Only an explicit
/// 'y' returns `true`; an empty answer counts as 'n'.
pub fn confirm(s: &str) -> Result<bool, Error> {
    println!("{} [y/N]", s);
    check_for_response(&mut io::stdin().lock())
}

/// Loops until a valid response is entered. "Y\n" maps to `true`, while
/// "N\n" and "\n" map to `false`.
///
/// Also supports checking windows-style line endings `\r\n`.
fn check_for_response(input: &mut impl BufRead) -> Result<bool, Error> {
    let mut buffer: String = String::new();
    loop {
        // end of input declines
        if input.read_line(&mut buffer)? == 0 {
            break Ok(false);
        }
        let result = match buffer.trim_end_matches(['\r', '\n']).to_uppercase().as_ref() {
            "Y" | "YES" => Some(true),
            "" | "N" | "NO" => Some(false),
            _ => {
                buffer.clear();
                None
            }
        };
        if let Some(r) = result {
            break Ok(r);
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_input_to_output() {
        let r = check_for_response(&mut "n\n".as_bytes()).unwrap();
        assert_eq!(r, false);
        let r = check_for_response(&mut "\n".as_bytes()).unwrap();
        assert_eq!(r, false);
        let r = check_for_response(&mut "Y\n".as_bytes()).unwrap();
        assert_eq!(r, true);
        let r = check_for_response(&mut "maybe\nyes\n".as_bytes()).unwrap();
        assert_eq!(r, true);
        let r = check_for_response(&mut "".as_bytes()).unwrap();
        assert_eq!(r, false);
    }

    #[test]
    fn windows_style() {
        let r = check_for_response(&mut "y\r\n".as_bytes()).unwrap();
        assert_eq!(r, true);
        let r = check_for_response(&mut "N\r\n".as_bytes()).unwrap();
        assert_eq!(r, false);
    }
}
