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

use std::collections::HashMap;

/// Placeholder values threaded through a single resolution pass.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct VariableMap(HashMap<String, String>);

impl VariableMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Creates a map holding only the `platform` variable.
    pub fn with_platform(platform: &str) -> Self {
        let mut vars = Self::new();
        vars.add(PLATFORM_KEY, platform);
        vars
    }

    pub fn add(&mut self, key: &str, value: &str) -> Option<String> {
        self.0.insert(key.to_string(), value.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }
}

pub const PLATFORM_KEY: &str = "platform";

const VAR_SIGIL: char = '$';
const L_VAR_DELIMITER: char = '{';
const R_VAR_DELIMITER: char = '}';

/// Performs variable replacement on the given `text`, swapping every `${name}`
/// with its value in `vars`.
///
/// Placeholders without a bound value are left verbatim.
pub fn substitute(text: &str, vars: &VariableMap) -> String {
    let mut result = String::with_capacity(text.len());

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == VAR_SIGIL && chars.peek() == Some(&L_VAR_DELIMITER) {
            // consume the opening delimiter
            chars.next();
            match gather_variable(&mut chars) {
                Ok(key) => match vars.get(&key) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push(VAR_SIGIL);
                        result.push(L_VAR_DELIMITER);
                        result.push_str(&key);
                        result.push(R_VAR_DELIMITER);
                    }
                },
                Err(partial) => {
                    result.push(VAR_SIGIL);
                    result.push(L_VAR_DELIMITER);
                    result.push_str(&partial);
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Collects the variable name up to the closing delimiter.
///
/// Assumes `${` was already consumed. Errors with the consumed text if the
/// delimiter never closes.
fn gather_variable<T: Iterator<Item = char>>(chars: &mut T) -> Result<String, String> {
    let mut key = String::new();
    while let Some(c) = chars.next() {
        if c == R_VAR_DELIMITER {
            return Ok(key);
        }
        key.push(c);
    }
    Err(key)
}

#[cfg(test)]
mod test {
    use super::*;

    fn create_vars() -> VariableMap {
        let mut vars = VariableMap::with_platform("nexys2-1200");
        vars.add("board", "atlys");
        vars
    }

    #[test]
    fn gather_var() {
        assert_eq!(
            gather_variable(&mut "platform}/top.vhdl".chars()),
            Ok("platform".to_owned())
        );
        assert_eq!(
            gather_variable(&mut "platform/top.vhdl".chars()),
            Err("platform/top.vhdl".to_owned())
        );
    }

    #[test]
    fn replace_variables() {
        let vars = create_vars();
        assert_eq!(
            substitute("platforms/${platform}/platform.vhdl", &vars),
            "platforms/nexys2-1200/platform.vhdl"
        );
        assert_eq!(
            substitute("${board}_${platform}.ucf", &vars),
            "atlys_nexys2-1200.ucf"
        );
    }

    #[test]
    fn unresolved_left_verbatim() {
        let vars = create_vars();
        assert_eq!(substitute("boards/${vendor}/x.v", &vars), "boards/${vendor}/x.v");
        assert_eq!(substitute("cost$5 {a} ${open", &vars), "cost$5 {a} ${open");
        assert_eq!(substitute("plain.vhd", &VariableMap::new()), "plain.vhd");
    }
}
