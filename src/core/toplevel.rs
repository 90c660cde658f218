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

//! Deduces the name of the top-level design unit from an HDL source file.
//!
//! This is a heuristic text scan and not a parser. It handles canonical files
//! declaring a single top unit; files with several top-level declarations or
//! unusual formatting may yield the wrong name or no name at all.

use crate::error::{Error, Fault};
use std::path::Path;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Dialect {
    Verilog,
    Vhdl,
}

impl Dialect {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "v" | "sv" => Some(Self::Verilog),
            "vhd" | "vhdl" => Some(Self::Vhdl),
            _ => None,
        }
    }

    fn line_comment(&self) -> &str {
        match self {
            Self::Verilog => "//",
            Self::Vhdl => "--",
        }
    }
}

/// Reads the file at `path` and extracts its top-level unit name.
pub fn extract_top_name(path: &Path) -> Result<String, Fault> {
    let dialect = match Dialect::from_path(path) {
        Some(d) => d,
        None => return Err(Error::TopNotFound(path.to_path_buf()))?,
    };
    let text = std::fs::read_to_string(path)?;
    match find_top(&text, dialect) {
        Some(name) => Ok(name),
        None => Err(Error::TopNotFound(path.to_path_buf()))?,
    }
}

fn find_top(text: &str, dialect: Dialect) -> Option<String> {
    let flat = strip_comments(text, dialect.line_comment());
    let tokens = tokenize(&flat);
    match dialect {
        Dialect::Verilog => find_module(&tokens),
        Dialect::Vhdl => find_architecture(&tokens).or_else(|| find_entity(&tokens)),
    }
}

/// Removes line comments and joins the remaining text into a single line.
fn strip_comments(text: &str, marker: &str) -> String {
    text.lines()
        .map(|line| match line.find(marker) {
            Some(i) => &line[..i],
            None => line,
        })
        .collect::<Vec<&str>>()
        .join(" ")
        .replace('\t', " ")
}

/// Splits text into words (identifier characters) and single punctuation characters.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if is_word_char(c) == true {
            if start.is_none() {
                start = Some(i);
            }
            continue;
        }
        if let Some(s) = start.take() {
            tokens.push(&text[s..i]);
        }
        if c.is_whitespace() == false {
            tokens.push(&text[i..i + c.len_utf8()]);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}

/// Matches `module <name>` followed by a parameter list, port list or `;`.
fn find_module(tokens: &[&str]) -> Option<String> {
    tokens.windows(3).find_map(|w| {
        match w[0].eq_ignore_ascii_case("module")
            && is_identifier(w[1])
            && matches!(w[2], "#" | "(" | ";")
        {
            true => Some(w[1].to_string()),
            false => None,
        }
    })
}

/// Matches `architecture <arch> of <name> is`.
fn find_architecture(tokens: &[&str]) -> Option<String> {
    tokens.windows(5).find_map(|w| {
        match w[0].eq_ignore_ascii_case("architecture")
            && is_identifier(w[1])
            && w[2].eq_ignore_ascii_case("of")
            && is_identifier(w[3])
            && w[4].eq_ignore_ascii_case("is")
        {
            true => Some(w[3].to_string()),
            false => None,
        }
    })
}

/// Matches `entity <name> is`.
fn find_entity(tokens: &[&str]) -> Option<String> {
    tokens.windows(3).find_map(|w| {
        match w[0].eq_ignore_ascii_case("entity")
            && is_identifier(w[1])
            && w[2].eq_ignore_ascii_case("is")
        {
            true => Some(w[1].to_string()),
            false => None,
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vhdl_entity() {
        let text = "library ieee;\nuse ieee.std_logic_1164.all;\n\nENTITY alu8 IS\n  port(a : in std_logic);\nend entity;\n";
        assert_eq!(find_top(text, Dialect::Vhdl), Some(String::from("alu8")));
    }

    #[test]
    fn vhdl_architecture_wins() {
        let text = "entity pkg_helper is end entity;\n\tArchitecture\trtl\tOf top_level Is\nbegin\nend architecture;";
        assert_eq!(find_top(text, Dialect::Vhdl), Some(String::from("top_level")));
    }

    #[test]
    fn vhdl_split_across_lines() {
        let text = "entity\nalu8\nis\nend alu8;";
        assert_eq!(find_top(text, Dialect::Vhdl), Some(String::from("alu8")));
    }

    #[test]
    fn verilog_module() {
        let text = "// module fake(\n`timescale 1ns/1ps\nmodule top_mux #(parameter W = 8) (\n  input clk\n);\nendmodule\n";
        assert_eq!(find_top(text, Dialect::Verilog), Some(String::from("top_mux")));

        let text = "MODULE\ttop_mux(a, b);";
        assert_eq!(find_top(text, Dialect::Verilog), Some(String::from("top_mux")));
    }

    #[test]
    fn comments_do_not_match() {
        let text = "-- entity ghost is\n-- architecture rtl of ghost is\n";
        assert_eq!(find_top(text, Dialect::Vhdl), None);

        let text = "// module ghost(\n  // module other;\n";
        assert_eq!(find_top(text, Dialect::Verilog), None);
    }

    #[test]
    fn keyword_must_be_whole_word() {
        let text = "submodule x (a);\nendmodule\n";
        assert_eq!(find_top(text, Dialect::Verilog), None);
        let text = "myentity foo is";
        assert_eq!(find_top(text, Dialect::Vhdl), None);
    }

    #[test]
    fn extract_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alu.VHD");
        std::fs::write(&path, "entity Alu8 is\nend;\n").unwrap();
        assert_eq!(extract_top_name(&path).unwrap(), "Alu8");

        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "entity alu8 is").unwrap();
        let e = extract_top_name(&path).unwrap_err();
        assert_eq!(e.downcast_ref::<Error>(), Some(&Error::TopNotFound(path)));
    }
}
