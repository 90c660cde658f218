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

use crate::error::Fault;
use fs_extra::file::CopyOptions;
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Lists the entries of `dir` matching the wildcard `pattern`, sorted by name.
pub fn glob_in(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, Fault> {
    let full = format!(
        "{}/{}",
        Pattern::escape(&dir.display().to_string()),
        pattern
    );
    let mut found = Vec::new();
    for entry in glob::glob(&full)? {
        found.push(entry?);
    }
    found.sort();
    Ok(found)
}

/// Lists the names of the entries of `dir` matching `pattern`.
pub fn glob_names(dir: &Path, pattern: &str) -> Result<Vec<String>, Fault> {
    Ok(glob_in(dir, pattern)?
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .collect())
}

/// Deletes every file and directory in `dir` matching `pattern`.
pub fn wildcard_delete(dir: &Path, pattern: &str) -> Result<(), Fault> {
    let items = glob_in(dir, pattern)?;
    remove(&items)
}

/// Deletes the files and directories in `items`; missing ones are skipped.
pub fn remove(items: &[PathBuf]) -> Result<(), Fault> {
    Ok(fs_extra::remove_items(items)?)
}

/// Copies every file in `items` directly into `dest`, overwriting by file name.
pub fn copy_flat(items: &[PathBuf], dest: &Path) -> Result<(), Fault> {
    let mut options = CopyOptions::new();
    options.overwrite = true;
    for src in items {
        let name = match src.file_name() {
            Some(n) => n,
            None => continue,
        };
        fs_extra::file::copy(src, dest.join(name), &options)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn delete_by_wildcard() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.ngc"), "").unwrap();
        fs::write(dir.path().join("b.ngc"), "").unwrap();
        fs::write(dir.path().join("top.vhdl"), "").unwrap();
        fs::create_dir_all(dir.path().join("x.ngc/inner")).unwrap();

        assert_eq!(
            glob_names(dir.path(), "*.ngc").unwrap(),
            vec!["a.ngc", "b.ngc", "x.ngc"]
        );
        wildcard_delete(dir.path(), "*.ngc").unwrap();
        assert_eq!(glob_names(dir.path(), "*").unwrap(), vec!["top.vhdl"]);
        // nothing left to match
        wildcard_delete(dir.path(), "*.ngc").unwrap();
    }

    #[test]
    fn escapes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let odd = dir.path().join("[odd]");
        fs::create_dir(&odd).unwrap();
        fs::write(odd.join("f.bit"), "").unwrap();
        assert_eq!(glob_names(&odd, "*.bit").unwrap(), vec!["f.bit"]);
    }
}
