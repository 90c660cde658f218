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

use std::collections::btree_set::Iter;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

/// Parent-directory prefix for re-expressing paths one level deeper.
const PARENT_PREFIX: &str = "../";

/// A deduplicated, lexicographically ordered set of source file paths.
///
/// Paths are kept as text with `/` separators because the set is written
/// verbatim into vendor project files. Relative paths are relative to the
/// directory the set was resolved from.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct FileSet(BTreeSet<String>);

impl FileSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a path to the set, returning `false` if it was already present.
    pub fn insert(&mut self, path: String) -> bool {
        self.0.insert(path)
    }

    /// Collapses the entries of `other` into `self`.
    pub fn merge(&mut self, other: FileSet) {
        self.0.extend(other.0)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-expresses every relative path as seen from a direct subdirectory.
    ///
    /// Absolute paths are left untouched.
    pub fn rebase_to_child(self) -> Self {
        Self(self.0.into_iter().map(|p| to_child_view(&p)).collect())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Prints the set under the `Unique HDLs:` banner.
    pub fn display(&self) {
        println!("Unique HDLs:");
        self.0.iter().for_each(|p| println!("  {}", p));
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<String> for FileSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lexically cleans a path by dropping `.` and cancelling `name/..` pairs.
///
/// Leading `..` components are kept. The filesystem is never consulted, so
/// symbolic links are not followed.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for c in path.components() {
        match c {
            Component::CurDir => (),
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // nothing lies above the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => (),
                _ => parts.push(c),
            },
            _ => parts.push(c),
        }
    }
    parts.into_iter().collect()
}

/// Converts a path to a normalized string using `/` for separators.
pub fn standardize(path: &Path) -> String {
    normalize(path).display().to_string().replace('\\', "/")
}

/// Re-expresses one relative path as seen from a direct subdirectory.
pub fn to_child_view(path: &str) -> String {
    match Path::new(path).is_absolute() {
        true => path.to_string(),
        false => format!("{}{}", PARENT_PREFIX, path),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn dedup_and_order() {
        let mut set = FileSet::new();
        assert_eq!(set.insert(String::from("b.vhd")), true);
        assert_eq!(set.insert(String::from("a.vhd")), true);
        assert_eq!(set.insert(String::from("b.vhd")), false);
        assert_eq!(set.insert(String::from("A.vhd")), true);
        assert_eq!(
            set.to_vec(),
            vec![
                String::from("A.vhd"),
                String::from("a.vhd"),
                String::from("b.vhd")
            ]
        );
    }

    #[test]
    fn merge_sets() {
        let mut a: FileSet = vec![String::from("x.v"), String::from("y.v")]
            .into_iter()
            .collect();
        let b: FileSet = vec![String::from("y.v"), String::from("w.v")]
            .into_iter()
            .collect();
        a.merge(b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.iter().next(), Some(&String::from("w.v")));
    }

    #[test]
    fn rebase() {
        let abs = standardize(&std::env::temp_dir().join("libs/core.vhd"));
        let set: FileSet = vec![String::from("top.vhdl"), abs.clone()]
            .into_iter()
            .collect();
        let set = set.rebase_to_child();
        assert_eq!(set.contains("../top.vhdl"), true);
        assert_eq!(set.contains(&abs), true);
    }

    #[test]
    fn standardize_paths() {
        assert_eq!(standardize(&PathBuf::from("./src/alu.vhdl")), "src/alu.vhdl");
        assert_eq!(standardize(&PathBuf::from("").join("alu.vhdl")), "alu.vhdl");
        assert_eq!(standardize(&PathBuf::from("other/../lib/./l.vhd")), "lib/l.vhd");
    }

    #[test]
    fn normalize_paths() {
        assert_eq!(normalize(Path::new("a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("a/../../tmpl/x.vhd")), PathBuf::from("../tmpl/x.vhd"));
        assert_eq!(normalize(Path::new("../../x.vhd")), PathBuf::from("../../x.vhd"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::new());
        assert_eq!(normalize(Path::new("/libs/acme/fifo/../util")), PathBuf::from("/libs/acme/util"));
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
    }
}
