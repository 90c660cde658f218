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

//! Expands a manifest into the transitive closure of its HDL source files.
//!
//! Resolution walks `sources` in declared order. Plain files are collected
//! into a [FileSet], directories are expanded as nested libraries, and
//! `+/<owner>/<name>` entries are expanded from the library area, fetching
//! them first when absent. A library whose declared files are missing runs its
//! generation rule before being expanded.
//!
//! Every path handed back is either absolute or relative to the resolver's
//! working directory. The working directory is only ever read from here; it is
//! never changed for the process.

use crate::core::exec::Executor;
use crate::core::fetch::Fetch;
use crate::core::fileset::{self, FileSet};
use crate::core::libref::SourceRef;
use crate::core::manifest::Manifest;
use crate::core::swap::{self, VariableMap};
use crate::error::{AnyError, Error, Fault, LastError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The outcome of resolving one top-level manifest.
#[derive(Debug, PartialEq, Clone)]
pub struct Resolution {
    top: String,
    files: FileSet,
}

impl Resolution {
    /// References the first source declared by the top-level manifest.
    pub fn get_top(&self) -> &String {
        &self.top
    }

    pub fn get_files(&self) -> &FileSet {
        &self.files
    }

    pub fn into_files(self) -> FileSet {
        self.files
    }
}

pub struct Resolver<'a> {
    cwd: &'a Path,
    libs: &'a Path,
    fetcher: &'a dyn Fetch,
    exec: &'a dyn Executor,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver reading relative paths from `cwd` and importing
    /// shared libraries from `libs`.
    pub fn new(
        cwd: &'a Path,
        libs: &'a Path,
        fetcher: &'a dyn Fetch,
        exec: &'a dyn Executor,
    ) -> Self {
        Self {
            cwd,
            libs,
            fetcher,
            exec,
        }
    }

    /// Loads and resolves the manifest in `dir` (relative to the working directory).
    ///
    /// Returns `None` if `dir` has no manifest, meaning the directory declares no
    /// HDL content.
    pub fn resolve_dir(&self, dir: &Path, vars: &VariableMap) -> Result<Option<Resolution>, Fault> {
        let root = self.cwd.join(dir);
        if Manifest::exists(&root) == false {
            return Ok(None);
        }
        let man = Manifest::load(&root)?;
        Ok(Some(self.resolve(&man, dir, vars)?))
    }

    /// Resolves `manifest`, whose entries are relative to `base`.
    pub fn resolve(
        &self,
        manifest: &Manifest,
        base: &Path,
        vars: &VariableMap,
    ) -> Result<Resolution, Fault> {
        let mut files = FileSet::new();
        let mut visited = HashSet::new();
        for entry in manifest.get_sources() {
            self.add_source(&mut files, &mut visited, base, entry, vars)?;
        }
        Ok(Resolution {
            top: fileset::standardize(&base.join(swap::substitute(manifest.get_top(), vars))),
            files,
        })
    }

    fn add_source(
        &self,
        files: &mut FileSet,
        visited: &mut HashSet<PathBuf>,
        base: &Path,
        entry: &str,
        vars: &VariableMap,
    ) -> Result<(), Fault> {
        let entry = swap::substitute(entry, vars);
        match SourceRef::classify(&entry)? {
            SourceRef::Library(id, subpath) => {
                let mut dir = id.local_dir(self.libs);
                if dir.exists() == false {
                    dir = self.fetcher.fetch(&id, self.libs)?;
                }
                if let Some(sub) = subpath {
                    dir = dir.join(sub);
                }
                self.add_library(files, visited, &fileset::normalize(&dir), vars)
            }
            SourceRef::Relative(rel) => {
                let path = fileset::normalize(&base.join(&rel));
                if self.cwd.join(&path).is_dir() == true {
                    self.add_library(files, visited, &path, vars)
                } else {
                    files.insert(fileset::standardize(&path));
                    Ok(())
                }
            }
        }
    }

    /// Expands the library living at `dir`.
    ///
    /// A library is expanded at most once per resolution pass; repeated imports
    /// (including cyclic ones) already have their files in the set.
    fn add_library(
        &self,
        files: &mut FileSet,
        visited: &mut HashSet<PathBuf>,
        dir: &Path,
        vars: &VariableMap,
    ) -> Result<(), Fault> {
        let root = self.cwd.join(dir);
        let key = root.canonicalize().unwrap_or(root.clone());
        if visited.insert(key) == false {
            return Ok(());
        }
        let man = Manifest::load(&root)?;

        if let Some(missing) = Self::find_missing(&root, &man, vars) {
            match man.get_generate() {
                Some(rule) => {
                    println!(
                        "info: {:?} is missing from {:?}; running the generation rule",
                        missing,
                        fileset::standardize(dir)
                    );
                    if let Err(e) = self.exec.shell(rule, &root) {
                        return Err(Error::GenerationFailed(root, LastError(e.to_string())))?;
                    }
                }
                None => return Err(Error::MissingArtifact(root, missing))?,
            }
        }

        for entry in man.get_sources() {
            self.add_source(files, visited, dir, entry, vars)?;
        }
        // downstream tools expect pre-generated outputs beside the project file
        for artifact in man.get_artifacts() {
            let src = root.join(swap::substitute(artifact, vars));
            let dst = match src.file_name() {
                Some(name) => self.cwd.join(name),
                None => continue,
            };
            if let Err(e) = std::fs::copy(&src, &dst) {
                return Err(AnyError(format!(
                    "failed to copy artifact {:?}: {}",
                    src,
                    Error::lowerize(e.to_string())
                )))?;
            }
        }
        Ok(())
    }

    /// Finds the first declared file (excluding library imports) that does not
    /// exist under `root`.
    fn find_missing(root: &Path, man: &Manifest, vars: &VariableMap) -> Option<String> {
        man.get_sources()
            .iter()
            .chain(man.get_artifacts().iter())
            .map(|f| swap::substitute(f, vars))
            .filter(|f| SourceRef::is_library(f) == false)
            .find(|f| root.join(f).exists() == false)
    }
}
