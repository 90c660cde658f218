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

//! Materializes remotely hosted libraries into the local library area.

use crate::core::libref::LibraryId;
use crate::error::{Error, Fault};
use curl::easy::Easy;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const RESPONSE_OKAY: u32 = 200;

pub const DEFAULT_ARCHIVE_URL: &str = "https://github.com/{owner}/{name}/archive/master.zip";

pub trait Fetch {
    /// Ensures the library `id` exists within the library area `libs` and
    /// returns its directory.
    ///
    /// Calling it for a library that is already present does nothing.
    fn fetch(&self, id: &LibraryId, libs: &Path) -> Result<PathBuf, Fault>;
}

/// Downloads a library as a zip archive and unpacks it.
#[derive(Debug, PartialEq, Clone)]
pub struct ArchiveFetcher {
    url: String,
}

impl Default for ArchiveFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_URL)
    }
}

impl ArchiveFetcher {
    /// Creates a fetcher from a url template holding `{owner}` and `{name}`.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    pub fn url_for(&self, id: &LibraryId) -> String {
        self.url
            .replace("{owner}", id.get_owner())
            .replace("{name}", id.get_name())
    }

    fn download(url: &str) -> Result<Vec<u8>, Fault> {
        let mut body_bytes = Vec::new();
        {
            let mut easy = Easy::new();
            easy.url(url)?;
            easy.follow_location(true)?;
            {
                let mut transfer = easy.transfer();
                transfer.write_function(|data| {
                    body_bytes.extend_from_slice(data);
                    Ok(data.len())
                })?;
                transfer.perform()?;
            }
            let rc = easy.response_code()?;
            if rc != RESPONSE_OKAY {
                return Err(Error::FetchFailed(url.to_string(), rc))?;
            }
        }
        Ok(body_bytes)
    }

    /// Extracts the archive `bytes` into `owner_dir` and renames its single
    /// top-level directory to `name`.
    pub fn unpack(bytes: &[u8], owner_dir: &Path, name: &str) -> Result<PathBuf, Fault> {
        std::fs::create_dir_all(owner_dir)?;
        // place the bytes into a file
        let mut temp_file = tempfile::tempfile()?;
        temp_file.write_all(bytes)?;
        let mut zip_archive = ZipArchive::new(temp_file)?;

        // extract next to the destination so the final rename stays on one filesystem
        let staging = tempfile::tempdir_in(owner_dir)?;
        zip_archive.extract(staging.path())?;

        let mut roots = Vec::new();
        for entry in std::fs::read_dir(staging.path())? {
            let entry = entry?;
            if entry.file_type()?.is_dir() == true {
                roots.push(entry.path());
            }
        }
        let dest = owner_dir.join(name);
        match roots.len() {
            1 => std::fs::rename(&roots[0], &dest)?,
            _ => return Err(Error::FetchMissingRoot(dest))?,
        }
        Ok(dest)
    }
}

impl Fetch for ArchiveFetcher {
    fn fetch(&self, id: &LibraryId, libs: &Path) -> Result<PathBuf, Fault> {
        let dest = id.local_dir(libs);
        if dest.exists() == true {
            return Ok(dest);
        }
        let url = self.url_for(id);
        println!("info: fetching {} ...", url);
        let bytes = Self::download(&url)?;
        Self::unpack(&bytes, &libs.join(id.get_owner()), id.get_name())
    }
}

#[cfg(test)]
pub mod stub {
    use super::*;
    use std::cell::RefCell;

    /// Serves libraries from a table of manifests instead of the network.
    pub struct StubFetcher {
        libs: Vec<(String, Vec<(String, String)>)>,
        requests: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        pub fn new() -> Self {
            Self {
                libs: Vec::new(),
                requests: RefCell::new(Vec::new()),
            }
        }

        /// Registers the files (path, contents) making up the library `id`.
        pub fn serve(mut self, id: &str, files: &[(&str, &str)]) -> Self {
            self.libs.push((
                id.to_string(),
                files
                    .iter()
                    .map(|(p, c)| (p.to_string(), c.to_string()))
                    .collect(),
            ));
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl Fetch for StubFetcher {
        fn fetch(&self, id: &LibraryId, libs: &Path) -> Result<PathBuf, Fault> {
            let dest = id.local_dir(libs);
            if dest.exists() == true {
                return Ok(dest);
            }
            self.requests.borrow_mut().push(id.to_string());
            let (_, files) = self
                .libs
                .iter()
                .find(|(name, _)| name == &id.to_string())
                .ok_or(Error::FetchFailed(id.to_string(), 404))?;
            for (path, contents) in files {
                let file = dest.join(path);
                std::fs::create_dir_all(file.parent().unwrap())?;
                std::fs::write(file, contents)?;
            }
            Ok(dest)
        }
    }
}
