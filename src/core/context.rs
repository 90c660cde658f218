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

use crate::core::config::Config;
use crate::core::fetch::DEFAULT_ARCHIVE_URL;
use crate::error::{AnyError, Fault};
use std::env;
use std::path::{Path, PathBuf};

/// Settings shared by every subcommand.
#[derive(Debug, PartialEq)]
pub struct Context {
    home_path: PathBuf,
    libs_path: PathBuf,
    config: Config,
}

impl Context {
    pub fn new() -> Context {
        let home = env::temp_dir();
        Context {
            libs_path: home.join("libs"),
            home_path: home,
            config: Config::default(),
        }
    }

    /// Sets the home directory. By default this is `$HOME/.hdlmake`, which is
    /// created if missing. If set by `key`, it must be an existing directory.
    pub fn home(mut self, key: &str) -> Result<Context, Fault> {
        self.home_path = match env::var(key) {
            Ok(s) => PathBuf::from(s),
            Err(_) => {
                let hp = match home::home_dir() {
                    Some(p) => p.join(".hdlmake"),
                    None => {
                        return Err(AnyError(format!(
                            "failed to detect user's home directory; please set the {} environment variable",
                            key
                        )))?
                    }
                };
                std::fs::create_dir_all(&hp)?;
                hp
            }
        };
        if self.home_path.is_dir() == false {
            return Err(AnyError(format!(
                "directory {:?} does not exist for {}",
                self.home_path, key
            )))?;
        }
        Ok(self)
    }

    /// Reads the configuration file `file` stored directly under the home directory.
    pub fn settings(mut self, file: &str) -> Result<Context, Fault> {
        self.config = Config::load(&self.home_path.join(file))?;
        Ok(self)
    }

    /// Sets the library area. Priority goes to `key`, then the configuration's
    /// `library.path`, then `<home>/libs`. The directory is created if missing.
    ///
    /// Must come after [Context::settings].
    pub fn libraries(mut self, key: &str) -> Result<Context, Fault> {
        self.libs_path = match env::var(key) {
            Ok(s) => PathBuf::from(s),
            Err(_) => match self.config.get_library_path() {
                Some(p) => self.home_path.join(p),
                None => self.home_path.join("libs"),
            },
        };
        std::fs::create_dir_all(&self.libs_path)?;
        Ok(self)
    }

    pub fn get_libs_path(&self) -> &Path {
        &self.libs_path
    }

    /// References the url template libraries are downloaded from.
    pub fn get_archive_url(&self) -> &str {
        match self.config.get_library_url() {
            Some(u) => u.as_str(),
            None => DEFAULT_ARCHIVE_URL,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::config::CONFIG_FILE;

    #[test]
    fn libraries_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[library]\npath = \"shared\"\n",
        )
        .unwrap();
        let home_key = "HDLMAKE_TEST_HOME_A";
        let libs_key = "HDLMAKE_TEST_LIBS_A";
        env::set_var(home_key, dir.path());
        env::remove_var(libs_key);
        let c = Context::new()
            .home(home_key)
            .unwrap()
            .settings(CONFIG_FILE)
            .unwrap()
            .libraries(libs_key)
            .unwrap();
        assert_eq!(c.get_libs_path(), dir.path().join("shared"));
        assert_eq!(c.get_libs_path().is_dir(), true);
        assert_eq!(c.get_archive_url(), DEFAULT_ARCHIVE_URL);
    }

    #[test]
    fn libraries_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let home_key = "HDLMAKE_TEST_HOME_B";
        let libs_key = "HDLMAKE_TEST_LIBS_B";
        env::set_var(home_key, dir.path());
        env::set_var(libs_key, dir.path().join("elsewhere"));
        let c = Context::new()
            .home(home_key)
            .unwrap()
            .settings(CONFIG_FILE)
            .unwrap()
            .libraries(libs_key)
            .unwrap();
        assert_eq!(c.get_libs_path(), dir.path().join("elsewhere"));
    }

    #[test]
    fn missing_home_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let home_key = "HDLMAKE_TEST_HOME_C";
        env::set_var(home_key, dir.path().join("nope"));
        assert_eq!(Context::new().home(home_key).is_err(), true);
    }
}
