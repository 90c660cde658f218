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

//! External processes are the only way the build reaches a toolchain, so every
//! stage runs them through an [Executor].

use crate::error::{Error, Fault, LastError};
use std::path::Path;
use std::process::{Command, ExitStatus};

pub trait Executor {
    /// Runs `command` with `args` from the directory `cwd`, blocking until it exits.
    fn execute(&self, command: &str, args: &[String], cwd: &Path) -> Result<(), Fault>;

    /// Runs a free-form command line through the system shell from the directory `cwd`.
    fn shell(&self, line: &str, cwd: &Path) -> Result<(), Fault>;

    /// Runs a toolchain step, labeling any failure with the tool's name.
    fn run(&self, command: &str, args: &[String], cwd: &Path) -> Result<(), Fault> {
        match self.execute(command, args, cwd) {
            Ok(()) => Ok(()),
            Err(e) => Err(Error::ExternalToolFailed(
                command.to_string(),
                LastError(e.to_string()),
            ))?,
        }
    }
}

/// Spawns real child processes.
#[derive(Debug, PartialEq, Default)]
pub struct SystemExecutor {
    verbose: bool,
}

impl SystemExecutor {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn check_status(status: ExitStatus) -> Result<(), Fault> {
        match status.code() {
            Some(0) => Ok(()),
            Some(num) => Err(Error::ChildProcErrorCode(num))?,
            None => Err(Error::ChildProcTerminated)?,
        }
    }
}

impl Executor for SystemExecutor {
    fn execute(&self, command: &str, args: &[String], cwd: &Path) -> Result<(), Fault> {
        // display the literal command being ran
        if self.verbose == true {
            let s = args
                .iter()
                .fold(String::new(), |x, y| x + "\"" + &y + "\" ");
            println!("info: running: {} {}", command, s);
        }
        let mut proc = Command::new(command).args(args).current_dir(cwd).spawn()?;
        Self::check_status(proc.wait()?)
    }

    fn shell(&self, line: &str, cwd: &Path) -> Result<(), Fault> {
        if cfg!(target_os = "windows") {
            self.execute("cmd", &[String::from("/C"), line.to_string()], cwd)
        } else {
            self.execute("sh", &[String::from("-c"), line.to_string()], cwd)
        }
    }
}

#[cfg(test)]
pub mod recorder {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    type Hook = Box<dyn Fn(&str, &[String], &Path) -> Result<(), Fault>>;

    #[derive(Debug, PartialEq, Clone)]
    pub struct Call {
        pub command: String,
        pub args: Vec<String>,
        pub cwd: PathBuf,
    }

    /// Records every requested process instead of spawning it.
    ///
    /// Shell lines are recorded with the whole line as the command.
    pub struct Recorder {
        calls: RefCell<Vec<Call>>,
        hook: Hook,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::with_hook(|_, _, _| Ok(()))
        }

        /// Invokes `f` for every call, letting it write output files or fail.
        pub fn with_hook<F>(f: F) -> Self
        where
            F: Fn(&str, &[String], &Path) -> Result<(), Fault> + 'static,
        {
            Self {
                calls: RefCell::new(Vec::new()),
                hook: Box::new(f),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        pub fn commands(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|c| c.command.clone()).collect()
        }
    }

    impl Executor for Recorder {
        fn execute(&self, command: &str, args: &[String], cwd: &Path) -> Result<(), Fault> {
            self.calls.borrow_mut().push(Call {
                command: command.to_string(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
            });
            (self.hook)(command, args, cwd)
        }

        fn shell(&self, line: &str, cwd: &Path) -> Result<(), Fault> {
            self.execute(line, &[], cwd)
        }
    }
}
