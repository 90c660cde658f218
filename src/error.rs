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

use colored::Colorize;
use std::{fmt::Display, path::PathBuf};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("no manifest file found in directory {0:?}")]
    MissingManifest(PathBuf),
    #[error("failed to parse manifest {0:?}: {1}")]
    InvalidManifest(PathBuf, LastError),
    #[error("manifest {0:?} must list at least one entry in \"sources\"")]
    EmptySources(PathBuf),
    #[error("the generation rule for {0:?} failed: {1}")]
    GenerationFailed(PathBuf, LastError),
    #[error("required file {1:?} is missing from {0:?} and no generation rule was specified")]
    MissingArtifact(PathBuf, String),
    #[error("the {0} process failed: {1}")]
    ExternalToolFailed(String, LastError),
    #[error("exited with error code: {0}")]
    ChildProcErrorCode(i32),
    #[error("terminated by signal")]
    ChildProcTerminated,
    #[error("the simulation in {0:?} produced unexpected results")]
    SimulationMismatch(PathBuf),
    #[error("the simulation in {0:?} did not produce a results file to compare against the expected fixture")]
    MissingResult(PathBuf),
    #[error("a template was provided but no platform{0}")]
    TemplateWithoutPlatform(Hint),
    #[error("a platform was provided but no template{0}")]
    PlatformWithoutTemplate(Hint),
    #[error("unsupported validation tool {0:?}{1}")]
    UnsupportedValidator(String, Hint),
    #[error("failed to read platform file {0:?}: {1}")]
    InvalidPlatform(PathBuf, LastError),
    #[error("library reference {0:?} must follow the form <owner>/<name>")]
    InvalidLibraryId(String),
    #[error("failed to fetch library from {0}: status {1}")]
    FetchFailed(String, u32),
    #[error("fetched archive did not contain the expected directory {0:?}")]
    FetchMissingRoot(PathBuf),
    #[error("failed to deduce the top-level unit from {0:?}")]
    TopNotFound(PathBuf),
    #[error("report file {0:?} is missing warning information")]
    ReportMissingSummary(PathBuf),
    #[error("found {0} errors:{1}")]
    SynthesisErrors(usize, String),
    #[error("found {0} errors and {1} warnings")]
    SynthesisProblems(usize, usize),
    #[error("cannot infer the Xilinx root from the system PATH")]
    XilinxRootNotFound,
    #[error("block directory {0:?} already exists")]
    BlockExists(PathBuf),
    #[error("{0} failed to produce exactly one {1} file")]
    BlockWizardOutput(String, String),
    #[error("{0:?} did not specify LPM_TYPE")]
    BlockMissingLpmType(PathBuf),
    #[error("{0} failed to produce a hdl file named {1:?}")]
    BlockMissingHdl(String, String),
    #[error("refusing to zero a directory which does not contain exactly one .batch file")]
    ZeroBatchCount,
    #[error("batch zero operation aborted")]
    ZeroAborted,
    #[error("failed to resolve dependencies: {0}")]
    ResolutionFailed(LastError),
}

/// A boxed error propagated up to the command layer.
pub type Fault = Box<dyn std::error::Error>;

/// A one-off error message that does not warrant its own [Error] variant.
#[derive(Debug, PartialEq)]
pub struct AnyError(pub String);

impl std::error::Error for AnyError {}

impl Display for AnyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq)]
pub struct LastError(pub String);

impl Display for LastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Error::lowerize(self.0.to_string()))
    }
}

impl Error {
    pub fn lowerize(s: String) -> String {
        // get the first word
        let first_word = match s.split_whitespace().next() {
            Some(w) => w,
            None => return s,
        };
        // retain punctuation if the first word is all-caps and longer than 1 character
        if first_word.len() > 1
            && first_word
                .chars()
                .find(|c| c.is_ascii_lowercase() == true)
                .is_none()
        {
            s.to_string()
        } else {
            s.char_indices()
                .map(|(i, c)| if i == 0 { c.to_ascii_lowercase() } else { c })
                .collect()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Hint {
    PairTemplatePlatform,
    ValidatorList,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::PairTemplatePlatform => {
                "the \"--template\" and \"--platform\" options must be used together"
            }
            Self::ValidatorList => "supported validation tools are \"x\" (Xilinx) and \"a\" (Altera)",
        };
        write!(
            f,
            "\n\n{}: {}",
            "hint".green(),
            Error::lowerize(message.to_string())
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lowerize_first_letter() {
        assert_eq!(
            Error::lowerize(String::from("No such file")),
            String::from("no such file")
        );
        // acronyms keep their case
        assert_eq!(
            Error::lowerize(String::from("XST exited early")),
            String::from("XST exited early")
        );
        assert_eq!(Error::lowerize(String::new()), String::new());
    }
}
