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

//! Generated blocks are directories whose HDL is produced by a vendor IP
//! wizard. Only the wizard's batch file and a manifest are kept; the manifest's
//! generation rule replays the batch file whenever the outputs are missing.

use crate::core::exec::Executor;
use crate::core::manifest::MANIFEST_FILE;
use crate::error::{Error, Fault};
use crate::util::filesystem;
use colored::Colorize;
use std::path::{Path, PathBuf};
use toml_edit::{Array, Document, Item, Value};

pub const BATCH_EXT: &str = "batch";

const CBX_ARGS: &str = "greybox_tmp/cbx_args.txt";
const LPM_TYPE_KEY: &str = "LPM_TYPE=";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Wizard {
    /// Xilinx CORE Generator
    Coregen,
    /// Altera MegaWizard
    Megawizard,
}

impl Wizard {
    fn command(&self) -> &str {
        match self {
            Self::Coregen => "coregen",
            Self::Megawizard => "qmegawiz",
        }
    }

    fn display_name(&self) -> &str {
        match self {
            Self::Coregen => "COREgen",
            Self::Megawizard => "MegaWizard",
        }
    }
}

/// Creates the block directory `dir`, launches the wizard inside it and
/// reduces its outputs to a batch file plus manifest.
pub fn scaffold(wizard: Wizard, dir: &Path, exec: &dyn Executor) -> Result<(), Fault> {
    if dir.exists() == true {
        return Err(Error::BlockExists(dir.to_path_buf()))?;
    }
    std::fs::create_dir_all(dir)?;
    // the wizard is interactive, so its exit code says little about its outputs
    if let Err(e) = exec.execute(wizard.command(), &[], dir) {
        println!(
            "{}: {} exited abnormally: {}",
            "warning".yellow(),
            wizard.command(),
            e
        );
    }
    match wizard {
        Wizard::Coregen => reduce_coregen(dir),
        Wizard::Megawizard => reduce_megawizard(dir),
    }
}

/// Finds the base name of the single file with extension `ext` in `dir`.
fn single_output(wizard: Wizard, dir: &Path, ext: &str) -> Result<String, Fault> {
    let found = filesystem::glob_names(dir, &format!("*.{}", ext))?;
    match found.len() {
        1 => Ok(found[0]
            .strip_suffix(&format!(".{}", ext))
            .unwrap_or(&found[0])
            .to_string()),
        _ => Err(Error::BlockWizardOutput(
            wizard.display_name().to_string(),
            format!(".{}", ext),
        ))?,
    }
}

fn reduce_coregen(dir: &Path) -> Result<(), Fault> {
    let base = single_output(Wizard::Coregen, dir, "xco")?;
    println!("info: base name: {}", base);
    let xco = std::fs::read_to_string(dir.join(format!("{}.xco", base)))?;
    let batch = coregen_batch(&xco);

    let mut sources = filesystem::glob_names(dir, "*.vhd")?;
    sources.extend(filesystem::glob_names(dir, "*.v")?);
    let artifacts = filesystem::glob_names(dir, "*.ngc")?;
    let batch_name = format!("{}.{}", base, BATCH_EXT);

    filesystem::wildcard_delete(dir, "*")?;
    std::fs::write(dir.join(&batch_name), batch)?;
    write_manifest(
        dir,
        &sources,
        &artifacts,
        &format!("coregen -b {}", batch_name),
    )
}

/// Turns a CORE Generator `.xco` file into a batch script regenerating it in place.
fn coregen_batch(xco: &str) -> String {
    let mut batch = String::new();
    let mut found = false;
    for line in xco.lines() {
        if found == false && line.to_uppercase().contains("SET") {
            found = true;
            batch.push_str("NEWPROJECT .\n");
        }
        batch.push_str(line);
        batch.push('\n');
    }
    batch
}

fn reduce_megawizard(dir: &Path) -> Result<(), Fault> {
    let base = single_output(Wizard::Megawizard, dir, "qip")?;
    println!("info: base name: {}", base);
    let cbx_path = dir.join(CBX_ARGS);
    let cbx = std::fs::read_to_string(&cbx_path)?;
    let lpm_type = match cbx
        .lines()
        .find_map(|l| l.strip_prefix(LPM_TYPE_KEY))
        .map(|t| t.trim_end())
    {
        Some(t) => t.to_string(),
        None => return Err(Error::BlockMissingLpmType(cbx_path))?,
    };
    let hdl = match ["vhd", "v"]
        .iter()
        .map(|ext| format!("{}.{}", base, ext))
        .find(|f| dir.join(f).exists())
    {
        Some(h) => h,
        None => {
            return Err(Error::BlockMissingHdl(
                Wizard::Megawizard.display_name().to_string(),
                base,
            ))?
        }
    };
    let batch_name = format!("{}.{}", base, BATCH_EXT);

    filesystem::wildcard_delete(dir, "*")?;
    std::fs::write(dir.join(&batch_name), cbx)?;
    write_manifest(
        dir,
        &[hdl.clone()],
        &[],
        &format!(
            "qmegawiz -silent module={} -f:{} {}",
            lpm_type, batch_name, hdl
        ),
    )
}

/// Writes a block's manifest with one list entry per line.
fn write_manifest(
    dir: &Path,
    sources: &[String],
    artifacts: &[String],
    generate: &str,
) -> Result<(), Fault> {
    let mut doc = Document::new();
    doc.insert("sources", list(sources));
    if artifacts.is_empty() == false {
        doc.insert("artifacts", list(artifacts));
    }
    doc.insert("generate", toml_edit::value(generate));
    std::fs::write(dir.join(MANIFEST_FILE), doc.to_string())?;
    Ok(())
}

fn list(items: &[String]) -> Item {
    let mut arr: Array = items.iter().map(|s| s.as_str()).collect();
    arr.iter_mut().for_each(|f| {
        f.decor_mut().set_prefix("\n    ");
        f.decor_mut().set_suffix("");
    });
    arr.set_trailing("\n");
    arr.set_trailing_comma(true);
    Item::Value(Value::Array(arr))
}

/// Lists the entries of the block directory `dir` and whether zeroing keeps them.
///
/// Errors unless the directory holds exactly one batch file.
pub fn zero_listing(dir: &Path) -> Result<Vec<(String, bool)>, Fault> {
    let batches = filesystem::glob_names(dir, &format!("*.{}", BATCH_EXT))?;
    if batches.len() != 1 {
        return Err(Error::ZeroBatchCount)?;
    }
    Ok(filesystem::glob_names(dir, "*")?
        .into_iter()
        .map(|n| {
            let keep = is_kept(&n);
            (n, keep)
        })
        .collect())
}

fn is_kept(name: &str) -> bool {
    name == MANIFEST_FILE || name.ends_with(&format!(".{}", BATCH_EXT))
}

/// Removes everything in `dir` except its batch file and manifest.
pub fn zero(dir: &Path) -> Result<(), Fault> {
    let doomed: Vec<PathBuf> = zero_listing(dir)?
        .into_iter()
        .filter(|(_, keep)| *keep == false)
        .map(|(n, _)| dir.join(n))
        .collect();
    filesystem::remove(&doomed)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::exec::recorder::Recorder;
    use crate::core::manifest::Manifest;
    use std::fs;

    const XCO: &str = "# BEGIN Project Options\nSET addpads = false\nSET device = xc6slx9\n# END Project Options\nCSET component_name=fifo\nGENERATE\n";

    #[test]
    fn batch_from_xco() {
        assert_eq!(
            coregen_batch(XCO),
            "# BEGIN Project Options\nNEWPROJECT .\nSET addpads = false\nSET device = xc6slx9\n# END Project Options\nCSET component_name=fifo\nGENERATE\n"
        );
    }

    #[test]
    fn coregen_block() {
        let dir = tempfile::tempdir().unwrap();
        let block = dir.path().join("fifo");
        let exec = Recorder::with_hook(|_, _, cwd| {
            for f in ["fifo.xco", "fifo.vhd", "fifo.ngc", "fifo.xise", "coregen.log"] {
                fs::write(cwd.join(f), XCO)?;
            }
            fs::create_dir(cwd.join("tmp"))?;
            Ok(())
        });
        scaffold(Wizard::Coregen, &block, &exec).unwrap();
        assert_eq!(exec.commands(), vec!["coregen"]);
        assert_eq!(
            filesystem::glob_names(&block, "*").unwrap(),
            vec!["fifo.batch", "hdlmake.toml"]
        );
        let man = Manifest::load(&block).unwrap();
        assert_eq!(man.get_sources(), &vec![String::from("fifo.vhd")]);
        assert_eq!(man.get_artifacts(), &vec![String::from("fifo.ngc")]);
        assert_eq!(
            man.get_generate(),
            Some(&String::from("coregen -b fifo.batch"))
        );

        // an existing directory is never overwritten
        let e = scaffold(Wizard::Coregen, &block, &exec).unwrap_err();
        assert_eq!(e.downcast_ref::<Error>(), Some(&Error::BlockExists(block)));
    }

    #[test]
    fn megawizard_block() {
        let dir = tempfile::tempdir().unwrap();
        let block = dir.path().join("ram");
        let exec = Recorder::with_hook(|_, _, cwd| {
            fs::create_dir(cwd.join("greybox_tmp"))?;
            fs::write(
                cwd.join("greybox_tmp/cbx_args.txt"),
                "INTENDED_DEVICE_FAMILY=\"Cyclone II\"\nLPM_TYPE=altsyncram\n",
            )?;
            fs::write(cwd.join("ram.qip"), "")?;
            fs::write(cwd.join("ram.vhd"), "")?;
            Ok(())
        });
        scaffold(Wizard::Megawizard, &block, &exec).unwrap();
        let man = Manifest::load(&block).unwrap();
        assert_eq!(man.get_sources(), &vec![String::from("ram.vhd")]);
        assert_eq!(man.get_artifacts().is_empty(), true);
        assert_eq!(
            man.get_generate(),
            Some(&String::from(
                "qmegawiz -silent module=altsyncram -f:ram.batch ram.vhd"
            ))
        );
        assert_eq!(
            fs::read_to_string(block.join("ram.batch")).unwrap(),
            "INTENDED_DEVICE_FAMILY=\"Cyclone II\"\nLPM_TYPE=altsyncram\n"
        );
    }

    #[test]
    fn wizard_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let block = dir.path().join("pll");
        let exec = Recorder::new();
        let e = scaffold(Wizard::Coregen, &block, &exec).unwrap_err();
        assert_eq!(
            e.downcast_ref::<Error>(),
            Some(&Error::BlockWizardOutput(
                String::from("COREgen"),
                String::from(".xco")
            ))
        );
    }

    #[test]
    fn zero_keeps_batch_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let block = dir.path();
        for f in ["fifo.batch", "hdlmake.toml", "fifo.vhd", "fifo.ngc"] {
            fs::write(block.join(f), "").unwrap();
        }
        fs::create_dir(block.join("tmp")).unwrap();
        assert_eq!(
            zero_listing(block).unwrap(),
            vec![
                (String::from("fifo.batch"), true),
                (String::from("fifo.ngc"), false),
                (String::from("fifo.vhd"), false),
                (String::from("hdlmake.toml"), true),
                (String::from("tmp"), false),
            ]
        );
        zero(block).unwrap();
        assert_eq!(
            filesystem::glob_names(block, "*").unwrap(),
            vec!["fifo.batch", "hdlmake.toml"]
        );

        fs::write(block.join("other.batch"), "").unwrap();
        let e = zero(block).unwrap_err();
        assert_eq!(e.downcast_ref::<Error>(), Some(&Error::ZeroBatchCount));
    }
}
