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

//! Drives a vendor toolchain from a resolved file set to a programming file.

use crate::core::exec::Executor;
use crate::core::fileset::FileSet;
use crate::core::platform::{Platform, Vendor};
use crate::core::project;
use crate::core::validate::{args, quartus_args};
use crate::error::{Error, Fault};
use crate::util::filesystem;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

const IMPACT_BATCH: &str = "temp.batch";

/// Message filter suppressing the LogicLock license warning.
const ALTERA_SRF: &str = r#"{ "Warning" "WCPT_FEATURE_DISABLED_POST" "LogicLock " "Warning (292013): Feature LogicLock is only available with a valid subscription license. You can purchase a software subscription to gain full access to this feature." {  } {  } 0 292013 "Feature %1!s! is only available with a valid subscription license. You can purchase a software subscription to gain full access to this feature." 1 0 "" 0 -1}
"#;

/// Runs the full build for `platform` from the directory `cwd`.
pub fn build(
    cwd: &Path,
    platform: &Platform,
    files: &FileSet,
    exec: &dyn Executor,
) -> Result<(), Fault> {
    match platform.get_vendor() {
        Vendor::Xilinx => build_xilinx(cwd, platform, files, exec),
        Vendor::Altera => build_altera(cwd, platform, files, exec),
        Vendor::Cpld => build_cpld(cwd, platform, files, exec),
    }
}

fn platform_file(platform: &Platform, name: &str) -> String {
    crate::core::fileset::standardize(&platform.file(name))
}

fn build_xilinx(
    cwd: &Path,
    platform: &Platform,
    files: &FileSet,
    exec: &dyn Executor,
) -> Result<(), Fault> {
    let fpga = platform.get_fpga()?.as_str();
    std::fs::write(cwd.join("top_level.prj"), project::xst_project(files))?;
    std::fs::create_dir_all(cwd.join("xst").join("projnav.tmp"))?;

    let xst = platform_file(platform, "platform.xst");
    let ucf = platform_file(platform, "platform.ucf");
    let ut = platform_file(platform, "platform.ut");
    exec.run(
        "xst",
        &args(&["-intstyle", "ise", "-ifn", xst.as_str(), "-ofn", "top_level.syr"]),
        cwd,
    )?;
    exec.run(
        "ngdbuild",
        &args(&[
            "-intstyle", "ise", "-dd", "_ngo", "-nt", "timestamp", "-uc", ucf.as_str(), "-p", fpga,
            "top_level.ngc", "top_level.ngd",
        ]),
        cwd,
    )?;
    let mut map = args(&["-intstyle", "ise", "-p", fpga]);
    map.extend(split_flags(platform.get_map_flags()));
    map.extend(args(&[
        "-ir", "off", "-pr", "off", "-c", "100", "-w", "-o", "top_level_map.ncd", "top_level.ngd",
        "top_level.pcf",
    ]));
    exec.run("map", &map, cwd)?;
    let mut par = args(&["-w", "-intstyle", "ise", "-ol", "high"]);
    par.extend(split_flags(platform.get_par_flags()));
    par.extend(args(&["top_level_map.ncd", "top_level.ncd", "top_level.pcf"]));
    exec.run("par", &par, cwd)?;
    exec.run(
        "bitgen",
        &args(&["-intstyle", "ise", "-f", ut.as_str(), "top_level.ncd"]),
        cwd,
    )?;

    // programming is only scripted for platforms that ship an iMPACT template
    let batch = cwd.join(platform.file("platform.batch"));
    if batch.exists() == false {
        return Ok(());
    }
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    let root = match infer_xilinx_root(&path_var) {
        Some(r) => r,
        None => return Err(Error::XilinxRootNotFound)?,
    };
    let script = std::fs::read_to_string(&batch)?.replace("${XILINX}", &root);
    std::fs::write(
        cwd.join(IMPACT_BATCH),
        format!("setPreference -pref KeepSVF:True\n{}", script),
    )?;
    exec.run("impact", &args(&["-batch", IMPACT_BATCH]), cwd)?;
    std::fs::remove_file(cwd.join(IMPACT_BATCH))?;
    Ok(())
}

fn build_altera(
    cwd: &Path,
    platform: &Platform,
    files: &FileSet,
    exec: &dyn Executor,
) -> Result<(), Fault> {
    let qsf = cwd.join("top_level.qsf");
    std::fs::copy(cwd.join(platform.file("platform.qsf")), &qsf)?;
    std::fs::copy(
        cwd.join(platform.file("platform.sdc")),
        cwd.join("top_level.sdc"),
    )?;
    let mut settings = std::fs::read_to_string(&qsf)?;
    if settings.is_empty() == false && settings.ends_with('\n') == false {
        settings.push('\n');
    }
    settings.push_str(&project::quartus_assignments(files));
    std::fs::write(&qsf, settings)?;
    std::fs::write(cwd.join("top_level.srf"), ALTERA_SRF)?;

    exec.run("quartus_map", &quartus_args(), cwd)?;
    exec.run("quartus_fit", &quartus_args(), cwd)?;
    exec.run(
        "quartus_asm",
        &args(&[
            "--read_settings_files=on",
            "--write_settings_files=off",
            "top_level",
            "-c",
            "top_level",
        ]),
        cwd,
    )
}

fn build_cpld(
    cwd: &Path,
    platform: &Platform,
    files: &FileSet,
    exec: &dyn Executor,
) -> Result<(), Fault> {
    let device = platform.get_device()?.as_str();
    std::fs::write(cwd.join("top_level.prj"), project::xst_project(files))?;
    std::fs::create_dir_all(cwd.join("xst").join("projnav.tmp"))?;

    let xst = platform_file(platform, "platform.xst");
    let ucf = platform_file(platform, "platform.ucf");
    exec.run(
        "xst",
        &args(&["-intstyle", "ise", "-ifn", xst.as_str(), "-ofn", "top_level.syr"]),
        cwd,
    )?;
    exec.run(
        "ngdbuild",
        &args(&[
            "-intstyle", "ise", "-dd", "_ngo", "-uc", ucf.as_str(), "-p", device, "top_level.ngc",
            "top_level.ngd",
        ]),
        cwd,
    )?;
    exec.run(
        "cpldfit",
        &args(&[
            "-intstyle", "ise", "-p", device, "-ofmt", "vhdl", "-optimize", "speed", "-loc", "on",
            "-slew", "fast", "-init", "low", "-inputs", "32", "-pterms", "28", "-unused",
            "float", "-power", "std", "-terminate", "keeper", "top_level.ngd",
        ]),
        cwd,
    )?;
    exec.run(
        "hprep6",
        &args(&["-s", "IEEE1149", "-n", "top_level", "-i", "top_level"]),
        cwd,
    )
}

fn split_flags(flags: &str) -> Vec<String> {
    flags.split_whitespace().map(|s| s.to_string()).collect()
}

/// Infers the ISE installation root from the first `PATH` entry holding `xst`.
fn infer_xilinx_root(path_var: &OsStr) -> Option<String> {
    let exe = match cfg!(target_os = "windows") {
        true => "xst.exe",
        false => "xst",
    };
    std::env::split_paths(path_var)
        .find(|dir| dir.join(exe).exists())
        .and_then(|dir| {
            let dir = dir.display().to_string();
            dir.rfind("ISE").map(|i| format!("{}ISE", &dir[..i]))
        })
}

/// Copies every source (flattened by file name) into `subdir` for building
/// from the vendor's IDE instead.
pub fn prepare_ide(
    cwd: &Path,
    subdir: &Path,
    platform: &Platform,
    files: &FileSet,
) -> Result<(), Fault> {
    let dest = cwd.join(subdir);
    std::fs::create_dir_all(&dest)?;
    let mut items: Vec<PathBuf> = files.iter().map(|f| cwd.join(f)).collect();
    if platform.get_vendor() == Vendor::Xilinx {
        items.extend(filesystem::glob_in(cwd, "*.ngc")?);
        items.push(cwd.join(platform.file("platform.ucf")));
    }
    filesystem::copy_flat(&items, &dest)?;
    println!("info: copied {} files into {:?}", items.len(), subdir);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::exec::recorder::Recorder;
    use std::fs;

    fn platform(root: &Path, toml: &str) -> Platform {
        let dir = Path::new("platforms/board");
        fs::create_dir_all(root.join(dir)).unwrap();
        fs::write(root.join(dir).join("platform.toml"), toml).unwrap();
        Platform::load(root, dir).unwrap()
    }

    fn files() -> FileSet {
        vec![String::from("top.vhdl"), String::from("uart.v")]
            .into_iter()
            .collect()
    }

    #[test]
    fn xilinx_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let p = platform(
            dir.path(),
            "vendor = \"xilinx\"\nfpga = \"xc6slx45-csg324-3\"\npar_flags = \"-mt 4\"\n",
        );
        let exec = Recorder::new();
        build(dir.path(), &p, &files(), &exec).unwrap();
        assert_eq!(
            exec.commands(),
            vec!["xst", "ngdbuild", "map", "par", "bitgen"]
        );
        let par = &exec.calls()[3].args;
        assert_eq!(par.contains(&String::from("-mt")), true);
        assert_eq!(
            fs::read_to_string(dir.path().join("top_level.prj")).unwrap(),
            "vhdl work \"top.vhdl\"\nverilog work \"uart.v\"\n"
        );
    }

    #[test]
    fn altera_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let p = platform(dir.path(), "vendor = \"altera\"\n");
        fs::write(
            dir.path().join("platforms/board/platform.qsf"),
            "set_global_assignment -name DEVICE EP4CE22F17C6",
        )
        .unwrap();
        fs::write(dir.path().join("platforms/board/platform.sdc"), "").unwrap();
        let exec = Recorder::new();
        build(dir.path(), &p, &files(), &exec).unwrap();
        assert_eq!(
            exec.commands(),
            vec!["quartus_map", "quartus_fit", "quartus_asm"]
        );
        let qsf = fs::read_to_string(dir.path().join("top_level.qsf")).unwrap();
        assert_eq!(
            qsf,
            "set_global_assignment -name DEVICE EP4CE22F17C6\nset_global_assignment -name VHDL_FILE top.vhdl\nset_global_assignment -name VERILOG_FILE uart.v\n"
        );
        assert_eq!(dir.path().join("top_level.srf").exists(), true);
    }

    #[test]
    fn cpld_pipeline_stops_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let p = platform(dir.path(), "vendor = \"cpld\"\ndevice = \"xc2c64a-7-vq44\"\n");
        let exec = Recorder::with_hook(|cmd, _, _| match cmd {
            "cpldfit" => Err(Error::ChildProcErrorCode(1))?,
            _ => Ok(()),
        });
        let e = build(dir.path(), &p, &files(), &exec).unwrap_err();
        assert_eq!(
            matches!(e.downcast_ref::<Error>(), Some(Error::ExternalToolFailed(t, _)) if t == "cpldfit"),
            true
        );
        assert_eq!(exec.commands(), vec!["xst", "ngdbuild", "cpldfit"]);
    }

    #[test]
    fn xilinx_root_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("14.7/ISE_DS/ISE/bin/lin64");
        fs::create_dir_all(&bin).unwrap();
        let exe = if cfg!(target_os = "windows") { "xst.exe" } else { "xst" };
        fs::write(bin.join(exe), "").unwrap();
        let path_var = std::env::join_paths([dir.path().to_path_buf(), bin]).unwrap();
        let root = infer_xilinx_root(&path_var).unwrap();
        assert_eq!(root.ends_with("ISE_DS/ISE") || root.ends_with("ISE_DS\\ISE"), true);
        assert_eq!(infer_xilinx_root(OsStr::new("")), None);
    }

    #[test]
    fn ide_copy() {
        let dir = tempfile::tempdir().unwrap();
        let p = platform(dir.path(), "vendor = \"xilinx\"\nfpga = \"xc6slx9\"\n");
        fs::write(dir.path().join("platforms/board/platform.ucf"), "NET clk").unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("lib/core.vhd"), "").unwrap();
        fs::write(dir.path().join("top.vhdl"), "").unwrap();
        fs::write(dir.path().join("fifo.ngc"), "").unwrap();
        let set: FileSet = vec![String::from("top.vhdl"), String::from("lib/core.vhd")]
            .into_iter()
            .collect();
        prepare_ide(dir.path(), Path::new("ise"), &p, &set).unwrap();
        for f in ["top.vhdl", "core.vhd", "fifo.ngc", "platform.ucf"] {
            assert_eq!(dir.path().join("ise").join(f).exists(), true);
        }
    }
}
