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

use crate::core::exec::Executor;
use crate::core::manifest::SignalMap;
use crate::core::simulate::SIMULATION_DIR;
use crate::error::Fault;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::Path;

const STARTUP_SCRIPT: &str = "startup.tcl";
/// Entry in a signal list that inserts an empty row.
const BLANK_ROW: &str = "---";

/// Writes the GTKWave startup script (and one translation file per signal
/// map) into the testbench's simulation directory, then opens the viewer.
///
/// The viewer exiting with an error is reported but does not fail the walk.
pub fn show(
    tb: &Path,
    unit: &str,
    signals: &[String],
    sigmaps: Option<&BTreeMap<String, SignalMap>>,
    exec: &dyn Executor,
) -> Result<(), Fault> {
    println!("[Preparing GTKWave]");
    let sim_dir = tb.join(SIMULATION_DIR);
    let empty = BTreeMap::new();
    let sigmaps = sigmaps.unwrap_or(&empty);
    std::fs::write(
        sim_dir.join(STARTUP_SCRIPT),
        startup_script(unit, signals, sigmaps),
    )?;
    for (tag, map) in sigmaps {
        std::fs::write(sim_dir.join(format!("{}.txt", tag)), translation(map))?;
    }
    let args = [
        String::from("-T"),
        format!("{}/{}", SIMULATION_DIR, STARTUP_SCRIPT),
        format!("{}/{}.ghw", SIMULATION_DIR, unit),
    ];
    if let Err(e) = exec.execute("gtkwave", &args, tb) {
        println!("{}: gtkwave did not exit cleanly: {}", "warning".yellow(), e);
    }
    Ok(())
}

fn startup_script(unit: &str, signals: &[String], sigmaps: &BTreeMap<String, SignalMap>) -> String {
    let mut tcl = String::new();
    for s in signals {
        match s.as_str() {
            BLANK_ROW => tcl.push_str("gtkwave::/Edit/Insert_Blank\n"),
            _ => tcl.push_str(&format!("gtkwave::addSignalsFromList {}\n", s)),
        }
    }
    tcl.push_str("gtkwave::setZoomFactor -26\n");
    tcl.push_str("gtkwave::setMarker 600ns\n");
    tcl.push_str("for { set i 0 } { $i <= [ gtkwave::getVisibleNumTraces ] } { incr i } { gtkwave::setTraceHighlightFromIndex $i off }\n");
    tcl.push_str("gtkwave::setLeftJustifySigs on\n");
    for (tag, map) in sigmaps {
        let name = format!(
            "top.{}.{}",
            unit,
            map.get_name().replace('[', "\\[").replace(']', "\\]")
        )
        .to_lowercase();
        tcl.push_str(&format!("gtkwave::highlightSignalsFromList {}\n", name));
        tcl.push_str(&format!(
            "set translateFile [ gtkwave::setCurrentTranslateFile {}/{}.txt ]\n",
            SIMULATION_DIR, tag
        ));
        tcl.push_str("gtkwave::installFileFilter $translateFile\n");
        tcl.push_str(&format!("gtkwave::unhighlightSignalsFromList {}\n", name));
    }
    tcl
}

/// Lists a signal map's `<value> <label>` pairs for a translate filter.
fn translation(map: &SignalMap) -> String {
    map.get_values()
        .iter()
        .map(|(k, v)| format!("{} {}\n", k, v))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::exec::recorder::Recorder;
    use crate::core::manifest::Manifest;
    use crate::error::Error;
    use std::str::FromStr;

    const TB: &str = r#"
sources = ["tb_alu8.vhdl"]
signals = ["top.tb_alu8.clk", "---", "top.tb_alu8.y[7:0]"]

[sigmaps.state]
name = "uut.State[1:0]"
"00" = "IDLE"
"01" = "BUSY"
"#;

    #[test]
    fn script_contents() {
        let man = Manifest::from_str(TB).unwrap();
        let tcl = startup_script(
            "tb_alu8",
            man.get_signals().unwrap(),
            man.get_sigmaps().unwrap(),
        );
        let lines: Vec<&str> = tcl.lines().collect();
        assert_eq!(lines[0], "gtkwave::addSignalsFromList top.tb_alu8.clk");
        assert_eq!(lines[1], "gtkwave::/Edit/Insert_Blank");
        assert_eq!(lines[2], "gtkwave::addSignalsFromList top.tb_alu8.y[7:0]");
        assert_eq!(
            tcl.contains("gtkwave::highlightSignalsFromList top.tb_alu8.uut.state\\[1:0\\]\n"),
            true
        );
        assert_eq!(
            tcl.contains("setCurrentTranslateFile simulation/state.txt ]\n"),
            true
        );
    }

    #[test]
    fn viewer_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(SIMULATION_DIR)).unwrap();
        let man = Manifest::from_str(TB).unwrap();
        let exec = Recorder::with_hook(|_, _, _| Err(Error::ChildProcErrorCode(1))?);
        show(
            dir.path(),
            "tb_alu8",
            man.get_signals().unwrap(),
            man.get_sigmaps(),
            &exec,
        )
        .unwrap();
        assert_eq!(exec.commands(), vec![String::from("gtkwave")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("simulation/state.txt")).unwrap(),
            "00 IDLE\n01 BUSY\n"
        );
    }
}
