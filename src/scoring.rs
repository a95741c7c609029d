// src/scoring.rs
//
// Hand-off to the external scoring script. We only build the command line,
// run it to completion in the repo root and check the exit status; its
// outputs are opaque to us.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use chrono::NaiveDate;
use tracing::{error, info};

use crate::config::options::Paths;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct ScoringCommand {
    pub program: OsString,
    pub script: PathBuf,
    pub reference: PathBuf,
    pub events: PathBuf,
    pub out_scored: PathBuf,
    pub out_summary: PathBuf,
    pub today: NaiveDate,
    pub workdir: PathBuf,
}

impl ScoringCommand {
    pub fn from_paths(paths: &Paths, program: impl Into<OsString>, today: NaiveDate) -> Self {
        Self {
            program: program.into(),
            script: paths.scorer_script.clone(),
            reference: paths.reference.clone(),
            events: paths.wins.clone(),
            out_scored: paths.scored.clone(),
            out_summary: paths.summary.clone(),
            today,
            workdir: paths.root.clone(),
        }
    }

    /// `<script> --geojson <ref> --events <wins> --out-geojson <scored> --out-summary <summary> --today <date>`
    pub fn args(&self) -> Vec<OsString> {
        let pair = |flag: &str, val: &OsStr| [OsString::from(flag), val.to_os_string()];
        let mut args = vec![self.script.clone().into_os_string()];
        args.extend(pair("--geojson", self.reference.as_os_str()));
        args.extend(pair("--events", self.events.as_os_str()));
        args.extend(pair("--out-geojson", self.out_scored.as_os_str()));
        args.extend(pair("--out-summary", self.out_summary.as_os_str()));
        args.extend(pair("--today", OsStr::new(&self.today.format("%Y-%m-%d").to_string())));
        args
    }

    /// Run synchronously. Spawn failure and non-zero exit are both errors.
    pub fn run(&self) -> Result<()> {
        let program = self.program.to_string_lossy().into_owned();
        info!(%program, script = %self.script.display(), today = %self.today, "running scorer");

        let status = Command::new(&self.program)
            .args(self.args())
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| {
                error!(%program, error = %source, "could not launch scorer");
                Error::ScoringSpawn { program: program.clone(), source }
            })?;

        if !status.success() {
            error!(%status, "scorer exited unsuccessfully");
            return Err(Error::Scoring { status });
        }
        info!("scorer finished");
        Ok(())
    }
}
