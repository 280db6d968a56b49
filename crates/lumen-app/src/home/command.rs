//! Line commands accepted by the home page.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use lumen_core::constants::UPLOAD_EXTENSION;
use lumen_core::models::parse_user_date;

pub const HELP: &str = "\
Commands:
  upload [path]     upload a data file (no path lists .parquet files here)
  download [dir]    save the stored file (default: configured download dir)
  delete            delete the stored file
  start <date>      set the start date (dd.MM.yyyy or yyyy-MM-dd)
  end <date>        set the end date
  clear-dates       clear both dates
  predict           request predictions for the selected range
  refresh           re-check the stored file now
  status            show connection and polling status
  help              show this help
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(Option<PathBuf>),
    Download(Option<PathBuf>),
    Delete,
    Start(NaiveDate),
    End(NaiveDate),
    ClearDates,
    Predict,
    Refresh,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("invalid date '{0}', use dd.MM.yyyy or yyyy-MM-dd")]
    InvalidDate(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseCommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        match name.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "upload" => Ok(Self::Upload(arg.map(PathBuf::from))),
            "download" => Ok(Self::Download(arg.map(PathBuf::from))),
            "delete" => Ok(Self::Delete),
            "start" => parse_date("start", arg).map(Self::Start),
            "end" => parse_date("end", arg).map(Self::End),
            "clear-dates" => Ok(Self::ClearDates),
            "predict" => Ok(Self::Predict),
            "refresh" => Ok(Self::Refresh),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_date(command: &'static str, arg: Option<&str>) -> Result<NaiveDate, ParseCommandError> {
    let raw = arg.ok_or(ParseCommandError::MissingArgument {
        command,
        what: "a date",
    })?;
    parse_user_date(raw).ok_or_else(|| ParseCommandError::InvalidDate(raw.to_string()))
}

/// Files in `dir` the upload picker offers, sorted by name.
pub fn upload_candidates(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let matches = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(UPLOAD_EXTENSION));
            (matches && path.is_file()).then_some(path)
        })
        .collect();
    files.sort();
    Ok(files)
}
