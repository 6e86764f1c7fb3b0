//! Job list handling: a JSON object mapping job names to config files.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use langmerge::Error;

use crate::job;

/// Loads a job list file, resolving each config path against the list
/// file's directory. Entry order is preserved.
pub fn load_job_list<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, PathBuf>, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let entries: IndexMap<String, PathBuf> = serde_json::from_reader(BufReader::new(file))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(entries
        .into_iter()
        .map(|(name, config)| (name, base.join(config)))
        .collect())
}

/// Resolves a selector into the jobs to run.
///
/// `None` or `"all"` selects every configured job. A known name selects
/// that job. An unknown name is taken as a literal config file path, so ad
/// hoc configs can run without being listed.
fn select_jobs(
    list: &IndexMap<String, PathBuf>,
    selector: Option<&str>,
) -> Vec<(String, PathBuf)> {
    match selector {
        None | Some("all") => list
            .iter()
            .map(|(name, path)| (name.clone(), path.clone()))
            .collect(),
        Some(name) => match list.get(name) {
            Some(path) => vec![(name.to_string(), path.clone())],
            None => vec![(name.to_string(), PathBuf::from(name))],
        },
    }
}

/// Runs the selected jobs. A failing job is reported on stderr and does not
/// stop its siblings; the number of failures is returned so the caller can
/// pick the exit code.
pub fn run_jobs<P: AsRef<Path>>(list_path: P, selector: Option<&str>) -> Result<usize, Error> {
    let list = load_job_list(list_path)?;
    let mut failed = 0;
    for (name, config_path) in select_jobs(&list, selector) {
        if let Err(error) = job::run_job(&config_path) {
            eprintln!("job `{name}` failed: {error}");
            failed += 1;
        }
    }
    Ok(failed)
}
