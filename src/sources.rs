//! Source list expansion.
//!
//! A source argument can be a file, a directory (walked recursively), a
//! glob pattern, or an http(s) URL kept verbatim. Prefixing any of these
//! with `-` removes the matching entries collected so far. The result is
//! sorted and de-duplicated so batches run in a stable order.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Expand a list of raw source arguments into concrete sources.
pub fn expand(arguments: &[String]) -> Vec<String> {
    let mut sources: BTreeSet<String> = BTreeSet::new();

    for argument in arguments {
        let path = Path::new(argument);
        if path.is_file() || argument.starts_with("http://") || argument.starts_with("https://") {
            sources.insert(argument.clone());
        } else if path.is_dir() {
            walk_files(path, &mut |file| {
                sources.insert(file);
            });
        } else if let Some(rest) = argument.strip_prefix('-') {
            let rest_path = Path::new(rest);
            if rest_path.is_file() {
                sources.remove(rest);
            } else if rest_path.is_dir() {
                walk_files(rest_path, &mut |file| {
                    sources.remove(&file);
                });
            } else {
                for file in glob_files(rest) {
                    sources.remove(&file);
                }
            }
        } else {
            for file in glob_files(argument) {
                sources.insert(file);
            }
        }
    }

    sources.into_iter().collect()
}

fn walk_files(dir: &Path, visit: &mut impl FnMut(String)) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("cannot read directory {}: {err}", dir.display());
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk_files(&path, visit);
        } else if path.is_file() {
            visit(path.to_string_lossy().into_owned());
        }
    }
}

fn glob_files(pattern: &str) -> Vec<String> {
    match glob::glob(pattern) {
        Ok(paths) => paths
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
        Err(err) => {
            log::warn!("bad glob pattern '{pattern}': {err}");
            Vec::new()
        }
    }
}
