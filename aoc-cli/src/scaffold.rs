//! Day folder creation for the `new` command

use crate::config::Structure;
use crate::error::CliError;
use aoc_puzzle::PuzzleRef;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static DAY_FOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^day[0-9]{2}$").expect("day folder pattern is valid"));
static YEAR_FOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("year folder pattern is valid"));

/// Folder the template is copied from, relative to the working directory
pub const TEMPLATE_DIR: &str = "template";

/// Where the folder for `puzzle` goes when `new` runs in `cwd`
///
/// Inside a day folder the new day is created next to it. With the
/// multi-year layout, days go into a `{year}` folder unless `cwd` already is
/// a year folder.
pub fn day_dir(cwd: &Path, puzzle: PuzzleRef, structure: Structure) -> PathBuf {
    let mut root = cwd;
    if name_matches(root, &DAY_FOLDER_REGEX) {
        root = root.parent().unwrap_or(root);
    }

    let mut target = root.to_path_buf();
    if structure == Structure::MultiYear && !name_matches(root, &YEAR_FOLDER_REGEX) {
        target.push(puzzle.year.to_string());
    }
    target.push(puzzle.folder_name());
    target
}

fn name_matches(path: &Path, regex: &Regex) -> bool {
    path.file_name()
        .is_some_and(|name| regex.is_match(&name.to_string_lossy()))
}

/// Recursively copy the contents of `src` into `dst`, overwriting files
pub fn copy_template(src: &Path, dst: &Path) -> Result<(), CliError> {
    let wrap = |path: &Path| {
        let path = path.to_path_buf();
        move |source| CliError::Template { path, source }
    };

    fs::create_dir_all(dst).map_err(wrap(dst))?;
    for entry in fs::read_dir(src).map_err(wrap(src))? {
        let entry = entry.map_err(wrap(src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if entry.file_type().map_err(wrap(&from))?.is_dir() {
            copy_template(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(wrap(&from))?;
            debug!(from = %from.display(), to = %to.display(), "copied template file");
        }
    }
    Ok(())
}
