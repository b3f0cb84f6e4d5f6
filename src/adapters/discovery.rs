use crate::utils::error::{OverlapError, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// CSV files directly inside `dir`, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    tracing::debug!("Found {} CSV files in {}", files.len(), dir.display());
    Ok(files)
}

/// Prints a numbered menu and reads a 1-based choice.
pub fn choose_file<R: BufRead, W: Write>(files: &[PathBuf], mut input: R, mut output: W) -> Result<PathBuf> {
    writeln!(output, "Choose a file to load (enter the file number):")?;
    for (index, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        writeln!(output, "{}. {}", index + 1, name)?;
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();

    let chosen = answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| files.get(index))
        .ok_or_else(|| OverlapError::InvalidSelection {
            input: answer.to_string(),
        })?;

    writeln!(output, "You chose: {}", chosen.display())?;
    Ok(chosen.clone())
}

/// Lists `dir` and asks for a file; fails when there is nothing to choose.
pub fn discover_input<R: BufRead, W: Write>(dir: &Path, input: R, output: W) -> Result<PathBuf> {
    let files = list_csv_files(dir)?;
    if files.is_empty() {
        return Err(OverlapError::NoInputFiles {
            dir: dir.display().to_string(),
        });
    }
    choose_file(&files, input, output)
}
