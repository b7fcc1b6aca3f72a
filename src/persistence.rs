//! File I/O for solver output.
//!
//! Output for a puzzle named `NAME` goes to `<dir>/NAME/<category>_NAME`:
//! - `solns`: one solution per line, matrix row indices separated by spaces
//! - `linfos`: one `index: placement` line per matrix row
//! - `layouts`: every piece with all of its layouts
//! - `stats`: one line appended per run,
//!   `<unix seconds>: NAME: updates=U, solns=S, elapsed=E`

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PersistenceError;
use crate::matrix::Linfo;
use crate::pieces::Piece;
use crate::puzzles::{Puzzle, SolvedPuzzle};
use crate::solver::SearchStatistics;

/// Path of one output file for a puzzle.
pub fn output_path(dir: &Path, name: &str, category: &str) -> PathBuf {
    dir.join(name).join(format!("{category}_{name}"))
}

fn create(path: &Path) -> Result<BufWriter<File>, PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, "create directory", e))?;
    }
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| PersistenceError::io(path, "create", e))
}

/// Writes lines produced by `write_lines`, mapping I/O errors to `path`.
fn write_file<F>(path: &Path, write_lines: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let mut file = create(path)?;
    write_lines(&mut file)
        .and_then(|()| file.flush())
        .map_err(|e| PersistenceError::io(path, "write", e))
}

/// Saves solutions, one line of space-separated row indices each.
pub fn save_solutions(path: &Path, solutions: &[Vec<usize>]) -> Result<(), PersistenceError> {
    write_file(path, |file| {
        for solution in solutions {
            let line: Vec<String> = solution.iter().map(usize::to_string).collect();
            writeln!(file, "{}", line.join(" "))?;
        }
        Ok(())
    })
}

/// Loads solutions written by [`save_solutions`]. Blank lines are skipped.
pub fn load_solutions(path: &Path) -> Result<Vec<Vec<usize>>, PersistenceError> {
    let file = File::open(path).map_err(|e| PersistenceError::io(path, "open", e))?;
    let mut solutions = Vec::new();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| PersistenceError::io(path, "read", e))?;
        if line.trim().is_empty() {
            continue;
        }
        let solution = line
            .split_whitespace()
            .map(|token| {
                token.parse::<usize>().map_err(|e| PersistenceError::Parse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: format!("bad row index '{token}': {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        solutions.push(solution);
    }

    Ok(solutions)
}

/// Saves the placement behind every matrix row.
pub fn save_linfos(path: &Path, linfos: &[Linfo]) -> Result<(), PersistenceError> {
    write_file(path, |file| {
        for (row, linfo) in linfos.iter().enumerate() {
            writeln!(file, "{row}: {linfo}")?;
        }
        Ok(())
    })
}

/// Saves every piece's layouts.
pub fn save_layouts(path: &Path, pieces: &[Piece]) -> Result<(), PersistenceError> {
    write_file(path, |file| {
        for (index, piece) in pieces.iter().enumerate() {
            write!(file, "#{index} {piece}")?;
        }
        Ok(())
    })
}

/// Formats the statistics line appended by [`append_stats`].
pub fn stats_line(timestamp: u64, name: &str, stats: &SearchStatistics) -> String {
    format!(
        "{timestamp}: {name}: updates={}, solns={}, elapsed={:.6}",
        stats.updates,
        stats.solutions_found,
        stats.elapsed.as_secs_f64()
    )
}

/// Appends one statistics line to `path`, creating the file if needed.
pub fn append_stats(path: &Path, name: &str, stats: &SearchStatistics) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, "create directory", e))?;
    }
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| PersistenceError::io(path, "open", e))?;
    writeln!(file, "{}", stats_line(timestamp, name, stats))
        .map_err(|e| PersistenceError::io(path, "append to", e))
}

/// Writes layouts, placements, solutions and statistics for a solved puzzle.
pub fn save(dir: &Path, puzzle: &Puzzle, solved: &SolvedPuzzle) -> Result<(), PersistenceError> {
    let name = puzzle.name();
    save_layouts(&output_path(dir, name, "layouts"), puzzle.pieces())?;
    save_linfos(&output_path(dir, name, "linfos"), &solved.cover.linfos)?;
    save_solutions(&output_path(dir, name, "solns"), &solved.result.solutions)?;
    append_stats(&output_path(dir, name, "stats"), name, &solved.result.stats)?;
    log::info!("saved {} output to {}", name, dir.join(name).display());
    Ok(())
}
