//! Extraction of the evolution time from a BAM timer file.
//!
//! A timer file is plain text; near its end BAM prints one summary row per
//! timed phase, whitespace-separated:
//!
//! evolve_grid_iteration        256      5403.271     92.4
//!
//! The third field of the `evolve_grid_iteration` row is the duration we
//! plot. Only the last [`TAIL_WINDOW`] lines are searched, from the end
//! toward the start, so the row closest to the end wins and a large file
//! stays cheap to scan.

use crate::Result;
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Substring identifying the evolution-time row.
pub const EVOLVE_MARKER: &str = "evolve_grid_iteration";

/// How many lines at the end of a timer file are searched for the marker.
pub const TAIL_WINDOW: usize = 10;

// First three whitespace-separated fields of a row. The value field is
// captured as \S+ rather than a numeric class so that a malformed number is
// reported as non-numeric instead of as a missing field.
const ROW_FIELDS_RE: &str = r"^\s*(\S+)\s+(\S+)\s+(\S+)";

/// Pull the evolution time out of `path`.
///
/// Fatal if the marker row is malformed (fewer than three fields, or a
/// third field that does not parse as a float) or if no marker row exists
/// within the tail window, even when one appears earlier in the file.
pub fn extract_evolve_time(path: &Path) -> Result<f64> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read timer file {}", path.display()))?;

    let re = Regex::new(ROW_FIELDS_RE)?;

    let lines: Vec<&str> = text.lines().collect();
    let tail_start = lines.len().saturating_sub(TAIL_WINDOW);

    for line in lines[tail_start..].iter().rev() {
        if !line.contains(EVOLVE_MARKER) {
            continue;
        }

        let caps = match re.captures(line) {
            Some(c) => c,
            None => {
                bail!(
                    "unexpected format in {}: expected at least 3 whitespace-separated fields: {:?}",
                    path.display(),
                    line.trim()
                );
            }
        };

        let value = caps.get(3).unwrap().as_str();
        let time: f64 = value.parse().with_context(|| {
            format!("non-numeric time in {}: {:?}", path.display(), line.trim())
        })?;
        return Ok(time);
    }

    bail!(
        "no {} row within the last {} lines of {}",
        EVOLVE_MARKER,
        TAIL_WINDOW,
        path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_timer(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn extracts_third_field_of_marker_row() {
        let dir = TempDir::new().unwrap();
        let path = write_timer(
            &dir,
            "timer.0000",
            "BAM timer summary\n\
             some_other_phase             12     99.5     1.0\n\
             evolve_grid_iteration        12     5403.271 92.4\n\
             total                        12     151.8    100.0\n",
        );
        assert_eq!(extract_evolve_time(&path).unwrap(), 5403.271);
    }

    #[test]
    fn row_closest_to_the_end_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_timer(
            &dir,
            "timer.0000",
            "evolve_grid_iteration  1  111.0\n\
             evolve_grid_iteration  2  222.0\n",
        );
        assert_eq!(extract_evolve_time(&path).unwrap(), 222.0);
    }

    #[test]
    fn scientific_notation_parses() {
        let dir = TempDir::new().unwrap();
        let path = write_timer(&dir, "timer.0000", "evolve_grid_iteration 3 1.25e3\n");
        assert_eq!(extract_evolve_time(&path).unwrap(), 1250.0);
    }

    #[test]
    fn marker_on_last_line_of_window_is_found() {
        let dir = TempDir::new().unwrap();
        let mut contents = String::from("evolve_grid_iteration  9  7.5\n");
        for i in 0..TAIL_WINDOW - 1 {
            contents.push_str(&format!("filler line {i}\n"));
        }
        let path = write_timer(&dir, "timer.0000", &contents);
        assert_eq!(extract_evolve_time(&path).unwrap(), 7.5);
    }

    #[test]
    fn marker_outside_tail_window_is_missing() {
        let dir = TempDir::new().unwrap();
        let mut contents = String::from("evolve_grid_iteration  9  7.5\n");
        for i in 0..TAIL_WINDOW {
            contents.push_str(&format!("filler line {i}\n"));
        }
        let path = write_timer(&dir, "timer.0000", &contents);
        let err = extract_evolve_time(&path).unwrap_err();
        assert!(err.to_string().contains(EVOLVE_MARKER));
        assert!(err.to_string().contains("timer.0000"));
    }

    #[test]
    fn too_few_fields_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = write_timer(&dir, "timer.0000", "evolve_grid_iteration 12\n");
        let err = extract_evolve_time(&path).unwrap_err();
        assert!(err.to_string().contains("unexpected format"));
        assert!(err.to_string().contains("timer.0000"));
    }

    #[test]
    fn non_numeric_value_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = write_timer(&dir, "timer.0000", "evolve_grid_iteration 12 abc\n");
        let err = extract_evolve_time(&path).unwrap_err();
        assert!(err.to_string().contains("non-numeric time"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("timer.0404");
        let err = extract_evolve_time(&path).unwrap_err();
        assert!(err.to_string().contains("timer.0404"));
    }
}
