//! Composing note content in an external editor.
use std::{
    fs::{read_to_string, OpenOptions},
    io::Write,
    path::Path,
    process::Command,
};

use log::info;
use shell_words::split;
use tempfile::Builder;

use crate::{Config, Result, ShelfError};

/// Opens the configured editor on a scratch file seeded with `existing` and
/// returns what the user saved, minus the template lines.
pub fn compose(config: &Config, title: &str, existing: &str) -> Result<String> {
    let temp_file = Builder::new().suffix(".md").tempfile()?;
    let temp_path = temp_file.path().to_path_buf();

    write_template(&temp_path, title, existing)?;

    info!("Opening editor to write note content. Save and exit when done...");
    launch_editor(&config.get_editor_command(), &temp_path)?;

    let content = read_to_string(&temp_path)?;
    Ok(process_editor_content(&content, title))
}

fn write_template(path: &Path, title: &str, existing: &str) -> Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;

    writeln!(file, "# {}", title)?;
    writeln!(file, "<!-- Write the note below. Lines like this one are ignored. -->")?;
    writeln!(file, "<!-- Save and exit the editor when you're done. -->")?;
    writeln!(file)?;
    if !existing.is_empty() {
        writeln!(file, "{}", existing)?;
    }

    Ok(())
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| ShelfError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let (program, rest) = args.split_first().ok_or_else(|| ShelfError::EditorError {
        message: "Empty editor command".to_string(),
    })?;

    let status = Command::new(program)
        .args(rest)
        .arg(file_path)
        .status()
        .map_err(|e| ShelfError::EditorError {
            message: format!("Failed to execute editor command '{}': {}", program, e),
        })?;

    if !status.success() {
        return Err(ShelfError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Drops the `# title` header and single-line HTML comments.
fn process_editor_content(content: &str, title: &str) -> String {
    let header = format!("# {}", title);
    let mut lines = content.lines().peekable();
    if lines.peek().is_some_and(|line| line.trim_end() == header) {
        lines.next();
    }

    lines
        .filter(|line| {
            let line = line.trim();
            !(line.starts_with("<!--") && line.ends_with("-->"))
        })
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_template_lines() {
        let saved = "# Plan\n<!-- ignored -->\n\nfirst line\n<!-- also ignored -->\nsecond\n";
        assert_eq!(process_editor_content(saved, "Plan"), "first line\nsecond");
    }

    #[test]
    fn keeps_other_headings() {
        let saved = "# Other\nbody";
        assert_eq!(process_editor_content(saved, "Plan"), "# Other\nbody");
    }

    #[test]
    fn untouched_template_is_empty() {
        let temp = Builder::new().suffix(".md").tempfile().unwrap();
        write_template(temp.path(), "Plan", "").unwrap();
        let text = read_to_string(temp.path()).unwrap();
        assert_eq!(process_editor_content(&text, "Plan"), "");
    }
}
