use crate::env::Environment;
use crate::error::{Result, VarsError};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Used when neither `VISUAL` nor `EDITOR` is set.
pub const FALLBACK_EDITOR: &str = "vi";

/// Returns the editor command line: `$VISUAL`, then `$EDITOR`, then [`FALLBACK_EDITOR`].
#[must_use]
pub fn editor_command(env: &dyn Environment) -> String {
    env.non_empty("VISUAL")
        .or_else(|| env.non_empty("EDITOR"))
        .map_or_else(|| FALLBACK_EDITOR.to_owned(), |v| v.to_string_lossy().trim().to_owned())
}

/// Runs the configured editor on `file` with inherited stdio and waits for it to exit.
///
/// The command line is split on whitespace, so `EDITOR="code --wait"` runs `code` with
/// `--wait` before the file path.
///
/// # Errors
/// [`VarsError::EditorLaunch`] if the process cannot be spawned or exits unsuccessfully.
pub fn launch(env: &dyn Environment, file: &Path) -> Result<()> {
    let command = editor_command(env);
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or(FALLBACK_EDITOR);

    debug!(editor = %command, path = %file.display(), "Launching editor");

    let status = Command::new(program)
        .args(parts)
        .arg(file)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| VarsError::EditorLaunch {
            program: program.to_owned(),
            message: e.to_string().into(),
            context: None,
        })?;

    if !status.success() {
        return Err(VarsError::EditorLaunch {
            program: program.to_owned(),
            message: format!("exited with {status}").into(),
            context: None,
        });
    }

    Ok(())
}
