//! Process exit codes of the `vars` binary.

use vars_store::{ErrorKind, VarsError};

pub const SUCCESS: u8 = 0;
/// Failures outside the store: configuration, logger setup.
pub const FAILURE: u8 = 1;
/// Reported by clap itself for malformed command lines.
pub const USAGE: u8 = 2;
pub const INVALID: u8 = 3;
pub const NOT_INITIALIZED: u8 = 4;
pub const KEY_NOT_FOUND: u8 = 5;
pub const IO: u8 = 6;
pub const EDITOR: u8 = 7;

#[must_use]
pub const fn for_kind(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Validation | ErrorKind::Construction => INVALID,
        ErrorKind::NotInitialized => NOT_INITIALIZED,
        ErrorKind::KeyNotFound => KEY_NOT_FOUND,
        ErrorKind::Io => IO,
        ErrorKind::EditorLaunch => EDITOR,
    }
}

/// Maps an error chain to an exit code, looking for a [`VarsError`] anywhere in it.
#[must_use]
pub fn for_error(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<VarsError>())
        .map_or(FAILURE, |e| for_kind(e.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn store_errors_map_to_their_kind() {
        let err = anyhow::Error::new(VarsError::KeyNotFound { key: "k".into(), context: None });
        assert_eq!(for_error(&err), KEY_NOT_FOUND);

        let err = anyhow::Error::new(VarsError::TooManyScopeLevels { count: 2, context: None })
            .context("Opening store");
        assert_eq!(for_error(&err), INVALID);
    }

    #[test]
    fn foreign_errors_are_generic_failures() {
        let err = Err::<(), _>(std::fmt::Error).context("Formatting").unwrap_err();
        assert_eq!(for_error(&err), FAILURE);
    }
}
