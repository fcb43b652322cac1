use std::borrow::Cow;
use vars_derive::vars_error;

#[vars_error]
pub enum DemoError {
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Key not found{}: {key}", format_context(.context))]
    KeyNotFound { key: String, context: Option<Cow<'static, str>> },
}

fn lookup(key: &str) -> Result<String> {
    Err(DemoError::KeyNotFound { key: key.to_owned(), context: None })
}

fn main() {
    let err = lookup("theme").context("Reading settings").unwrap_err();
    assert_eq!(err.to_string(), "Key not found (Reading settings): theme");

    let raw: std::result::Result<(), std::io::Error> = Err(std::io::Error::other("disk full"));
    let io = raw.context("Saving");
    assert!(matches!(io, Err(DemoError::Io { context: Some(_), .. })));
}
