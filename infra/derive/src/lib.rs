#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the `vars` infrastructure crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! vars-derive = { path = "../derive" }
//! thiserror = "2"
//! ```
//!
//! The examples below are `ignore`d to avoid compiling inside the proc-macro crate itself;
//! see `tests/ui` for compiled usages.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into the error type of a crate.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `pub type Result<T, E = Name> = std::result::Result<T, E>;` in the same module.
/// * A `<Name>Ext` trait with `.context(..)` implemented for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant that holds nothing but a source and its context.
/// * `From<Source>` for those same variants (`#[from]` sources are left to `thiserror`).
/// * A module-private `format_context` helper for the `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Applied to an **enum** whose variants all use named fields.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. A variant with a source error (a field named `source`, or marked `#[source]` /
///    `#[from]`) must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[vars_derive::vars_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Key not found{}: {key}", format_context(.context))]
///     KeyNotFound { key: String, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<String> {
///     std::fs::read_to_string(path).context("Reading properties")
/// }
/// ```
#[proc_macro_attribute]
pub fn vars_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
