//! Derive macro for namedargs records
//!
//! `#[derive(Record)]` implements `namedargs::Reflect` for a struct with
//! named fields, exposing each field with its identifier, tags and embedded
//! flag in declaration order.

use proc_macro::TokenStream;

mod record;

/// Derive macro for `namedargs::Reflect`
///
/// # Example
///
/// ```rust,ignore
/// use namedargs::Record;
///
/// #[derive(Record)]
/// struct Account {
///     #[embed]
///     owner: Person,
///     #[tag(db = "acct_no")]
///     number: String,
///     #[tag(db = ".,asis")]
///     balance: Money,
///     #[tag(db = "-")]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(tag, embed))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}
