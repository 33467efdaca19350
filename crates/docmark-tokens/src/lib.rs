//! Token tree types for the docmark dialect.
//!
//! The tokenizer produces [`Token`] trees from source text and the renderer
//! consumes them; this crate carries only the data model so the two sides
//! can evolve independently.
//!
//! Enable the `serde` feature to (de)serialize token trees, e.g. for the
//! JSON interchange format used by the CLI.

mod directive;
mod token;

pub use directive::ExtractDirective;
pub use token::Token;
