//! Cross-lingual query expansion.
//!
//! Catalog text mixes Vietnamese and English dish names. The expander
//! rewrites recognized Vietnamese phrases in a query into English synonyms so
//! a query in either language reaches both kinds of product text.

pub mod expander;
pub mod lexicon;

pub use expander::{BilingualExpander, QueryExpander};
pub use lexicon::{BilingualLexicon, LexiconEntry};
