//! Database Models
//!
//! Record types read from lexicon databases and the question collections
//! built from them.

mod lexical;
mod questions;


pub use lexical::*;
pub use questions::*;
