pub mod config;
pub mod core;
pub mod expand;

pub use crate::core::syllable_table::{build_syllable_table, korean_syllables};
pub use crate::core::typing::typing_sequence;
pub use crate::core::unicode::{compose_syllable, decompose_syllable, Syllable};
pub use crate::expand::{Expander, ExpandOptions, ExpansionResult};
