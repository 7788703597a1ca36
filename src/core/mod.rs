pub mod syllable_table;
pub mod typing;
pub mod unicode;
