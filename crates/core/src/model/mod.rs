pub mod refs;
pub mod segment;
pub mod span;
