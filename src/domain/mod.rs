pub mod entities;
pub mod merge;
