pub mod catalog;
pub mod sync;
