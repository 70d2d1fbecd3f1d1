pub mod extract;
pub mod timestamp;
