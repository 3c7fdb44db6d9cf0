pub mod input;
pub mod str;
