pub mod renderer;
pub mod usfm;
pub mod utility;
