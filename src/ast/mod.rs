pub mod ops;
pub mod source;

pub use ops::*;
pub use source::*;
