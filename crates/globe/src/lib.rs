pub mod software;

pub use software::*;
