pub mod imagery;
pub mod terrain;

pub use imagery::*;
pub use terrain::*;
