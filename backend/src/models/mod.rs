pub mod location;
pub mod readings;

pub use location::*;
pub use readings::*;
