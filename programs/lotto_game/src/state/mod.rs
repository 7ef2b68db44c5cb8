pub mod game;
pub mod oracle;
pub mod registry;

pub use game::*;
pub use oracle::*;
pub use registry::*;
