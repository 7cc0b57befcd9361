pub mod date;
pub mod dated;
pub mod record;

pub use date::*;
pub use dated::*;
pub use record::*;
