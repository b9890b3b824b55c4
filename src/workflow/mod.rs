pub mod builder;
pub mod connection;
pub mod conversion;
pub mod definition;

pub use builder::*;
pub use connection::*;
pub use conversion::*;
pub use definition::*;
