pub mod kind;

pub use algebrist_error::Error;
