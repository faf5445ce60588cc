pub mod kind;

pub use gpde_error::Error;
