pub mod active;

pub use active::active;
