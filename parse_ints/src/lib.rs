pub mod input;
pub mod scalar;
