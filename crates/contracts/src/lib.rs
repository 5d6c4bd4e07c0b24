pub mod domain;
pub mod matrix;
