pub mod models;
pub mod square;
