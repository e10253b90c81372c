pub mod data;
pub mod input;
pub mod store;
