pub mod slot;
pub mod todo;
