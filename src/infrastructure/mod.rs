pub mod file_slot;
