pub mod action_reader;
pub mod session_writer;
