pub mod decision_writer;
pub mod trace_reader;
