/// UI module exports
pub mod app;
pub mod components;
pub mod data_table;
pub mod input_box;
