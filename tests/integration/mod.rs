//! Integration tests for the repofs lazy repository tree

mod cli_commands;
mod config_layers;
mod read_only_surface;
mod test_utils;
