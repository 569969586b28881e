//! Integration tests for castplay

mod cli_test;
mod player_test;
