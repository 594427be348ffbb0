//! Oracle prompt assembly and reply parsing

pub mod action_parser;
pub mod prompt_builder;
