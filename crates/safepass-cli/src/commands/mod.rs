pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod list;
pub mod passcode;
pub mod search;
pub mod sync;
pub mod theme;
