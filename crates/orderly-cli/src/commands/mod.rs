pub mod classify;
pub mod config;
pub mod process;
pub mod run;
