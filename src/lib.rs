//! Courtside: load a table of NBA player seasons once, then answer the
//! dashboard's filter → group → aggregate queries against it.

pub mod config;
pub mod data;
