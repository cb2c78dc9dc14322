pub mod agenda;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod locale;
pub mod print;
pub mod selection;
pub mod ui;
