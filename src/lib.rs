pub mod agenda;
pub mod booking;
pub mod config;
pub mod input;
pub mod mock;
pub mod selection;
pub mod slot;
pub mod week;
