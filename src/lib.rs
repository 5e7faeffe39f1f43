pub mod config;
pub mod gateway;
pub mod ipc;
pub mod model;
pub mod present;
pub mod query;
pub mod roster;
pub mod store;
