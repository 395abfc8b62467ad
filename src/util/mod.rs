pub mod human;
pub mod watch_store;
