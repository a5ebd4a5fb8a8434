pub mod block;
pub mod config;
pub mod schedule;
pub mod status;
pub mod watch;
