pub mod days;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod schedule;
pub mod stats;
pub mod trips;
pub mod watch;
