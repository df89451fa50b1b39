pub mod backup;
pub mod budget;
pub mod codec;
pub mod days;
pub mod log;
pub mod schedule;
pub mod trips;
pub mod window;
