pub mod log;
pub mod notify;
pub mod secrets;
