pub mod direct;
pub mod dispatch;
pub mod http;
pub mod records;
