mod request_logger;
mod request_timeout;

pub use request_logger::RequestLogger;
pub use request_timeout::RequestTimeout;
