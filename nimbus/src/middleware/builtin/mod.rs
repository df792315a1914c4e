mod logger;
pub use logger::LoggerMiddleware;
