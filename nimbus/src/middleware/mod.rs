mod chain;
pub use chain::{ChainLink, MiddlewareChain};

pub mod builtin;
pub use builtin::LoggerMiddleware;

// Re-export core traits
pub use crate::traits_helpers::{FunctionalMiddleware, Middleware, MiddlewareResult, Next};
