//! Route registration and lookup.
//!
//! ```text
//! register(pattern, handler)
//!     → PathTemplate::parse (literal / {param} segments)
//!     → RouteTable (unique raw pattern, registration order kept)
//!
//! resolve(path)
//!     → first template that matches in full, in registration order
//!     → (handler, params) or None
//! ```

mod path_params;
mod path_template;
mod route_table;

pub use path_params::{PathError, PathParams};
pub use path_template::{PathTemplate, Segment};
pub use route_table::{ResolvedRoute, RouteTable};
