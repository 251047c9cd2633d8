//! Application context and path resolution.

mod context;
mod resolver;

pub use context::AppContext;
