// ABOUTME: Tool module - defines tools, registration records, and registry.
// ABOUTME: Core abstraction for the host invocation surface.

mod registry;
mod result;
mod spec;
mod traits;

pub use registry::*;
pub use result::*;
pub use spec::*;
pub use traits::*;

#[cfg(test)]
mod result_test;
