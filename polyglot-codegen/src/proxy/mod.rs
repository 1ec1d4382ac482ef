//! Type-proxy subsystem.
//!
//! Some values cannot cross the raw ABI in their source-language form (most
//! importantly owned strings). For every function that takes or returns
//! such a value, a shadow proxy function is synthesized with a raw
//! signature. Backends declare the proxy as the external symbol and wrap it
//! in a target-visible function that converts values on either side of the
//! call. The C++ shim backend defines the proxy symbols.

mod policy;
mod synthesize;

pub use policy::{OwnedStringPolicy, Position, ProxyPolicy};
pub use synthesize::{apply_proxies, free_string_symbol, proxy_symbol, synthesize};
