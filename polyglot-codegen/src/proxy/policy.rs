//! Which values need marshaling across the call boundary.

use polyglot_ir::{BaseType, QualifiedType};

/// Where a proxied value appears in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Parameter,
    Return,
}

/// Decides which values a proxy must convert, and to what.
pub trait ProxyPolicy: Send + Sync {
    /// Whether a value of this type cannot cross the raw ABI as is.
    fn needs_proxy(&self, ty: &QualifiedType) -> bool;

    /// Raw representation used by the proxy's own signature.
    fn raw_type(&self, ty: &QualifiedType, position: Position) -> QualifiedType;
}

/// Owned strings cross as NUL-terminated character buffers.
///
/// Inputs are borrowed for the duration of the call (`const char *`). A
/// returned buffer is heap-allocated by the proxy and owned by the caller
/// (`char *`), which hands it back to the module's free function.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnedStringPolicy;

impl ProxyPolicy for OwnedStringPolicy {
    fn needs_proxy(&self, ty: &QualifiedType) -> bool {
        ty.is_owned_string()
    }

    fn raw_type(&self, _ty: &QualifiedType, position: Position) -> QualifiedType {
        let buffer = QualifiedType::new(BaseType::Char).pointer();
        match position {
            Position::Parameter => buffer.constant(),
            Position::Return => buffer,
        }
    }
}
