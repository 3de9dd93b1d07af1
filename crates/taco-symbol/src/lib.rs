//! TACO Symbol System
//!
//! Dense integer identifiers for interned strings.
//!
//! # Overview
//!
//! The symbol system provides:
//! - **Symbol**: Opaque integer handle for an interned string
//! - **SymbolTable**: Append-only, insertion-ordered interner
//! - **Label keys**: `-`-joined symbol sequences used as table keys
//!
//! # Example
//!
//! ```rust
//! use taco_symbol::SymbolTable;
//!
//! let table = SymbolTable::new();
//!
//! let np = table.insert("NP");
//! assert_eq!(table.insert("NP"), np);
//! assert_eq!(&*table.resolve(np).unwrap(), "NP");
//! assert!(table.lookup("VP").is_none());
//! ```

#![warn(missing_docs)]

pub mod key;
pub mod symbol;
pub mod table;

// Re-exports
pub use key::{decode_label_sequence, encode_label_sequence, LABEL_SEPARATOR};
pub use symbol::{Symbol, SymbolError};
pub use table::{global, SymbolTable};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for symbol operations
    pub use crate::{global, Symbol, SymbolError, SymbolTable};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
