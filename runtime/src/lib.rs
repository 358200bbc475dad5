//! glot-runtime
//!
//! Runtime support for code generated by `glot-compiler`. Generated message
//! types mirror themselves onto a [`MessageNode`] tree and call into
//! [`reconcile`] to:
//!
//! - extract their translatable strings into a flat key -> text map,
//!   stamping each string with the key chosen by a caller-supplied
//!   [`KeyGetter`] policy,
//! - list the keys an instance references, and
//! - rebuild an instance with its strings replaced by looked-up
//!   translations.
//!
//! The engine never mints keys itself and never performs I/O; it is a set
//! of ordinary recursive calls over one finite instance tree per
//! invocation.

pub mod error;
pub mod keys;
pub mod node;
pub mod reconcile;

pub use error::ReconcileError;
pub use keys::{content_key, ContentKeys, KeyGetter, ReuseKeys};
pub use node::{ChildSlot, Composite, FieldSlot, FieldValue, MessageNode, TransString};
pub use reconcile::TranslationMap;
