//! Magic-number file format detection.
//!
//! Detection works in two stages over an in-memory buffer:
//!
//! * **matching**: every [`Signature`] (an offset-anchored byte pattern
//!   with `??` wildcards) in the [`SignatureRegistry`] is tried, and the
//!   one that compared the most literal bytes wins.
//! * **parsing**: the [`parser::FormatParser`] with the most specific
//!   match reads header fields through a bounds-checked [`CursorReader`].
//!
//! [`Catalogue`] bundles the built-in registries and runs both stages.

pub mod builtin;
pub mod catalogue;
pub mod error;
pub mod output;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod signature;
pub mod size;

pub use catalogue::{Catalogue, Inspection, ParseOutcome};
pub use error::{ExtractError, ParserError};
pub use output::{FileDescriptor, FileInfo, Metadata, MetadataField, ParserOutput};
pub use parser::{FormatParser, ParserKind, ParserRegistry, dispatch_parser};
pub use reader::{CursorReader, Endian, ReadError};
pub use registry::{SignatureRegistry, find_best_signature};
pub use signature::{PatternElement, Signature, SignatureError, SignatureMatch};
pub use size::bytes_to_human;
