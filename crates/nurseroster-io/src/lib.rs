//! Instance text parser, roster serializer, and stats file writer: the
//! external interfaces that turn the solver core into a usable library.

pub mod error;
pub mod parser;
pub mod serializer;
pub mod stats_file;

pub use error::{IoFormatError, Result};
pub use parser::{parse, BuiltInstance, ParsedInstance};
