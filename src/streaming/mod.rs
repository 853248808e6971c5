//! Streaming access to large chat exports.
//!
//! [`RecordStream`] reads an export line by line and yields each record once
//! it is complete, so memory use stays bounded by the largest single message
//! rather than the size of the export.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::ChatParser;
//!
//! let parser = ChatParser::new();
//!
//! for result in parser.stream("huge_export.txt")? {
//!     let record = result?;
//!     println!("{}: {}", record.sender(), record.message());
//! }
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

mod records;
mod traits;

pub use records::RecordStream;
pub use traits::{RecordIterator, StreamingConfig};
