//! CSV dataset sink.
//!
//! Datasets arrive as finished, append-ordered row collections; the sink owns
//! the serialization policy and file layout. One `<Name>.csv` per non-empty
//! dataset, empty datasets produce no file.

pub mod csv;
pub mod error;
pub mod types;

pub use csv::CsvSink;
pub use error::SinkError;
pub use types::{CsvValue, Dataset, DatasetBatch, RowOp, TableKind};
