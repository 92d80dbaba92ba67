//! USB HID report-descriptor parsing and input-report decoding.
//!
//! A [`ReportDescriptor`](parser::ReportDescriptor) is built once from the
//! raw descriptor bytes fetched over the control pipe, then replayed against
//! every interrupt-in report. Decoded fields are delivered to a
//! [`HidReportConsumer`](consumer::HidReportConsumer) as
//! `(usage_page << 16 | usage, value)` pairs; this crate performs no I/O.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod consumer;
pub mod items;
pub mod parser;

pub use consumer::HidReportConsumer;
pub use items::{Item, ItemIter};
pub use parser::{ParseOptions, ReportDescriptor};

use thiserror::Error;

/// Errors raised while decoding an input report against a descriptor.
///
/// A malformed descriptor is not an error: the item walk simply terminates
/// and no further fields are delivered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("input report ended at bit {bit_offset}, field needs {width} bit(s)")]
    TruncatedReport { bit_offset: u32, width: u32 },

    #[error("empty input report")]
    EmptyReport,
}

/// Convenience result alias for descriptor operations.
pub type DescriptorResult<T> = Result<T, DescriptorError>;
