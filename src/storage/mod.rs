//! Collaborators at the edge of the engine.
//!
//! The pipeline only talks to storage through three traits:
//! [`DocumentSource`] for the uploaded workbooks, [`LinkResolver`] for their
//! download links and [`ResultSink`] for the results spreadsheet. Each has a
//! local implementation used by the server and an in-memory one.

mod links;
mod sink;
mod source;

pub use links::{BaseUrlLinkResolver, LinkResolver};
pub use sink::{
    FIRST_RESULT_ROW, HEADER_ROW, LINK_LABEL, MemoryResultSink, RESULT_HEADERS, RecordedBatch,
    ResultSink, XlsxResultSink, hyperlink_formula,
};
pub use source::{
    DocumentRef, DocumentSource, LocalDocumentSource, MemoryDocumentSource, WORKBOOK_EXTENSION,
};
