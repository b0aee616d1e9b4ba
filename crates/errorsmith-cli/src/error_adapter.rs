//! Error adapter for converting ErrorsmithError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::{error::Error, fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use errorsmith::{CatalogError, ErrorsmithError};

/// Header that opens every entry of a catalog.
const ENTRY_HEADER: &str = "[[error]]";

/// Adapter for a catalog failure.
///
/// This adapter wraps a [`CatalogError`] together with the catalog source so
/// that the offending entry can be pointed at.
pub struct CatalogAdapter<'a> {
    /// The wrapped catalog error
    err: &'a CatalogError,
    /// Catalog source for displaying snippets
    src: &'a str,
}

impl<'a> CatalogAdapter<'a> {
    /// Create a new catalog adapter.
    pub fn new(err: &'a CatalogError, src: &'a str) -> Self {
        Self { err, src }
    }

    fn span(&self) -> Option<(Range<usize>, &'static str)> {
        match self.err {
            CatalogError::Parse { span, .. } => span.clone().map(|span| (span, "here")),
            CatalogError::DuplicateType { index, .. } => {
                entry_span(self.src, *index).map(|span| (span, "redefined here"))
            }
            CatalogError::Definition { index, .. } => {
                entry_span(self.src, *index).map(|span| (span, "in this entry"))
            }
        }
    }
}

impl fmt::Debug for CatalogAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for CatalogAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.err {
            // The definition error carries the actual message
            CatalogError::Definition { source, .. } => fmt::Display::fmt(source, f),
            err => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for CatalogAdapter<'_> {}

impl MietteDiagnostic for CatalogAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.err.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.err {
            CatalogError::Parse { .. } => None,
            CatalogError::DuplicateType { .. } => {
                Some(Box::new("error type names must be unique within a catalog"))
            }
            CatalogError::Definition { source, .. } => Some(Box::new(source.help())),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (span, message) = self.span()?;
        let label = LabeledSpan::new_primary_with_span(Some(message.to_string()), range_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-catalog [`ErrorsmithError`] variants.
///
/// This adapter handles errors that don't have source information, such as
/// I/O errors and configuration errors.
pub struct ErrorAdapter<'a>(pub &'a ErrorsmithError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ErrorsmithError::Io(_) => "errorsmith::io",
            ErrorsmithError::Config(_) => "errorsmith::config",
            ErrorsmithError::Catalog { err, .. } => return Some(Box::new(err.code())),
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A catalog failure with source location information.
    Catalog(CatalogAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Catalog(c) => fmt::Display::fmt(c, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Reportable::Catalog(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Catalog(c) => c.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Catalog(c) => c.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Catalog(c) => c.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Catalog(c) => c.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Returns the span of the header of the `index`-th catalog entry.
fn entry_span(src: &str, index: usize) -> Option<Range<usize>> {
    let mut offset = 0;
    let mut seen = 0;

    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(ENTRY_HEADER) {
            if seen == index {
                let start = offset + (line.len() - trimmed.len());
                return Some(start..start + ENTRY_HEADER.len());
            }
            seen += 1;
        }
        offset += line.len();
    }

    None
}

/// Convert a byte range to a miette [`SourceSpan`].
fn range_to_miette(range: Range<usize>) -> SourceSpan {
    SourceSpan::new(range.start.into(), range.len())
}

/// Convert an [`ErrorsmithError`] into a reportable error.
pub fn to_reportable(err: &ErrorsmithError) -> Reportable<'_> {
    match err {
        ErrorsmithError::Catalog { err: catalog_err, src } => {
            Reportable::Catalog(CatalogAdapter::new(catalog_err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
