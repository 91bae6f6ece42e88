//! Error types with rich diagnostics using miette
//!
//! Parser errors carry source spans; chart errors are plain diagnostics.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Chart Errors
// ============================================================================

/// Errors raised while building a chart or invoking a chart operation
#[derive(Error, Diagnostic, Debug)]
pub enum ChartError {
    #[error("node content is empty")]
    #[diagnostic(
        code(stemma::chart::empty_content),
        help("every node needs a non-blank label; it doubles as the lookup key")
    )]
    EmptyContent,

    #[error("invalid explicit {dimension}: {value}")]
    #[diagnostic(
        code(stemma::chart::invalid_dimension),
        help("explicit dimensions must be finite and positive")
    )]
    InvalidDimension { dimension: &'static str, value: f64 },

    #[error("node id {id} is not part of this chart")]
    #[diagnostic(code(stemma::chart::unknown_node))]
    UnknownNode { id: usize },

    #[error("{operation} is not supported")]
    #[diagnostic(
        code(stemma::chart::unsupported),
        help("charts are immutable once built; rebuild the chart instead")
    )]
    Unsupported { operation: &'static str },
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while parsing a prompt
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("malformed prompt: {message}")]
    #[diagnostic(code(stemma::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unknown direction: {word}")]
    #[diagnostic(
        code(stemma::parse::unknown_direction),
        help("expected one of TD, BT, LR, RL")
    )]
    UnknownDirection {
        word: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a direction")]
        span: SourceSpan,
    },

    #[error("label is empty")]
    #[diagnostic(
        code(stemma::parse::empty_label),
        help("a node needs a label besides its tags")
    )]
    EmptyLabel {
        #[source_code]
        src: NamedSource<String>,
        #[label("nothing left after stripping tags")]
        span: SourceSpan,
    },

    #[error("unknown parent: {content}")]
    #[diagnostic(
        code(stemma::parse::unknown_parent),
        help("a node must appear as a child before other nodes attach to it")
    )]
    UnknownParent {
        content: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("no node with this label")]
        span: SourceSpan,
    },

    #[error("invalid node")]
    #[diagnostic(code(stemma::parse::invalid_node))]
    Node {
        #[source]
        #[diagnostic_source]
        cause: ChartError,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: SourceSpan,
    },
}
