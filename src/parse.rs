//! Parse a prompt into a chart.
//!
//! The grammar (`stemma.pest`) covers the line structure; tag stripping is
//! plain string work on each label, mirroring how the labels themselves may
//! contain spaces and punctuation.

use miette::NamedSource;
use pest::Parser;
use pest::iterators::Pair;

use crate::chart::{Chart, NodeId};
use crate::errors::ParseError;
use crate::log;
use crate::shape::{Parallelogram, Rectangle, ShapeKind};
use crate::types::Direction;
use crate::{PromptParser, Rule};

/// A parsed prompt: the document name from the header plus the built chart.
#[derive(Debug)]
pub struct Document {
    pub name: String,
    pub chart: Chart,
}

/// Parse a prompt from an anonymous source.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    parse_named("<input>", source)
}

/// Parse a prompt, attributing diagnostics to `origin` (e.g. a file name).
pub fn parse_named(origin: &str, source: &str) -> Result<Document, ParseError> {
    let named = || NamedSource::new(origin, source.to_string());

    let mut pairs = PromptParser::parse(Rule::program, source).map_err(|e| {
        let span = match e.location {
            pest::error::InputLocation::Pos(pos) => (pos, 0).into(),
            pest::error::InputLocation::Span((start, end)) => (start, end - start).into(),
        };
        ParseError::Syntax {
            message: e.variant.message().into_owned(),
            src: named(),
            span,
        }
    })?;

    let program = pairs.next().expect("grammar yields one program");

    let mut name = String::new();
    let mut chart = Chart::new(Direction::TopDown);
    for pair in program.into_inner() {
        match pair.as_rule() {
            Rule::header => {
                let mut inner = pair.into_inner();
                let name_pair = inner.next().expect("header has a name");
                let direction_pair = inner.next().expect("header has a direction");
                let direction = Direction::from_keyword(direction_pair.as_str()).ok_or_else(
                    || ParseError::UnknownDirection {
                        word: direction_pair.as_str().to_string(),
                        src: named(),
                        span: span_of(&direction_pair),
                    },
                )?;
                name = name_pair.as_str().to_string();
                chart = Chart::new(direction);
                log::debug!(name = %name, direction = ?direction, "parsed header");
            }
            Rule::edge => {
                let mut labels = pair.into_inner();
                let parent_pair = labels.next().expect("edge has a parent label");
                let child_pair = labels.next().expect("edge has a child label");
                add_edge(&mut chart, &named, &parent_pair, &child_pair)?;
            }
            Rule::EOI => {}
            _ => unreachable!("no other rules at program level"),
        }
    }

    Ok(Document { name, chart })
}

fn add_edge(
    chart: &mut Chart,
    named: &dyn Fn() -> NamedSource<String>,
    parent_pair: &Pair<'_, Rule>,
    child_pair: &Pair<'_, Rule>,
) -> Result<(), ParseError> {
    let (parent_content, parent_shape) = strip_tags(parent_pair.as_str());
    let (child_content, child_shape) = strip_tags(child_pair.as_str());
    if parent_content.is_empty() {
        return Err(ParseError::EmptyLabel {
            src: named(),
            span: span_of(parent_pair),
        });
    }
    if child_content.is_empty() {
        return Err(ParseError::EmptyLabel {
            src: named(),
            span: span_of(child_pair),
        });
    }

    let parent_id = if chart.root().is_none() {
        // The first edge's left-hand side becomes the root.
        chart
            .add_node(parent_content, parent_shape)
            .map_err(|cause| ParseError::Node {
                cause,
                src: named(),
                span: span_of(parent_pair),
            })?
    } else {
        find_parent(chart, &parent_content).ok_or_else(|| ParseError::UnknownParent {
            content: parent_content.clone(),
            src: named(),
            span: span_of(parent_pair),
        })?
    };

    chart
        .add_child(parent_id, child_content, child_shape)
        .map_err(|cause| ParseError::Node {
            cause,
            src: named(),
            span: span_of(child_pair),
        })?;
    Ok(())
}

fn find_parent(chart: &Chart, content: &str) -> Option<NodeId> {
    chart.find(content).map(|node| node.id())
}

fn span_of(pair: &Pair<'_, Rule>) -> miette::SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

/// Strip trailing `-FLAG VALUE` tags from a raw label. A `-t` tag selects
/// the node shape (`p` for parallelogram); other flags are recognized and
/// discarded. When the same flag appears twice the earlier one wins.
fn strip_tags(raw: &str) -> (String, ShapeKind) {
    let mut content = raw.trim();
    let mut kind: Option<&str> = None;
    while let Some((rest, flag, value)) = split_trailing_tag(content) {
        if flag == "t" {
            kind = Some(value);
        }
        content = rest.trim_end();
    }
    let shape = match kind {
        Some("p") => Parallelogram::default().into(),
        _ => Rectangle.into(),
    };
    (content.to_string(), shape)
}

/// Split a trailing `-FLAG VALUE` tag off `s`, returning (rest, flag,
/// value). Flag and value must be word characters; anything else means no
/// tag.
fn split_trailing_tag(s: &str) -> Option<(&str, &str, &str)> {
    let s = s.trim_end();
    let (head, value) = s.rsplit_once(|c: char| c.is_whitespace())?;
    if value.is_empty() || !value.chars().all(is_word_char) {
        return None;
    }
    let head = head.trim_end();
    let dash = head.rfind('-')?;
    let flag = &head[dash + 1..];
    if flag.is_empty() || !flag.chars().all(is_word_char) {
        return None;
    }
    Some((&head[..dash], flag, value))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
