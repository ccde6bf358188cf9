//! Building the populated outline tree.
//!
//! The outline is walked depth first; every node, leaf or internal, receives the content its
//! path resolves to. A single top-level heading becomes the root itself. Zero or several
//! top-level headings are wrapped in a synthetic `ROOT` node with empty tag and content.

use crate::error::Result;
use crate::formats::Format;
use crate::input::{Document, ParseOptions};
use crate::matcher::{Diagnostic, Matcher};
use crate::outline::{parse_outline, OutlineNode};
use crate::slicer::ContentIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title of the synthetic wrapper node.
pub const ROOT_TITLE: &str = "ROOT";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// One node of the emitted tree. Leaves and internal nodes carry the same fields.
pub struct ResultNode {
    /// Outline heading text.
    pub title: String,
    /// Outline authoring note.
    pub tag: String,
    /// Verbatim manuscript text owned by the matched section.
    pub content: String,
    /// Nested nodes in outline order.
    pub children: Vec<ResultNode>,
}

impl ResultNode {
    #[must_use]
    /// The synthetic wrapper with empty tag and content.
    pub fn synthetic_root(children: Vec<ResultNode>) -> Self {
        Self {
            title: ROOT_TITLE.to_string(),
            tag: String::new(),
            content: String::new(),
            children,
        }
    }
}

#[derive(Clone, Debug)]
/// The populated tree plus every non-exact match encountered.
pub struct Reconciliation {
    /// Root of the emitted tree.
    pub tree: ResultNode,
    /// Fallback and unmatched reports, in outline order.
    pub diagnostics: Vec<Diagnostic>,
}

#[must_use]
/// Attaches manuscript content to every node of an already parsed outline.
pub fn assemble(roots: &[OutlineNode], index: &ContentIndex) -> Reconciliation {
    let matcher = Matcher::new(index);
    let mut diagnostics = Vec::new();
    let mut path = Vec::new();
    let mut built: Vec<ResultNode> = roots
        .iter()
        .map(|root| attach(root, &matcher, &mut path, &mut diagnostics))
        .collect();

    let tree = if built.len() == 1 {
        built.remove(0)
    } else {
        ResultNode::synthetic_root(built)
    };
    Reconciliation { tree, diagnostics }
}

fn attach<'a>(
    node: &'a OutlineNode,
    matcher: &Matcher<'_>,
    path: &mut Vec<&'a str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> ResultNode {
    path.push(&node.title);
    let content = matcher.resolve(path.as_slice(), diagnostics).to_string();
    let children = node
        .children
        .iter()
        .map(|child| attach(child, matcher, path, diagnostics))
        .collect();
    path.pop();
    ResultNode {
        title: node.title.clone(),
        tag: node.tag.clone(),
        content,
        children,
    }
}

/// Reconciles one outline/manuscript pair.
///
/// The manuscript is cut before the level-1 heading titled `stop_heading`.
///
/// # Errors
///
/// Returns an error only if the format backend cannot parse either text.
pub fn reconcile(
    outline: &str,
    manuscript: &str,
    format: &dyn Format,
    stop_heading: &str,
) -> Result<Reconciliation> {
    let roots = parse_outline(outline, format)?;
    let document = Document::parse(manuscript, format, &ParseOptions::manuscript(stop_heading))?;
    let index = ContentIndex::build(&document);
    Ok(assemble(&roots, &index))
}

#[must_use]
/// Non-blank `content` strings of a stored tree, in pre-order.
///
/// Works on the raw JSON so that hand-edited files with a list at the top, a missing field or
/// a non-string content still yield everything usable.
pub fn stored_contents(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_contents(value, &mut out);
    out
}

fn collect_contents(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(node) => {
            if let Some(Value::String(content)) = node.get("content") {
                if !content.trim().is_empty() {
                    out.push(content.clone());
                }
            }
            if let Some(children @ Value::Array(_)) = node.get("children") {
                collect_contents(children, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_contents(item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "tests/assemble.rs"]
mod tests;
