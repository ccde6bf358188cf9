//! outline-weave: fill a heading outline with the verbatim prose of its manuscript.
//!
//! The outline and the manuscript are parsed into heading trees, every manuscript section is
//! indexed by its normalised title path together with the text it owns, and every outline node
//! is matched against that index. The result is a single tree of `title`, `tag`, `content` and
//! `children` ready for JSON output.
//!
//! ```
//! use outline_weave::{assemble::reconcile, formats::atx::AtxLineFormat};
//!
//! let manuscript = "# Intro\nHello world.\n## Background\nSome history.\n# Reference\nignored";
//! let outline = "# Intro\n## Background\n<tag>why</tag>";
//! let result = reconcile(outline, manuscript, &AtxLineFormat, "Reference").unwrap();
//! assert_eq!(result.tree.children[0].content, "Some history.");
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod assemble;
pub mod batch;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod matcher;
pub mod normalize;
pub mod outline;
pub mod samples;
pub mod section;
pub mod segment;
pub mod slicer;
pub mod split;

pub use assemble::{reconcile, Reconciliation, ResultNode};
pub use error::{Error, Result};
