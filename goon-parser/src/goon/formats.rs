//! Output formats for parse trees
//!
//!     treeviz   one line per node, box-drawing connectors, an icon per node type
//!     tag       compact nested braces, `{type: Add, value: -1, children: [...]}`
//!     json      serde_json of the [TreeSnapshot]
//!     yaml      serde_yaml of the [TreeSnapshot]

pub mod tag;
pub mod treeviz;

use crate::goon::ast::{snapshot_from_tree, TreeSnapshot};
use crate::goon::parsing::ParseTree;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Treeviz,
    Tag,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["treeviz", "tag", "json", "yaml"];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Tag => "tag",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown output format '{0}' (expected one of: treeviz, tag, json, yaml)")]
    Unknown(String),
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "treeviz" => Ok(OutputFormat::Treeviz),
            "tag" => Ok(OutputFormat::Tag),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(FormatError::Unknown(other.to_string())),
        }
    }
}

/// Renders `tree` in `format`. `show_values` only affects treeviz labels.
pub fn render(tree: &ParseTree, format: OutputFormat, show_values: bool) -> Result<String, FormatError> {
    render_snapshot(&snapshot_from_tree(tree), format, show_values)
}

pub fn render_snapshot(
    snapshot: &TreeSnapshot,
    format: OutputFormat,
    show_values: bool,
) -> Result<String, FormatError> {
    let rendered = match format {
        OutputFormat::Treeviz => treeviz::to_treeviz_str(snapshot, show_values),
        OutputFormat::Tag => format!("{}\n", tag::to_tag_str(snapshot)),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Yaml => serde_yaml::to_string(snapshot)?,
    };
    Ok(rendered)
}
