//! Layer-based record filtering

use crate::error::{IngestError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Regular expression grammar a layer pattern is written in.
///
/// Patterns are translated to the `regex` crate syntax before compiling.
/// Constructs that crate does not support (back-references, look-around)
/// are rejected when the filter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegexDialect {
    #[default]
    EcmaScript,
    /// POSIX basic regular expressions
    Basic,
    /// POSIX extended regular expressions
    Extended,
    Awk,
    /// Basic syntax, newline separates alternatives
    Grep,
    /// Extended syntax, newline separates alternatives
    Egrep,
}

impl RegexDialect {
    pub const ALL: [RegexDialect; 6] = [
        RegexDialect::EcmaScript,
        RegexDialect::Basic,
        RegexDialect::Extended,
        RegexDialect::Awk,
        RegexDialect::Grep,
        RegexDialect::Egrep,
    ];

    /// Select a dialect by its index in [`RegexDialect::ALL`]
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            IngestError::config(format!(
                "regex dialect {} out of range (0..={})",
                index,
                Self::ALL.len() - 1
            ))
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            RegexDialect::EcmaScript => "ecmascript",
            RegexDialect::Basic => "basic",
            RegexDialect::Extended => "extended",
            RegexDialect::Awk => "awk",
            RegexDialect::Grep => "grep",
            RegexDialect::Egrep => "egrep",
        }
    }

    /// Rewrite `pattern` into an anchored `regex` crate expression
    fn translate(self, pattern: &str) -> String {
        let body = match self {
            RegexDialect::EcmaScript | RegexDialect::Extended | RegexDialect::Awk => {
                pattern.to_string()
            }
            RegexDialect::Basic => translate_basic(pattern),
            RegexDialect::Grep => alternatives(pattern, translate_basic),
            RegexDialect::Egrep => alternatives(pattern, str::to_string),
        };
        // Layer names must match as a whole
        format!("^(?:{})$", body)
    }
}

impl fmt::Display for RegexDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegexDialect {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        if let Ok(index) = key.parse::<usize>() {
            return Self::from_index(index);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| IngestError::config(format!("unknown regex dialect '{}'", key)))
    }
}

/// Join newline-separated alternatives, each translated by `each`
fn alternatives(pattern: &str, each: fn(&str) -> String) -> String {
    pattern
        .split('\n')
        .map(|alt| format!("(?:{})", each(alt)))
        .collect::<Vec<_>>()
        .join("|")
}

/// POSIX BRE to `regex` syntax: `\( \) \{ \} \| \+ \?` become operators,
/// their bare forms become literals, and a leading `*` is literal.
fn translate_basic(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(n @ ('(' | ')' | '{' | '}' | '|' | '+' | '?')) => out.push(n),
                Some(n) => {
                    out.push('\\');
                    out.push(n);
                }
                None => out.push_str("\\\\"),
            },
            '(' | ')' | '{' | '}' | '|' | '+' | '?' => {
                out.push('\\');
                out.push(c);
            }
            '*' if out.is_empty() || out.ends_with('(') || out == "^" => out.push_str("\\*"),
            _ => out.push(c),
        }
    }

    out
}

/// Predicate deciding which layers are read.
#[derive(Debug, Clone, Default)]
pub enum LayerFilter {
    /// Every layer is accepted
    #[default]
    All,
    /// Only the layer with exactly this name
    Name(String),
    /// Any layer whose name appears verbatim in the list
    List(Vec<String>),
    /// Layers whose whole name matches the expression
    Pattern {
        source: String,
        dialect: RegexDialect,
        regex: Regex,
    },
}

impl LayerFilter {
    /// Accept a single layer
    pub fn name(layer: impl Into<String>) -> Self {
        LayerFilter::Name(layer.into())
    }

    /// Accept the layers of a comma-separated list. Names are taken
    /// verbatim; no whitespace is trimmed around the commas.
    pub fn list(names: &str) -> Self {
        LayerFilter::List(names.split(',').map(str::to_string).collect())
    }

    /// Accept layers whose whole name matches `pattern`
    pub fn pattern(pattern: &str, dialect: RegexDialect) -> Result<Self> {
        let regex = Regex::new(&dialect.translate(pattern))?;
        Ok(LayerFilter::Pattern {
            source: pattern.to_string(),
            dialect,
            regex,
        })
    }

    /// Build a filter from front-end parameters.
    ///
    /// | mode    | arguments                   |
    /// |---------|-----------------------------|
    /// | `all`   | none                        |
    /// | `name`  | layer name                  |
    /// | `list`  | comma-separated names       |
    /// | `regex` | pattern, optional dialect   |
    pub fn from_mode(mode: &str, args: &[&str]) -> Result<Self> {
        let check_args = |range: std::ops::RangeInclusive<usize>| -> Result<()> {
            if range.contains(&args.len()) {
                Ok(())
            } else {
                Err(IngestError::config(format!(
                    "layer filter '{}' takes {} argument(s), got {}",
                    mode,
                    if range.start() == range.end() {
                        range.start().to_string()
                    } else {
                        format!("{} to {}", range.start(), range.end())
                    },
                    args.len()
                )))
            }
        };

        match mode.trim().to_ascii_lowercase().as_str() {
            "all" => {
                check_args(0..=0)?;
                Ok(LayerFilter::All)
            }
            "name" => {
                check_args(1..=1)?;
                Ok(LayerFilter::name(args[0]))
            }
            "list" => {
                check_args(1..=1)?;
                Ok(LayerFilter::list(args[0]))
            }
            "regex" => {
                check_args(1..=2)?;
                let dialect = match args.get(1) {
                    Some(d) => d.parse()?,
                    None => RegexDialect::default(),
                };
                LayerFilter::pattern(args[0], dialect)
            }
            other => Err(IngestError::config(format!(
                "unknown layer filter mode '{}'",
                other
            ))),
        }
    }

    /// Whether records on `layer` are kept
    pub fn matches(&self, layer: &str) -> bool {
        match self {
            LayerFilter::All => true,
            LayerFilter::Name(name) => name == layer,
            LayerFilter::List(names) => names.iter().any(|n| n == layer),
            LayerFilter::Pattern { regex, .. } => regex.is_match(layer),
        }
    }
}

impl fmt::Display for LayerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerFilter::All => write!(f, "all layers"),
            LayerFilter::Name(name) => write!(f, "layer '{}'", name),
            LayerFilter::List(names) => write!(f, "layers [{}]", names.join(",")),
            LayerFilter::Pattern { source, dialect, .. } => {
                write!(f, "layers matching /{}/ ({})", source, dialect)
            }
        }
    }
}
