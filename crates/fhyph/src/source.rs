#![forbid(unsafe_code)]

//! Reader for TeX-style pattern files.
//!
//! ```text
//! % comment to end of line
//! \classes{ aA bB cC }            one class per token, first char represents it
//! \patterns{ .hy3p he2n 1na }     digits interleaved with letters
//! \hyphenation{ as-so-ciate }     '-' marks permitted breaks
//! \message{ anything }            other groups are skipped
//! ```
//!
//! When no `\classes` group is present, each letter used by a pattern or
//! exception becomes its own class together with its uppercase form.

use std::collections::BTreeSet;
use std::path::Path;

use crate::builder::HyphenatorBuilder;
use crate::declaration::Declaration;
use crate::engine::{Hyphenator, WORD_MARKER};
use crate::error::{LoadError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Classes,
    Patterns,
    Hyphenation,
    /// Skipped group; counts nested braces.
    Other(usize),
}

impl Group {
    fn named(name: &str) -> Self {
        match name {
            "classes" => Self::Classes,
            "patterns" => Self::Patterns,
            "hyphenation" => Self::Hyphenation,
            _ => Self::Other(0),
        }
    }
}

enum State<'a> {
    Outside,
    /// Saw `\name`, waiting for its `{`.
    Command { name: &'a str, line: usize },
    Inside { group: Group, name: &'a str, line: usize },
}

/// Split a comment-free line into `{`, `}` and whitespace-separated words.
fn tokens(line: &str) -> impl Iterator<Item = &str> {
    let mut rest = line;
    std::iter::from_fn(move || {
        rest = rest.trim_start();
        let first = rest.chars().next()?;
        let end = if first == '{' || first == '}' {
            1
        } else {
            rest.find(|c: char| c.is_whitespace() || c == '{' || c == '}')
                .unwrap_or(rest.len())
        };
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

/// Parse a pattern file into declarations.
pub fn parse_declarations(text: &str) -> Result<Vec<Declaration>> {
    let mut declarations = Vec::new();
    let mut saw_classes = false;
    let mut state = State::Outside;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split('%').next().unwrap_or("");

        for token in tokens(line) {
            state = match state {
                State::Outside => match token.strip_prefix('\\') {
                    Some(name) if !name.is_empty() => State::Command {
                        name,
                        line: line_no,
                    },
                    _ => {
                        return Err(LoadError::syntax(
                            line_no,
                            format!("unexpected {token:?} outside a group"),
                        ));
                    }
                },
                State::Command { name, line } => {
                    if token != "{" {
                        return Err(LoadError::syntax(
                            line_no,
                            format!("expected '{{' after \\{name}, found {token:?}"),
                        ));
                    }
                    let group = Group::named(name);
                    saw_classes |= group == Group::Classes;
                    State::Inside { group, name, line }
                }
                State::Inside { group, name, line } => match (group, token) {
                    (Group::Other(0), "}") => State::Outside,
                    (Group::Other(depth), "}") => State::Inside {
                        group: Group::Other(depth - 1),
                        name,
                        line,
                    },
                    (Group::Other(depth), "{") => State::Inside {
                        group: Group::Other(depth + 1),
                        name,
                        line,
                    },
                    (Group::Other(_), _) => State::Inside { group, name, line },
                    (_, "}") => State::Outside,
                    (_, "{") => {
                        return Err(LoadError::syntax(
                            line_no,
                            format!("nested '{{' inside \\{name}"),
                        ));
                    }
                    (Group::Classes, token) => {
                        declarations.push(Declaration::class(token));
                        State::Inside { group, name, line }
                    }
                    (Group::Patterns, token) => {
                        let declaration = Declaration::tex_pattern(token).ok_or_else(|| {
                            LoadError::syntax(line_no, format!("malformed pattern {token:?}"))
                        })?;
                        declarations.push(declaration);
                        State::Inside { group, name, line }
                    }
                    (Group::Hyphenation, token) => {
                        let declaration = Declaration::tex_exception(token).ok_or_else(|| {
                            LoadError::syntax(line_no, format!("malformed exception {token:?}"))
                        })?;
                        declarations.push(declaration);
                        State::Inside { group, name, line }
                    }
                },
            };
        }
    }

    match state {
        State::Outside => {}
        State::Command { name, line } => {
            return Err(LoadError::syntax(line, format!("\\{name} has no group")));
        }
        State::Inside { name, line, .. } => {
            return Err(LoadError::syntax(line, format!("unterminated \\{name} group")));
        }
    }

    let synthesized = if saw_classes {
        0
    } else {
        let declared = std::mem::take(&mut declarations);
        declarations = implied_classes(&declared);
        let count = declarations.len();
        declarations.extend(declared);
        count
    };

    tracing::debug!(
        message = "source.parsed",
        declarations = declarations.len(),
        synthesized_classes = synthesized,
    );
    Ok(declarations)
}

/// One class per letter seen in patterns and exceptions, joined by its
/// uppercase form when that is a single different char.
fn implied_classes(declarations: &[Declaration]) -> Vec<Declaration> {
    let mut letters = BTreeSet::new();
    for declaration in declarations {
        match declaration {
            Declaration::Pattern { pattern: text, .. }
            | Declaration::Exception { word: text, .. } => {
                letters.extend(text.chars().filter(|&c| c != WORD_MARKER));
            }
            Declaration::Class(_) => {}
        }
    }
    letters
        .into_iter()
        .map(|c| {
            let mut group = String::from(c);
            let upper: Vec<char> = c.to_uppercase().collect();
            if upper.len() == 1 && upper[0] != c {
                group.push(upper[0]);
            }
            Declaration::Class(group)
        })
        .collect()
}

/// Read and parse a pattern file.
pub fn read_declarations(path: impl AsRef<Path>) -> Result<Vec<Declaration>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_declarations(&text)
}

impl Hyphenator {
    /// Build and freeze an engine from pattern-file text.
    pub fn from_source(text: &str) -> Result<Self> {
        let mut builder = HyphenatorBuilder::new();
        builder.extend(parse_declarations(text)?)?;
        Ok(builder.freeze())
    }

    /// Build and freeze an engine from a pattern file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("source.load", path = %path.display()).entered();
        let mut builder = HyphenatorBuilder::new();
        builder.extend(read_declarations(path)?)?;
        Ok(builder.freeze())
    }
}
