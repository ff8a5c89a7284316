//! Block-comment (`/** ... */`) documentation parser.
//!
//! Each comment becomes a `DocBlock`. The code between the end of a comment
//! and the start of the next one is attached to the earlier block.
//!
//! ```text
//! /**
//!  * Summary line.
//!  *
//!  * @param {String} name the collection name
//!  * @_class collection
//!  * @api public
//!  */
//! Db.prototype.collection = function(name) { ... }
//! ```

use super::context::parse_code_context;
use super::{CommentParser, ParseError};
use crate::model::{Description, DocBlock, Tag};
use regex::Regex;
use std::sync::LazyLock;

// Leading `*` gutter on each comment line
static RE_GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\* ?").unwrap());

static RE_TYPE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[|,/]\s*").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct JsDocParser;

impl CommentParser for JsDocParser {
    fn parse(&self, source: &str) -> Result<Vec<DocBlock>, ParseError> {
        let source = source.replace("\r\n", "\n");
        let bytes = source.as_bytes();
        let mut blocks: Vec<DocBlock> = Vec::new();

        let mut i = 0;
        let mut code_start = 0;
        let mut in_line_comment = false;
        // Open quote byte while inside a string literal
        let mut in_string: Option<u8> = None;

        while i < bytes.len() {
            if in_line_comment {
                if bytes[i] == b'\n' {
                    in_line_comment = false;
                }
                i += 1;
                continue;
            }

            if let Some(quote) = in_string {
                match bytes[i] {
                    b'\\' => i += 1,
                    b'\n' if quote != b'`' => in_string = None,
                    b if b == quote => in_string = None,
                    _ => {}
                }
                i += 1;
                continue;
            }

            if matches!(bytes[i], b'\'' | b'"' | b'`') {
                in_string = Some(bytes[i]);
                i += 1;
                continue;
            }

            if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'/') {
                in_line_comment = true;
                i += 2;
                continue;
            }

            if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
                attach_code(&mut blocks, &source[code_start..i]);

                let open = i;
                let mut body_start = i + 2;
                let rest = &source[body_start..];
                let ignore = rest.starts_with('!');
                if ignore || (rest.starts_with('*') && !rest.starts_with("*/")) {
                    body_start += 1;
                }

                let close = source[body_start..]
                    .find("*/")
                    .map(|offset| body_start + offset)
                    .ok_or_else(|| ParseError::UnterminatedComment {
                        line: line_of(&source, open),
                    })?;

                let mut block = parse_comment(&source[body_start..close]);
                block.ignore = ignore;
                blocks.push(block);

                i = close + 2;
                code_start = i;
                continue;
            }

            i += 1;
        }

        if blocks.is_empty() {
            blocks.push(DocBlock::default());
        }
        attach_code(&mut blocks, &source[code_start..]);

        Ok(blocks)
    }
}

/// Attach trimmed code to the most recent block, if both exist.
fn attach_code(blocks: &mut [DocBlock], raw: &str) {
    let code = raw.trim();
    if code.is_empty() {
        return;
    }
    if let Some(block) = blocks.last_mut() {
        block.ctx = parse_code_context(code);
        block.code = code.to_string();
    }
}

/// 1-based line number of a byte offset.
fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Parse the inside of one comment (between the delimiters).
pub fn parse_comment(raw: &str) -> DocBlock {
    let text = RE_GUTTER.replace_all(raw, "");
    let text = text.trim();

    let lines: Vec<&str> = text.lines().collect();
    let tag_start = lines
        .iter()
        .position(|line| line.starts_with('@'))
        .unwrap_or(lines.len());

    let full = lines[..tag_start].join("\n").trim_end().to_string();
    let mut paragraphs = full.split("\n\n");
    let summary = paragraphs.next().unwrap_or_default().to_string();
    let body = paragraphs.collect::<Vec<_>>().join("\n\n");

    let mut tags: Vec<Tag> = Vec::new();
    for line in &lines[tag_start..] {
        if line.starts_with('@') {
            tags.push(parse_tag(line));
        } else if !line.trim().is_empty() {
            if let Some(last) = tags.last_mut() {
                continue_tag(last, line.trim());
            }
        }
    }

    let is_private = tags
        .iter()
        .any(|t| t.kind == "api" && t.visibility.as_deref() == Some("private"));

    DocBlock {
        tags,
        description: Description {
            full,
            summary,
            body,
        },
        is_private,
        ..Default::default()
    }
}

/// Parse a single `@type ...` line.
pub fn parse_tag(line: &str) -> Tag {
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let kind = head.strip_prefix('@').unwrap_or(head).to_string();
    let mut tag = Tag {
        kind,
        ..Default::default()
    };

    match tag.kind.as_str() {
        "param" => {
            tag.types = parse_tag_types(parts.next());
            tag.name = Some(parts.next().unwrap_or_default().to_string());
            tag.description = Some(join_words(parts));
        }
        "return" | "returns" => {
            tag.types = parse_tag_types(parts.next());
            tag.description = Some(join_words(parts));
        }
        "see" => {
            let rest: Vec<&str> = parts.collect();
            if line.contains("http") {
                let (title, url) = match rest.split_first() {
                    Some((first, tail)) if !tail.is_empty() => (first.to_string(), tail.join(" ")),
                    _ => (String::new(), rest.join(" ")),
                };
                tag.title = Some(title);
                tag.url = Some(url);
            } else {
                tag.local = Some(rest.join(" "));
            }
        }
        "api" => {
            tag.visibility = parts.next().map(str::to_string);
        }
        "type" => {
            tag.types = parse_tag_types(parts.next());
        }
        "memberOf" => {
            tag.parent = parts.next().map(str::to_string);
        }
        _ => {
            tag.string = Some(join_words(parts));
        }
    }

    tag
}

/// `{String|Array}` → `["String", "Array"]`.
fn parse_tag_types(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let stripped: String = raw.chars().filter(|c| *c != '{' && *c != '}').collect();
    RE_TYPE_SEPARATOR
        .split(&stripped)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_words<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}

/// Append a wrapped line to whichever free-text field the tag carries.
fn continue_tag(tag: &mut Tag, text: &str) {
    let field = if tag.string.is_some() {
        &mut tag.string
    } else {
        &mut tag.description
    };
    match field {
        Some(existing) if !existing.is_empty() => {
            existing.push('\n');
            existing.push_str(text);
        }
        _ => *field = Some(text.to_string()),
    }
}
