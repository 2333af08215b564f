//! go.mod parser
//!
//! Handles:
//! - `module` and `go` directives
//! - require statements (single and block)
//! - `// indirect` markers
//! - other directives and blocks (replace, exclude, retract, toolchain) are skipped

use crate::error::ManifestError;
use crate::manifest::{ManifestSnapshot, Requirement};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// Single require: require module/path v1.2.3 // comment
static SINGLE_REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^require\s+("[^"]+"|[^\s"(]+)\s+(v[^\s/]+)\s*(//.*)?$"#).unwrap()
});

// Require block entry: module/path v1.2.3 // comment
static BLOCK_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^("[^"]+"|[^\s"]+)\s+(v[^\s/]+)\s*(//.*)?$"#).unwrap());

// go directive: go 1.21, go 1.21.0, go 1.21rc1
static GO_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^go\s+(\d+(?:\.\d+){0,2}(?:(?:rc|beta)\d+)?)\s*(//.*)?$").unwrap()
});

static MODULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^module\s+("[^"]+"|\S+)\s*(//.*)?$"#).unwrap());

/// Which block the parser is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    Require,
    Other,
}

/// Parse go.mod content into a snapshot
///
/// `path` is only used for error messages.
pub fn parse_go_mod(path: &Path, content: &str) -> Result<ManifestSnapshot, ManifestError> {
    let mut module = None;
    let mut toolchain_version = None;
    let mut requirements = Vec::new();
    let mut block = Block::None;
    let mut block_start = 0;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if block != Block::None {
            if trimmed == ")" {
                block = Block::None;
                continue;
            }
            if block == Block::Require {
                let caps = BLOCK_ENTRY_RE.captures(trimmed).ok_or_else(|| {
                    ManifestError::parse_error(path, line_no, "malformed require entry")
                })?;
                requirements.push(requirement_from(&caps));
            }
            continue;
        }

        let code = trimmed
            .find("//")
            .map_or(trimmed, |i| trimmed[..i].trim_end());
        let keyword = code.split_whitespace().next().unwrap_or_default();
        let opens_block = code.ends_with('(');

        match keyword {
            "require" if opens_block => {
                block = Block::Require;
                block_start = line_no;
            }
            "require" => {
                let caps = SINGLE_REQUIRE_RE.captures(trimmed).ok_or_else(|| {
                    ManifestError::parse_error(path, line_no, "malformed require directive")
                })?;
                requirements.push(requirement_from(&caps));
            }
            "go" => {
                let caps = GO_DIRECTIVE_RE.captures(trimmed).ok_or_else(|| {
                    ManifestError::parse_error(path, line_no, "invalid go version")
                })?;
                if toolchain_version.is_some() {
                    return Err(ManifestError::parse_error(
                        path,
                        line_no,
                        "repeated go statement",
                    ));
                }
                toolchain_version = Some(caps[1].to_string());
            }
            "module" => {
                let caps = MODULE_RE.captures(trimmed).ok_or_else(|| {
                    ManifestError::parse_error(path, line_no, "malformed module directive")
                })?;
                module = Some(unquote(&caps[1]).to_string());
            }
            _ if opens_block => {
                block = Block::Other;
                block_start = line_no;
            }
            _ => {}
        }
    }

    if block != Block::None {
        return Err(ManifestError::parse_error(
            path,
            block_start,
            "unterminated block",
        ));
    }

    Ok(ManifestSnapshot {
        module,
        toolchain_version,
        requirements,
        content: content.to_string(),
    })
}

fn requirement_from(caps: &regex::Captures) -> Requirement {
    let comment = caps.get(3).map(|m| m.as_str()).unwrap_or("");
    Requirement {
        path: unquote(&caps[1]).to_string(),
        version: caps[2].to_string(),
        indirect: is_indirect_comment(comment),
    }
}

/// `// indirect` or `// indirect; other notes`
fn is_indirect_comment(comment: &str) -> bool {
    let text = comment.trim_start_matches('/').trim();
    text == "indirect" || text.starts_with("indirect;")
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}
