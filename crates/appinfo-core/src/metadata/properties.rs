//! Java `.properties` reader.
//!
//! Build tooling emits metadata as `git.properties` / `build-info.properties`,
//! so this follows the `java.util.Properties` line format: `=`, `:` or
//! whitespace separators, `#`/`!` comments, backslash escapes (including
//! `\uXXXX`), and backslash line continuations.

use std::collections::BTreeMap;
use std::str::Chars;

use crate::error::{AppInfoError, Result};

/// Ordered key/value view over a parsed properties artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Parse `.properties` text.
    pub fn parse(input: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();
        let mut lines = input.lines();

        while let Some(line) = lines.next() {
            let line = trim_leading(line);
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let mut logical = String::new();
            let mut current = line;
            loop {
                if !continues(current) {
                    logical.push_str(current);
                    break;
                }
                logical.push_str(&current[..current.len() - 1]);
                match lines.next() {
                    Some(next) => current = trim_leading(next),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            entries.insert(unescape(key)?, unescape(value)?);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only keys under `prefix`, with the prefix stripped
    /// (`git.commit.id` -> `commit.id` for prefix `git.`).
    pub fn with_prefix(&self, prefix: &str) -> Self {
        let entries = self
            .entries
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), v.clone()))
            })
            .collect();
        Self { entries }
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn trim_leading(line: &str) -> &str {
    line.trim_start_matches(is_blank)
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let rest = trim_leading(&line[key_end..]);
    let value = match rest.strip_prefix(['=', ':']) {
        Some(after) => trim_leading(after),
        None => rest,
    };
    (key, value)
}

fn unescape(raw: &str) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = utf16_unit(&mut chars)?;
                let decoded = if (0xD800..=0xDBFF).contains(&unit) {
                    // Non-BMP characters are written as a \uXXXX\uXXXX surrogate pair.
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => utf16_unit(&mut chars)?,
                        _ => return Err(unpaired_surrogate(unit)),
                    };
                    char::decode_utf16([unit, low])
                        .next()
                        .and_then(|r| r.ok())
                        .ok_or_else(|| unpaired_surrogate(unit))?
                } else {
                    char::from_u32(u32::from(unit)).ok_or_else(|| unpaired_surrogate(unit))?
                };
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Four hex digits following `\u`.
fn utf16_unit(chars: &mut Chars<'_>) -> Result<u16> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AppInfoError::Metadata(format!(
            "malformed \\uxxxx encoding: \\u{hex}"
        )));
    }
    u16::from_str_radix(&hex, 16)
        .map_err(|e| AppInfoError::Metadata(format!("malformed \\uxxxx encoding: \\u{hex}: {e}")))
}

fn unpaired_surrogate(unit: u16) -> AppInfoError {
    AppInfoError::Metadata(format!("unpaired utf-16 surrogate: \\u{unit:04x}"))
}
