use crate::domain::config::ConfigMap;
use crate::domain::ports::ConfigSource;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

/// Layered configuration read from `.properties` / `.ini` style files.
///
/// Files are read in order and later files override keys of earlier ones.
/// Every file must be readable: a single missing layer fails the whole load,
/// so a session never starts from a partial configuration.
#[derive(Debug, Clone, Default)]
pub struct PropertiesFileSource {
    paths: Vec<PathBuf>,
}

impl PropertiesFileSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ConfigSource for PropertiesFileSource {
    async fn load(&self) -> Result<ConfigMap> {
        let mut map = ConfigMap::new();
        for path in &self.paths {
            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                PaymentError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
            })?;
            let layer = parse_properties(&contents);
            tracing::debug!(path = %path.display(), keys = layer.len(), "Loaded configuration layer");
            map.merge(layer);
        }
        Ok(map)
    }
}

/// Parses `key=value` lines in Java `.properties` syntax.
///
/// Accepts `=`, `:` or whitespace as the separator, `#` and `!` comments,
/// `[section]` headers (ignored) and continuation lines ending in an odd
/// number of backslashes. Keys and values are unescaped: `\t`, `\n`, `\r`,
/// `\f`, `\uXXXX`, and `\` before any other character yields that character.
pub fn parse_properties(contents: &str) -> ConfigMap {
    let mut map = ConfigMap::new();
    let mut pending = String::new();

    for line in contents.lines() {
        let line = line.trim_start();
        if pending.is_empty()
            && (line.is_empty() || line.starts_with('#') || line.starts_with('!'))
        {
            continue;
        }

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            pending.push_str(&line[..line.len() - 1]);
            continue;
        }
        pending.push_str(line);

        let logical = std::mem::take(&mut pending);
        if logical.starts_with('[') && logical.trim_end().ends_with(']') {
            continue;
        }
        if let Some((key, value)) = split_entry(&logical) {
            map.set(key, value);
        }
    }

    if !pending.is_empty()
        && let Some((key, value)) = split_entry(&pending)
    {
        map.set(key, value);
    }
    map
}

fn split_entry(line: &str) -> Option<(String, String)> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }

    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }

    let mut rest = line[key_end..].trim_start();
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start();
    }
    Some((unescape(&line[..key_end]), unescape(rest)))
}

// A malformed `\u` sequence is kept verbatim.
fn unescape(raw: &str) -> String {
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
                let hex: String = chars.clone().take(4).collect();
                let decoded = Some(hex.as_str())
                    .filter(|h| h.len() == 4 && h.chars().all(|d| d.is_ascii_hexdigit()))
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    None => out.push_str("\\u"),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
