//! Parse and render the metadata block at the top of a note.
//!
//! The block is a `---` fenced header of `key: value` lines. Values are either
//! scalars or string sequences. Sequences are written inline as JSON arrays;
//! YAML block lists and quoted scalars are accepted on read. Anything richer
//! (nested maps, block scalars, flow maps, comments) is carried through as
//! source text, so rewriting a note's block changes only the keys that were set.

const FENCE: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterValue {
  Scalar(String),
  List(Vec<String>),
}

impl FrontmatterValue {
  pub fn as_scalar(&self) -> Option<&str> {
    match self {
      FrontmatterValue::Scalar(s) => Some(s),
      FrontmatterValue::List(_) => None,
    }
  }

  pub fn as_list(&self) -> Option<&[String]> {
    match self {
      FrontmatterValue::List(items) => Some(items),
      FrontmatterValue::Scalar(_) => None,
    }
  }
}

/// One line group of a metadata block
#[derive(Debug, Clone)]
enum Item {
  Entry {
    key: String,
    value: FrontmatterValue,
    /// Source text (key line plus continuation lines), re-emitted as-is until the value changes
    raw: Option<String>,
  },
  /// Comments, blank lines and anything else that is not a `key:` line
  Verbatim(String),
}

/// Ordered key/value entries of a metadata block.
///
/// Entries read from a note keep their source text, so rewriting the block
/// only changes the keys that were actually set.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
  items: Vec<Item>,
}

impl PartialEq for Frontmatter {
  fn eq(&self, other: &Self) -> bool {
    self.iter().eq(other.iter())
  }
}

impl Frontmatter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.iter().next().is_none()
  }

  pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
    self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
  }

  pub fn get_str(&self, key: &str) -> Option<&str> {
    self.get(key).and_then(FrontmatterValue::as_scalar)
  }

  pub fn get_list(&self, key: &str) -> Option<&[String]> {
    self.get(key).and_then(FrontmatterValue::as_list)
  }

  /// Overwrite an existing key in place, or append it.
  /// Setting the value a key already holds keeps its source formatting.
  pub fn set(&mut self, key: &str, value: FrontmatterValue) {
    let existing = self.items.iter_mut().find_map(|item| match item {
      Item::Entry { key: k, value: v, raw } if k.as_str() == key => Some((v, raw)),
      _ => None,
    });
    match existing {
      Some((current, _)) if *current == value => {}
      Some((current, raw)) => {
        *current = value;
        *raw = None;
      }
      None => self.items.push(Item::Entry {
        key: key.to_string(),
        value,
        raw: None,
      }),
    }
  }

  pub fn set_scalar(&mut self, key: &str, value: impl Into<String>) {
    self.set(key, FrontmatterValue::Scalar(value.into()));
  }

  pub fn set_list(&mut self, key: &str, items: Vec<String>) {
    self.set(key, FrontmatterValue::List(items));
  }

  pub fn remove(&mut self, key: &str) -> Option<FrontmatterValue> {
    let idx = self
      .items
      .iter()
      .position(|item| matches!(item, Item::Entry { key: k, .. } if k == key))?;
    match self.items.remove(idx) {
      Item::Entry { value, .. } => Some(value),
      Item::Verbatim(_) => None,
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
    self.items.iter().filter_map(|item| match item {
      Item::Entry { key, value, .. } => Some((key.as_str(), value)),
      Item::Verbatim(_) => None,
    })
  }

  /// Fenced block including the closing fence and its newline
  pub fn render(&self) -> String {
    let mut out = String::from(FENCE);
    out.push('\n');
    for item in &self.items {
      match item {
        Item::Verbatim(text) | Item::Entry { raw: Some(text), .. } => out.push_str(text),
        Item::Entry { key, value, raw: None } => {
          out.push_str(key);
          out.push_str(": ");
          match value {
            FrontmatterValue::Scalar(s) => out.push_str(&render_scalar(s)),
            FrontmatterValue::List(items) => {
              out.push_str(&serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string()))
            }
          }
          out.push('\n');
        }
      }
    }
    out.push_str(FENCE);
    out.push('\n');
    out
  }
}

/// A note split into its metadata block and everything after it
#[derive(Debug, Clone)]
pub struct ParsedNote {
  pub frontmatter: Frontmatter,
  /// Text following the closing fence line, byte-for-byte
  pub body: String,
  pub has_block: bool,
}

/// Parse a complete note file
pub fn parse_note(content: &str) -> ParsedNote {
  match split_block(content) {
    Some((block, body)) => ParsedNote {
      frontmatter: parse_block(block),
      body: body.to_string(),
      has_block: true,
    },
    None => ParsedNote {
      frontmatter: Frontmatter::new(),
      body: content.to_string(),
      has_block: false,
    },
  }
}

/// Re-render a note with a new metadata block, keeping the body untouched
pub fn replace_frontmatter(content: &str, frontmatter: &Frontmatter) -> String {
  let parsed = parse_note(content);
  let mut out = frontmatter.render();
  out.push_str(&parsed.body);
  out
}

/// Split into (block text, remainder). The block must open on the first line.
fn split_block(content: &str) -> Option<(&str, &str)> {
  let first_end = content.find('\n')?;
  if content[..first_end].trim_end() != FENCE {
    return None;
  }
  let after_open = &content[first_end + 1..];

  let mut offset = 0;
  for line in after_open.split_inclusive('\n') {
    if line.trim_end() == FENCE {
      let block = &after_open[..offset];
      let body = &after_open[offset + line.len()..];
      return Some((block, body));
    }
    offset += line.len();
  }
  None
}

fn is_continuation(line: &str) -> bool {
  line.starts_with([' ', '\t']) || line.starts_with("- ") || line == "-"
}

fn parse_block(block: &str) -> Frontmatter {
  let mut fm = Frontmatter::new();
  let lines: Vec<&str> = block.lines().collect();
  let mut i = 0;

  while i < lines.len() {
    let line = lines[i];
    i += 1;

    let entry = if line.starts_with(['#', ' ', '\t']) || line.trim().is_empty() {
      None
    } else {
      line.split_once(':')
    };
    let Some((key, value)) = entry else {
      fm.items.push(Item::Verbatim(format!("{}\n", line)));
      continue;
    };

    // Continuation lines; blank lines count only when more continuation follows
    let mut end = i;
    let mut j = i;
    while j < lines.len() {
      if is_continuation(lines[j]) {
        j += 1;
        end = j;
      } else if lines[j].trim().is_empty() {
        j += 1;
      } else {
        break;
      }
    }
    let continuation = &lines[i..end];
    i = end;

    let mut raw = format!("{}\n", line);
    for extra in continuation {
      raw.push_str(extra);
      raw.push('\n');
    }

    let key = key.trim().to_string();
    let value = parse_value(strip_comment(value.trim()), continuation);
    fm.items.retain(|item| !matches!(item, Item::Entry { key: k, .. } if *k == key));
    fm.items.push(Item::Entry {
      key,
      value,
      raw: Some(raw),
    });
  }

  fm
}

/// Typed reading of one entry. Only lists and plain scalars are understood;
/// nested maps read as an empty scalar and block scalars as their joined text.
fn parse_value(value: &str, continuation: &[&str]) -> FrontmatterValue {
  if value.is_empty() {
    let items: Vec<&str> = continuation
      .iter()
      .filter(|l| !l.trim().is_empty())
      .map(|l| l.trim_start())
      .collect();
    if !items.is_empty() && items.iter().all(|l| l.starts_with("- ") || *l == "-") {
      return FrontmatterValue::List(
        items
          .iter()
          .map(|l| unquote(strip_comment(l.trim_start_matches('-').trim())))
          .collect(),
      );
    }
    return FrontmatterValue::Scalar(String::new());
  }

  if value.starts_with(['|', '>']) {
    let text = continuation.iter().map(|l| l.trim()).collect::<Vec<_>>().join("\n");
    return FrontmatterValue::Scalar(text);
  }
  if value.starts_with('[') && value.ends_with(']') {
    return FrontmatterValue::List(parse_inline_list(value));
  }
  FrontmatterValue::Scalar(unquote(value))
}

/// Drop a trailing ` # comment` from an unquoted value
fn strip_comment(value: &str) -> &str {
  if value.starts_with(['"', '\'']) {
    return value;
  }
  match value.find(" #") {
    Some(idx) => value[..idx].trim_end(),
    None => value,
  }
}

/// Parse an inline list like `["A","B"]` or `[foo, bar, "baz qux"]`
fn parse_inline_list(value: &str) -> Vec<String> {
  if let Ok(items) = serde_json::from_str::<Vec<String>>(value) {
    return items;
  }
  let inner = &value[1..value.len() - 1];
  inner
    .split(',')
    .map(|item| unquote(item.trim()))
    .filter(|item| !item.is_empty())
    .collect()
}

/// Remove surrounding quotes from a scalar
fn unquote(s: &str) -> String {
  let s = s.trim();
  if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
    return serde_json::from_str::<String>(s).unwrap_or_else(|_| s[1..s.len() - 1].to_string());
  }
  if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
    return s[1..s.len() - 1].replace("''", "'");
  }
  s.to_string()
}

fn render_scalar(s: &str) -> String {
  let needs_quotes = s.is_empty()
    || s != s.trim()
    || s.contains(": ")
    || s.contains(" #")
    || s.ends_with(':')
    || s.starts_with("- ")
    || s.starts_with(['[', '{', '"', '\'', '#', '&', '*', '!', '|', '>', '%', '@', '`']);
  if needs_quotes {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
  } else {
    s.to_string()
  }
}
