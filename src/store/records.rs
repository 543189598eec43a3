//! Record-block text format.
//!
//! One field per line, records separated by a line starting with `*`.
//! Fields are trimmed and a blank line is an absent field.

/// Block delimiter written between records.
pub const DELIMITER: &str = "\n*\n";

/// Separator of list-valued fields.
pub const LIST_SEPARATOR: char = ';';

/// One record: its fields in order, `None` for blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    fields: Vec<Option<String>>,
}

impl Block {
    /// Field at `index`; missing trailing fields read as absent.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).and_then(|f| f.as_deref())
    }

    /// Whether every field is absent.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(Option::is_none)
    }
}

/// Splits a file into blocks. Blank blocks (e.g. after a trailing
/// delimiter) are dropped.
pub fn read_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = Block::default();
    for line in text.lines() {
        let trimmed = line.trim();
        if line.starts_with('*') {
            blocks.push(std::mem::take(&mut current));
        } else if trimmed.is_empty() {
            current.fields.push(None);
        } else {
            current.fields.push(Some(trimmed.to_string()));
        }
    }
    blocks.push(current);
    blocks.retain(|b| !b.is_blank());
    blocks
}

/// Joins encoded records into file contents.
pub fn write_blocks<I>(records: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let blocks: Vec<String> = records.into_iter().map(|fields| fields.join("\n")).collect();
    let mut text = blocks.join(DELIMITER);
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// Splits a `;`-separated list, dropping empty items.
pub fn split_list(field: Option<&str>) -> Vec<&str> {
    field
        .map(|f| {
            f.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Joins list items with `; `.
pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
