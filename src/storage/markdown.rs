//! Parsing of the loosely structured markdown codex.
//!
//! A codex is a sequence of blocks, each opened by a level-2 heading. Inside
//! a block, fields are bullet lines of the form `- Key: value`.

/// Splits a codex into its card blocks.
///
/// A new segment starts at every line beginning with `##` and a whitespace
/// character. Segments that do not open with `## ` (the preamble before the
/// first heading, for instance) are discarded. The newline separating two
/// segments belongs to neither.
#[must_use]
pub fn split_blocks(markdown: &str) -> Vec<&str> {
    let mut starts = vec![0];
    starts.extend(
        markdown
            .match_indices('\n')
            .map(|(index, _)| index + 1)
            .filter(|&start| opens_block(&markdown[start..])),
    );

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).map_or(markdown.len(), |&next| next - 1);
            &markdown[start..end]
        })
        .filter(|block| block.starts_with("## "))
        .collect()
}

fn opens_block(rest: &str) -> bool {
    rest.strip_prefix("##")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Returns the text of the first level-2 heading in `block`, trimmed.
///
/// Deeper headings (`###`) are not level-2 headings and are skipped.
#[must_use]
pub fn heading(block: &str) -> Option<&str> {
    block.lines().find_map(|line| {
        let rest = line.strip_prefix("##")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some(rest.trim()).filter(|title| !title.is_empty())
    })
}

/// Returns the trimmed value of the first `- <key>: <value>` line in `block`.
///
/// The key is matched literally and case-sensitively. Whitespace is allowed
/// before and after the dash. Lines whose value is blank are not matches, and
/// a missing field yields an empty string.
#[must_use]
pub fn field<'a>(block: &'a str, key: &str) -> &'a str {
    block
        .lines()
        .find_map(|line| field_value(line, key))
        .unwrap_or_default()
}

fn field_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let value = line
        .trim_start()
        .strip_prefix('-')?
        .trim_start()
        .strip_prefix(key)?
        .strip_prefix(':')?
        .trim();
    (!value.is_empty()).then_some(value)
}

/// Normalizes a delimited list into its trimmed, non-empty entries.
///
/// Semicolons are treated as commas. Order is preserved and duplicates are
/// kept.
#[must_use]
pub fn parse_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
