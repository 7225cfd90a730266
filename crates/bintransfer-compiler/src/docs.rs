//! Documentation extraction from comment blocks.

/// Turn one comment's text into doc entries.
///
/// Single-line comments are kept verbatim (`// E` gives `" E"`). Multi-line
/// block comments become one entry per non-blank line, with leading
/// whitespace and a leading `*` (plus one following space) removed. Trailing
/// whitespace on a kept line is preserved.
pub fn doc_entries(text: &str) -> Vec<String> {
    if !text.contains(['\n', '\r']) {
        return vec![text.to_string()];
    }

    text.lines()
        .filter_map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            let line = line.strip_prefix(' ').unwrap_or(line);
            (!line.trim().is_empty()).then(|| line.to_string())
        })
        .collect()
}

/// Comments collected since the last declaration.
#[derive(Debug, Default)]
pub struct PendingDocs(Vec<String>);

impl PendingDocs {
    pub fn push(&mut self, text: &str) {
        self.0.extend(doc_entries(text));
    }

    /// Hand the collected entries to the next declaration.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.0)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
