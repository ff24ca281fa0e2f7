//! # String Interner
//!
//! Deduplicates string literals across a compilation, assigning each a
//! stable `.strN` label in first-registration order (spec §4.4).

pub struct StringInterner {
    /// insertion-ordered `(raw, escaped)` pairs; index is the label number.
    entries: Vec<(String, String)>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register `raw`, returning its label. Repeated registrations of an
    /// equal string return the same label (spec §8 "Interning idempotence").
    pub fn register(&mut self, raw: &str) -> String {
        if let Some(idx) = self.entries.iter().position(|(r, _)| r == raw) {
            return format!(".str{idx}");
        }
        let escaped = escape(raw);
        self.entries.push((raw.to_string(), escaped));
        format!(".str{}", self.entries.len() - 1)
    }

    /// `"<label>\nDW [ \"<escaped>\" 0 ]"` for every registered string, in
    /// registration order.
    pub fn emit_all(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, (_, escaped))| format!(".str{idx}\nDW [ \"{escaped}\" 0 ]"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(raw: &str) -> String {
    raw.chars()
        .flat_map(|c| match c {
            '\n' => vec!['\\', 'n'],
            '\t' => vec!['\\', 't'],
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            other => vec![other],
        })
        .collect()
}
