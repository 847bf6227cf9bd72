//! Source-level rewriting that runs before markdown parsing.
//!
//! Two rewrites happen, in order, outside fenced and indented code blocks:
//!
//! 1. Page-break tokens (`<!-- pagebreak -->`, `\newpage`) become the
//!    canonical page-break marker element.
//! 2. Pipe tables directly followed by `{borderless}` or `{columns}` become a
//!    two-column container: the first cell of every row flows into the left
//!    column, the second into the right one.
//!
//! Both rewrites are idempotent: their output contains nothing either of them
//! would match again.

mod columns;
mod fence;

use std::borrow::Cow;

use fence::FenceTracker;

/// Canonical page-break marker element.
pub const PAGE_BREAK_MARKER: &str = r#"<div class="page-break"></div>"#;

/// Author-facing page-break spellings.
pub const PAGE_BREAK_TOKENS: [&str; 2] = ["<!-- pagebreak -->", r"\newpage"];

/// Markers that turn a preceding table into columns (or a borderless table).
pub const COLUMN_MARKERS: [&str; 2] = ["{borderless}", "{columns}"];

/// Rewrites raw markdown before parsing.
///
/// # Example
///
/// ```
/// use marktex_renderer::Preprocessor;
///
/// let mut preprocessor = Preprocessor::new();
/// let output = preprocessor.process("Intro\n\\newpage\nNext");
///
/// assert_eq!(output, "Intro\n\n<div class=\"page-break\"></div>\n\nNext");
/// assert_eq!(preprocessor.page_breaks(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Preprocessor {
    warnings: Vec<String>,
    page_breaks: usize,
    column_blocks: usize,
}

impl Preprocessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite markdown and return the result.
    ///
    /// Counters and warnings accumulate across calls.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let with_breaks = self.rewrite_page_breaks(input);
        let mut output = self.rewrite_column_tables(&with_breaks);
        if input.ends_with('\n') && !output.ends_with('\n') {
            output.push('\n');
        }
        output
    }

    /// Problems found while rewriting, such as tables that could not be split.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Number of page-break tokens replaced.
    #[must_use]
    pub fn page_breaks(&self) -> usize {
        self.page_breaks
    }

    /// Number of tables converted to two-column containers.
    #[must_use]
    pub fn column_blocks(&self) -> usize {
        self.column_blocks
    }

    fn rewrite_page_breaks(&mut self, input: &str) -> String {
        let mut fence = FenceTracker::new();
        let mut lines = Vec::new();

        for line in input.lines() {
            if fence.is_code(line) {
                lines.push(Cow::Borrowed(line));
                continue;
            }

            if PAGE_BREAK_TOKENS.contains(&line.trim()) {
                // A standalone token becomes its own HTML block.
                self.page_breaks += 1;
                lines.push(Cow::Owned(format!("\n{PAGE_BREAK_MARKER}\n")));
                continue;
            }

            let mut rewritten = Cow::Borrowed(line);
            for token in PAGE_BREAK_TOKENS {
                let (replaced, count) = replace_outside_code(&rewritten, token, PAGE_BREAK_MARKER);
                if count > 0 {
                    self.page_breaks += count;
                    rewritten = Cow::Owned(replaced);
                }
            }
            lines.push(rewritten);
        }

        lines.join("\n")
    }

    fn rewrite_column_tables(&mut self, input: &str) -> String {
        let lines: Vec<&str> = input.lines().collect();
        let mut output: Vec<String> = Vec::with_capacity(lines.len());
        let mut fence = FenceTracker::new();
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];
            if fence.is_code(line) {
                output.push(line.to_owned());
                idx += 1;
                continue;
            }

            let Some(table) = columns::find_table(&lines, idx) else {
                output.push(line.to_owned());
                idx += 1;
                continue;
            };
            for consumed in &lines[idx + 1..table.end] {
                fence.is_code(consumed);
            }

            match table.to_columns() {
                Ok(block) => {
                    // Splitting can break a code span that crossed cells, so the
                    // cells get their own page-break pass.
                    let block = self.rewrite_page_breaks(&block);
                    self.column_blocks += 1;
                    if output.last().is_some_and(|l| !l.trim().is_empty()) {
                        output.push(String::new());
                    }
                    output.push(block);
                    output.push(String::new());
                }
                Err(reason) => {
                    // Leave the table as written; the marker is handled after parsing.
                    self.warnings.push(format!(
                        "line {}: table not converted to columns: {reason}",
                        idx + 1
                    ));
                    output.extend(lines[idx..table.end].iter().map(|l| (*l).to_owned()));
                }
            }
            idx = table.end;
        }

        output.join("\n")
    }
}

/// Rewrite markdown with a fresh [`Preprocessor`].
#[must_use]
pub fn preprocess(input: &str) -> String {
    Preprocessor::new().process(input)
}

/// Replace `token` with `replacement` except inside inline code spans.
///
/// Returns the rewritten line and the number of replacements made.
fn replace_outside_code(line: &str, token: &str, replacement: &str) -> (String, usize) {
    if !line.contains(token) {
        return (line.to_owned(), 0);
    }

    // Unbalanced backticks are not a code span.
    let balanced = line.matches('`').count() % 2 == 0;
    let mut out = String::with_capacity(line.len());
    let mut count = 0;

    for (i, segment) in line.split('`').enumerate() {
        if i > 0 {
            out.push('`');
        }
        if balanced && i % 2 == 1 {
            out.push_str(segment);
        } else {
            count += segment.matches(token).count();
            out.push_str(&segment.replace(token, replacement));
        }
    }

    (out, count)
}
