//! Code block tracking for line-based rewriting.
//!
//! Directive tokens inside a fenced or indented code block are literal text
//! and must survive preprocessing untouched.

/// Fence state while walking a document line by line.
///
/// A fence opens with three or more backticks or tildes (indented by at most
/// three spaces) and closes on a line made only of the same character, at
/// least as long as the opener.
///
/// Indented code blocks are tracked too: a line indented by four or more
/// spaces (or a tab) after a blank line starts one, and it runs until the
/// next non-blank line with less indentation.
#[derive(Debug)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
    after_blank: bool,
    indented: bool,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self {
            open: None,
            after_blank: true,
            indented: false,
        }
    }

    /// Feed the next line. Returns `true` when the line belongs to a code
    /// block, fence delimiters included.
    pub(crate) fn is_code(&mut self, line: &str) -> bool {
        if self.update(line) || self.in_fence() {
            self.after_blank = false;
            self.indented = false;
            return true;
        }
        if line.trim().is_empty() {
            self.after_blank = true;
            return self.indented;
        }
        self.indented = is_indented(line) && (self.indented || self.after_blank);
        self.after_blank = false;
        self.indented
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` when the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some(trimmed) = strip_indent(line) else {
            return false;
        };

        match self.open {
            Some((ch, len)) => {
                let run = leading_run(trimmed, ch);
                if run >= len && trimmed[run..].trim().is_empty() {
                    self.open = None;
                    true
                } else {
                    false
                }
            }
            None => {
                let Some(ch) = trimmed.chars().next().filter(|c| matches!(c, '`' | '~')) else {
                    return false;
                };
                let run = leading_run(trimmed, ch);
                // A backtick info string may not contain backticks.
                if run < 3 || (ch == '`' && trimmed[run..].contains('`')) {
                    return false;
                }
                self.open = Some((ch, run));
                true
            }
        }
    }
}

/// Strip up to three leading spaces; deeper indentation is a code block, not a fence.
fn strip_indent(line: &str) -> Option<&str> {
    let spaces = line.len() - line.trim_start_matches(' ').len();
    (spaces <= 3).then(|| &line[spaces..])
}

fn is_indented(line: &str) -> bool {
    line.starts_with('\t') || line.len() - line.trim_start_matches(' ').len() >= 4
}

fn leading_run(s: &str, ch: char) -> usize {
    s.chars().take_while(|&c| c == ch).count()
}
