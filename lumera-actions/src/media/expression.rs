//! Structured search expressions
//!
//! The media API takes a textual query expression. Building it from typed
//! parts keeps caller-supplied search terms inside a quoted literal instead
//! of splicing them into the expression grammar.

/// Search expression scoped to a folder, optionally ANDed with a free-text
/// term.
#[derive(Debug, Clone)]
pub struct SearchExpression {
    folder: String,
    term: Option<String>,
}

impl SearchExpression {
    /// Scope the search to a folder on the media service.
    pub fn in_folder(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            term: None,
        }
    }

    /// AND a caller-supplied search term onto the expression.
    pub fn matching(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Render the expression string sent to the media API.
    pub fn build(&self) -> String {
        let mut expr = format!("folder={}", quoted(&self.folder));
        if let Some(term) = &self.term {
            expr.push_str(" AND ");
            expr.push_str(&quoted(term));
        }
        expr
    }
}

/// Quote a value as an expression string literal, escaping backslashes and
/// embedded quotes.
fn quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
