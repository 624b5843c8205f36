//! Recursive-descent trace
//!
//! The trace shows which grammar rules were entered and left and which tokens they
//! matched, indented by nesting depth. It is append-only and belongs to a single
//! analysis.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub text: String,
    pub depth: usize,
}

impl TraceEntry {
    pub fn render(&self, indent_width: usize) -> String {
        format!("{}{}", " ".repeat(self.depth * indent_width), self.text)
    }
}

#[derive(Debug, Clone)]
pub struct TraceLogger {
    entries: Vec<TraceEntry>,
    depth: usize,
    record_tokens: bool,
    enabled: bool,
}

impl TraceLogger {
    pub fn new(record_tokens: bool) -> Self {
        Self {
            entries: Vec::new(),
            depth: 0,
            record_tokens,
            enabled: true,
        }
    }

    /// Stop recording. Nesting is still tracked so the logger stays consistent.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enter(&mut self, rule: &str) {
        self.log(format!("Enter <{}>", rule));
        self.depth += 1;
    }

    pub fn exit(&mut self, rule: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.log(format!("Exit <{}>", rule));
    }

    /// Record a matched token, as `Token: label` or `Token: label = value`.
    pub fn token(&mut self, label: &str, value: Option<&str>) {
        if !self.record_tokens {
            return;
        }
        let text = match value {
            Some(value) => format!("Token: {} = {}", label, value),
            None => format!("Token: {}", label),
        };
        self.log(text);
    }

    pub fn log(&mut self, text: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.entries.push(TraceEntry {
            text: text.into(),
            depth: self.depth,
        });
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}

/// Render a trace as indented lines.
pub fn render_trace(entries: &[TraceEntry], indent_width: usize) -> String {
    entries
        .iter()
        .map(|entry| entry.render(indent_width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nesting_depths() {
        let mut trace = TraceLogger::new(true);
        trace.enter("For");
        trace.token("for", None);
        trace.enter("Operand");
        trace.token("const", Some("1"));
        trace.exit("Operand");
        trace.exit("For");

        let depths: Vec<_> = trace.entries().iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2, 1, 0]);
        assert_eq!(trace.depth(), 0);
    }

    #[test]
    fn test_render() {
        let mut trace = TraceLogger::new(true);
        trace.enter("Stmt");
        trace.token("var", Some("x"));
        trace.exit("Stmt");

        assert_eq!(
            render_trace(trace.entries(), 2),
            "Enter <Stmt>\n  Token: var = x\nExit <Stmt>"
        );
    }

    #[test]
    fn test_disabled_trace_records_nothing() {
        let mut trace = TraceLogger::new(true);
        trace.disable();
        trace.enter("Stmt");
        trace.token("var", Some("x"));
        trace.exit("Stmt");
        assert!(trace.entries().is_empty());
        assert_eq!(trace.depth(), 0);
    }

    #[test]
    fn test_tokens_can_be_switched_off() {
        let mut trace = TraceLogger::new(false);
        trace.enter("Stmt");
        trace.token("var", Some("x"));
        trace.exit("Stmt");
        assert_eq!(trace.entries().len(), 2);
    }
}
