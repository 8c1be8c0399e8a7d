//! Colored terminal output on stderr.
//!
//! Signed requests go to stdout; everything meant for the person at the
//! terminal goes through [`Output`].

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a `key = "value"` TOML line.
    pub(crate) fn toml_entry(&self, key: &str, value: &str) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        self.line(&format!("{key} = {}", self.dim.apply_to(format!("\"{escaped}\""))));
    }

    /// Print a heading between separator lines.
    pub(crate) fn banner(&self, title: &str) {
        let rule = "=".repeat(70);
        self.line(&rule);
        self.highlight(title);
        self.line(&rule);
    }

    fn line(&self, msg: &str) {
        // Nothing useful to do if stderr is gone
        let _ = self.term.write_line(msg);
    }
}
