use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Aligned `key: value` line inside a section
    pub fn field(&self, key: &str, value: impl std::fmt::Display) {
        println!("  {:<14} {}", style(format!("{}:", key)).dim(), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_lines() {
        let out = Output::default();
        out.section("Network: sepolia");
        out.field("chain id", 11_155_111);
        out.success("ready");
        out.info("1 network");
        out.warning("PRIVATE_KEY is not set");
        out.error("Error: unknown network 'nonexistent'");
    }
}
