//! Footer shown under every frame.

/// Width of the rule separating the frame from the footer.
const RULE_WIDTH: usize = 60;

/// Key legend on the last footer line.
pub const KEY_LEGEND: &str =
    "[a/d] Prv/Nxt | [Space] Stop/Play | [x/c] Prv/Nxt frame | [q] Quit";

/// Item name and frame position.
///
/// Format:
/// ```text
/// ------------------------------------------------------------
/// [Name] cat
/// [Frame] 2 / 12
/// [a/d] Prv/Nxt | [Space] Stop/Play | [x/c] Prv/Nxt frame | [q] Quit
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Footer<'a> {
    pub name: &'a str,
    /// Zero-based frame index
    pub index: usize,
    pub total: usize,
}

impl Footer<'_> {
    pub fn format(&self) -> String {
        format!(
            "{}\n[Name] {}\n[Frame] {} / {}\n{}",
            "-".repeat(RULE_WIDTH),
            self.name,
            self.index + 1,
            self.total,
            KEY_LEGEND
        )
    }
}

/// A frame followed by a blank line and its footer.
pub fn render_screen(frame: &str, footer: &Footer<'_>) -> String {
    format!("{}\n\n{}\n", frame, footer.format())
}
