#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeSettings {
    /// Number of leading raw entries considered per feed.
    pub max_items: usize,
    /// Summary length limit, in characters.
    pub max_summary_chars: usize,
    pub untitled_placeholder: String,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            max_items: 9,
            max_summary_chars: 500,
            untitled_placeholder: "Untitled".to_string(),
        }
    }
}
