//! Spreadsheet cell values.
//!
//! A cell either holds a plain value or a rich value carrying a displayed
//! text, a computed result and a formula source side by side. The extractor
//! only ever sees the text produced by [`CellValue::resolve`].

/// A single spreadsheet cell.
///
/// # Example
///
/// ```
/// use stipend_engine::models::CellValue;
///
/// let formula = CellValue::Rich {
///     text: None,
///     result: Some("2025".to_string()),
///     formula: Some("=YEAR(A1)".to_string()),
/// };
/// assert_eq!(formula.resolve(), "2025");
/// assert_eq!(CellValue::Empty.resolve(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    /// No value.
    #[default]
    Empty,
    /// A plain value rendered as text.
    Value(String),
    /// A value with separate displayed, computed and formula forms.
    Rich {
        /// The text as displayed to the user.
        text: Option<String>,
        /// The cached result of the formula.
        result: Option<String>,
        /// The formula source.
        formula: Option<String>,
    },
}

impl CellValue {
    /// Creates a plain text cell.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Value(value.into())
    }

    /// Resolves the cell to text.
    ///
    /// Rich cells fall back through displayed text, computed result and
    /// formula source; blank components are skipped.
    pub fn resolve(&self) -> &str {
        match self {
            CellValue::Empty => "",
            CellValue::Value(value) => value,
            CellValue::Rich {
                text,
                result,
                formula,
            } => [text, result, formula]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .find(|s| !s.is_empty())
                .unwrap_or(""),
        }
    }

    /// Returns true if the cell resolves to blank text.
    pub fn is_blank(&self) -> bool {
        self.resolve().trim().is_empty()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Value(value.to_string())
        }
    }
}
