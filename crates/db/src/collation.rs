/// Comparison rule applied when matching record names.
///
/// `CaseInsensitive` applies full Unicode case folding, so letter case is
/// ignored even where one case spells a letter differently ("ß" and "SS"),
/// while accents and other marks still distinguish names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Collation {
    #[default]
    Exact,
    CaseInsensitive,
}

impl Collation {
    /// Key under which `value` compares equal to every other value with the
    /// same key. Stores index this key to enforce uniqueness.
    pub fn key(self, value: &str) -> String {
        match self {
            Collation::Exact => value.to_string(),
            Collation::CaseInsensitive => caseless::default_case_fold_str(value),
        }
    }

    pub fn matches(self, left: &str, right: &str) -> bool {
        match self {
            Collation::Exact => left == right,
            Collation::CaseInsensitive => self.key(left) == self.key(right),
        }
    }
}
