#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup. Unlike free-form labels, unknown names are
    /// not folded into `Other`; callers treat `None` as invalid input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" | "transportation" => Some(Self::Transport),
            "entertainment" => Some(Self::Entertainment),
            "utilities" | "utility" => Some(Self::Utilities),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Utilities,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
