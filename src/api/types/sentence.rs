//! Query parameters of the sentence endpoint

/// The `q` parameter of `GET /api/sentence`
///
/// Built from every query pair so that a repeated `q` (which would otherwise
/// arrive as a list) counts as invalid instead of silently picking one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceQuery {
    pub q: Option<String>,
}

impl SentenceQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut values = pairs.into_iter().filter(|(k, _)| k == "q").map(|(_, v)| v);

        let q = match (values.next(), values.next()) {
            (Some(single), None) => Some(single),
            _ => None,
        };

        Self { q }
    }

    pub fn q(&self) -> Option<&str> {
        self.q.as_deref()
    }
}
