/// Optional display name attached to a motivation. There is no identity behind
/// it; it is free text.
#[derive(Debug, Clone)]
pub struct AuthorName(String);

impl AuthorName {
    /// Trims `name`; whitespace-only names are treated as absent.
    pub fn parse(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        match trimmed.is_empty() {
            true => None,
            false => Some(Self(trimmed.to_string())),
        }
    }
}

impl AsRef<str> for AuthorName {
    fn as_ref(&self) -> &str { &self.0 }
}
