use unicode_segmentation::UnicodeSegmentation;

/// The body of a motivation: trimmed, and between `MIN_LEN` and `MAX_LEN`
/// user-perceived characters (grapheme clusters) long.
///
/// Must be instantiated with `MotivationText::parse`, which is used both for
/// public submissions and for admin edits.
#[derive(Debug, Clone)]
pub struct MotivationText(String);

impl MotivationText {
    pub const MIN_LEN: usize = 5;
    pub const MAX_LEN: usize = 500;

    pub fn parse(text: String) -> Result<Self, String> {
        let trimmed = text.trim();
        let len = trimmed.graphemes(true).count();
        if len < Self::MIN_LEN {
            return Err(format!(
                "Motivation text must be at least {} characters.",
                Self::MIN_LEN
            ));
        }
        if len > Self::MAX_LEN {
            return Err(format!(
                "Motivation text must be under {} characters.",
                Self::MAX_LEN
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for MotivationText {
    fn as_ref(&self) -> &str { &self.0 }
}
