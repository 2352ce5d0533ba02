use super::AuthorName;
use super::MotivationText;

/// A parsed public submission. There is deliberately no status field: every
/// new motivation is stored as pending.
#[derive(Debug)]
pub struct NewMotivation {
    pub text: MotivationText,
    pub author: Option<AuthorName>,
    pub is_anonymous: bool,
}

impl NewMotivation {
    /// Anonymous submissions never keep an author, whatever was typed in.
    pub fn new(
        text: MotivationText,
        author: Option<&str>,
        is_anonymous: bool,
    ) -> Self {
        let author = match is_anonymous {
            true => None,
            false => author.and_then(AuthorName::parse),
        };
        Self {
            text,
            author,
            is_anonymous,
        }
    }
}
