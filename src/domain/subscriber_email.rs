use validator::ValidateEmail;

/// A normalised (trimmed, lowercased) email address of the shape
/// `local@domain.tld`.
#[derive(Debug, Clone)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(email: &str) -> Result<Self, String> {
        let email = email.trim().to_lowercase();
        // `validator` accepts dotless domains (e.g. `john@localhost`), which we
        // don't want for a mailing list
        let has_tld = email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| {
                domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            });
        match email.validate_email() && has_tld {
            true => Ok(Self(email)),
            false => Err("Please enter a valid email address.".to_string()),
        }
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str { &self.0 }
}
