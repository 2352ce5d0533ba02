mod author_name;
mod motivation_status;
mod motivation_text;
mod new_motivation;
mod pagination;
mod subscriber_email;
// allow external `use` statements to skip `motivation_text` etc
pub use author_name::AuthorName;
pub use motivation_status::MotivationStatus;
pub use motivation_status::StatusFilter;
pub use motivation_text::MotivationText;
pub use new_motivation::NewMotivation;
pub use pagination::Pagination;
pub use subscriber_email::SubscriberEmail;
