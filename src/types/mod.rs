mod attachment;
mod comment;
mod department;
mod draft;
mod issue;
mod user;
mod vote;

pub use attachment::Attachment;
pub use comment::{Comment, ProblemReport};
pub use department::Department;
pub use draft::Draft;
pub use issue::{BilingualText, Category, Issue, IssuePatch, Status};
pub use user::{new_user_id, Role, User};
pub use vote::{Vote, VoteDirection};

/// Lowercased alphanumerics only, so `Public Works`, `public-works` and
/// `publicWorks` compare equal.
pub(crate) fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
