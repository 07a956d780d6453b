//! Content graph entities: questions, answers and comments.
//!
//! Parents hold append-only identifier sequences of their children and every
//! child holds an immutable reference to its parent. The services in
//! [`crate::domain::content_graph_service`] keep both directions in step.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::UserId;

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 200;
/// Maximum body length in characters.
pub const BODY_MAX: usize = 20_000;
/// Maximum number of tags per question.
pub const TAGS_MAX: usize = 5;
/// Maximum tag length in characters.
pub const TAG_MAX: usize = 32;

/// Validation errors for content payloads and identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("{entity} id must be a valid UUID")]
    InvalidId { entity: &'static str },
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("body must not be empty")]
    EmptyBody,
    #[error("body must be at most {max} characters")]
    BodyTooLong { max: usize },
    #[error("at most {max} tags are allowed")]
    TooManyTags { max: usize },
    #[error("tags must not be empty")]
    EmptyTag,
    #[error("tags must be at most {max} characters")]
    TagTooLong { max: usize },
}

impl ContentValidationError {
    /// Request field the failure relates to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "id",
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyBody | Self::BodyTooLong { .. } => "body",
            Self::TooManyTags { .. } | Self::EmptyTag | Self::TagTooLong { .. } => "tags",
        }
    }

    /// Stable machine-readable reason.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "invalid_id",
            Self::EmptyTitle | Self::EmptyBody | Self::EmptyTag => "empty",
            Self::TitleTooLong { .. } | Self::BodyTooLong { .. } | Self::TagTooLong { .. } => {
                "too_long"
            }
            Self::TooManyTags { .. } => "too_many",
        }
    }
}

macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from a path segment or stored value.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, ContentValidationError> {
                Uuid::parse_str(raw.as_ref())
                    .map(Self)
                    .map_err(|_| ContentValidationError::InvalidId { entity: $entity })
            }

            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

content_id!(
    /// Stable question identifier.
    QuestionId,
    "question"
);
content_id!(
    /// Stable answer identifier.
    AnswerId,
    "answer"
);
content_id!(
    /// Stable comment identifier.
    CommentId,
    "comment"
);

/// Question title, trimmed and bounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(raw: &str) -> Result<Self, ContentValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContentValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(ContentValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Body text shared by questions, answers and comments.
///
/// Leading and trailing whitespace is preserved; only blank bodies are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    pub fn new(raw: &str) -> Result<Self, ContentValidationError> {
        if raw.trim().is_empty() {
            return Err(ContentValidationError::EmptyBody);
        }
        if raw.chars().count() > BODY_MAX {
            return Err(ContentValidationError::BodyTooLong { max: BODY_MAX });
        }
        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Normalised tag collection.
///
/// # Examples
/// ```
/// use backend::domain::TagSet;
///
/// let tags = TagSet::new(&[" Rust ".into(), "rust".into(), "async".into()]).unwrap();
/// assert_eq!(tags.as_slice(), ["rust".to_owned(), "async".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Trim, lower-case and de-duplicate tags, keeping first occurrences.
    pub fn new(raw: &[String]) -> Result<Self, ContentValidationError> {
        let mut tags: Vec<String> = Vec::with_capacity(raw.len());
        for tag in raw {
            let normalised = tag.trim().to_lowercase();
            if normalised.is_empty() {
                return Err(ContentValidationError::EmptyTag);
            }
            if normalised.chars().count() > TAG_MAX {
                return Err(ContentValidationError::TagTooLong { max: TAG_MAX });
            }
            if !tags.contains(&normalised) {
                tags.push(normalised);
            }
        }
        if tags.len() > TAGS_MAX {
            return Err(ContentValidationError::TooManyTags { max: TAGS_MAX });
        }
        Ok(Self(tags))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Case-insensitive title substring filter for question listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleFilter(String);

impl TitleFilter {
    /// Build a filter from an optional query value; blank input means no filter.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `title` contains the filter, ignoring case.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.0.to_lowercase())
    }
}

/// Validated input for a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub title: PostTitle,
    pub body: PostBody,
    pub tags: TagSet,
}

impl QuestionDraft {
    pub fn try_from_parts(
        title: &str,
        body: &str,
        tags: Option<&[String]>,
    ) -> Result<Self, ContentValidationError> {
        Ok(Self {
            title: PostTitle::new(title)?,
            body: PostBody::new(body)?,
            tags: tags.map(TagSet::new).transpose()?.unwrap_or_default(),
        })
    }
}

/// A question and its ordered answer references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub body: String,
    pub author: UserId,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub answers: Vec<AnswerId>,
}

impl Question {
    /// Fresh question with zero votes and no answers.
    #[must_use]
    pub fn create(author: UserId, draft: QuestionDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: QuestionId::random(),
            title: draft.title.into_inner(),
            body: draft.body.into_inner(),
            author,
            votes: 0,
            created_at,
            tags: draft.tags.into_inner(),
            answers: Vec::new(),
        }
    }
}

/// An answer to a question and its ordered comment references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: AnswerId,
    pub question: QuestionId,
    pub body: String,
    pub author: UserId,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentId>,
}

impl Answer {
    #[must_use]
    pub fn create(
        question: QuestionId,
        author: UserId,
        body: PostBody,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AnswerId::random(),
            question,
            body: body.into_inner(),
            author,
            votes: 0,
            created_at,
            comments: Vec::new(),
        }
    }
}

/// Leaf comment attached to an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub answer: AnswerId,
    pub body: String,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    #[must_use]
    pub fn create(
        answer: AnswerId,
        author: UserId,
        body: PostBody,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::random(),
            answer,
            body: body.into_inner(),
            author,
            created_at,
        }
    }
}

/// A question together with every answer that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionThread {
    pub question: Question,
    pub answers: Vec<Answer>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|tag| (*tag).to_owned()).collect()
    }

    #[rstest]
    fn ids_reject_non_uuid_input() {
        let err = AnswerId::new("42").expect_err("must fail");
        assert_eq!(err, ContentValidationError::InvalidId { entity: "answer" });
        assert_eq!(err.field(), "id");
    }

    #[rstest]
    #[case("   ".to_owned(), ContentValidationError::EmptyTitle)]
    #[case("t".repeat(TITLE_MAX + 1), ContentValidationError::TitleTooLong { max: TITLE_MAX })]
    fn invalid_titles(#[case] raw: String, #[case] expected: ContentValidationError) {
        assert_eq!(PostTitle::new(&raw).expect_err("must fail"), expected);
    }

    #[rstest]
    fn title_is_trimmed() {
        let title = PostTitle::new("  How do lifetimes work?  ").expect("valid");
        assert_eq!(title.into_inner(), "How do lifetimes work?");
    }

    #[rstest]
    fn blank_body_is_rejected() {
        let err = PostBody::new(" \n\t ").expect_err("must fail");
        assert_eq!(err.code(), "empty");
        assert_eq!(err.field(), "body");
    }

    #[rstest]
    fn oversized_body_is_rejected() {
        let raw = "b".repeat(BODY_MAX + 1);
        let err = PostBody::new(&raw).expect_err("must fail");
        assert_eq!(err, ContentValidationError::BodyTooLong { max: BODY_MAX });
    }

    #[rstest]
    #[case(tags(&["a", "b", "c", "d", "e", "f"]), ContentValidationError::TooManyTags { max: TAGS_MAX })]
    #[case(tags(&["ok", "  "]), ContentValidationError::EmptyTag)]
    #[case(tags(&["abcdefghijklmnopqrstuvwxyz0123456"]), ContentValidationError::TagTooLong { max: TAG_MAX })]
    fn invalid_tags(#[case] raw: Vec<String>, #[case] expected: ContentValidationError) {
        assert_eq!(TagSet::new(&raw).expect_err("must fail"), expected);
    }

    #[rstest]
    fn duplicate_tags_collapse_before_counting() {
        let raw = tags(&["a", "A", "b", "c", "d", "e", " e "]);
        let set = TagSet::new(&raw).expect("duplicates do not count");
        assert_eq!(set.as_slice().len(), 5);
    }

    #[rstest]
    fn draft_without_tags_is_empty() {
        let draft = QuestionDraft::try_from_parts("Title", "Body", None).expect("valid");
        assert!(draft.tags.as_slice().is_empty());
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("   "), None)]
    #[case(Some(" Rust "), Some("Rust"))]
    fn title_filter_parsing(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let parsed = TitleFilter::parse(raw);
        assert_eq!(parsed.as_ref().map(TitleFilter::as_str), expected);
    }

    #[rstest]
    #[case("Borrowing in RUST", true)]
    #[case("rusty nails", true)]
    #[case("Go channels", false)]
    fn title_filter_ignores_case(#[case] title: &str, #[case] expected: bool) {
        let filter = TitleFilter::parse(Some("rust")).expect("non-blank");
        assert_eq!(filter.matches(title), expected);
    }

    #[rstest]
    fn new_question_starts_empty() {
        let draft = QuestionDraft::try_from_parts("Title", "Body", None).expect("valid");
        let question = Question::create(UserId::random(), draft, Utc::now());
        assert_eq!(question.votes, 0);
        assert!(question.answers.is_empty());
    }
}
