//! Input Validators
//!
//! Pure functions over decoded request values. Each reports the first
//! failing field in declaration order. Lengths are counted in characters.

use kernel::error::code::ErrorCode;
use kernel::id::{CommentId, Id, PostId};
use thiserror::Error;

use crate::domain::entity::post::{Metadata, PostDraft};

// ============================================================================
// Limits
// ============================================================================

pub const MIN_TITLE_LEN: usize = 10;
pub const MAX_TITLE_LEN: usize = 120;

pub const MIN_SNIPPET_LEN: usize = 40;
pub const MAX_SNIPPET_LEN: usize = 350;

pub const MIN_DESCRIPTION_LEN: usize = 40;
pub const MAX_DESCRIPTION_LEN: usize = 160;

pub const MAX_KEYWORDS: usize = 4;
pub const MIN_KEYWORD_LEN: usize = 4;
pub const MAX_KEYWORD_LEN: usize = 20;

pub const MIN_COMMENT_LEN: usize = 10;
pub const MAX_COMMENT_LEN: usize = 4096;

pub const MIN_USERNAME_LEN: usize = 6;
pub const MAX_USERNAME_LEN: usize = 36;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 38;

pub const MAX_EMAIL_LEN: usize = 255;

pub const DEFAULT_POSTS_PER_PAGE: i64 = 10;
pub const MAX_POSTS_PER_PAGE: i64 = 40;

// ============================================================================
// Error
// ============================================================================

/// Validation failures, one per rejected field class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid title")]
    InvalidTitle,
    #[error("invalid snippet")]
    InvalidSnippet,
    #[error("invalid content")]
    InvalidContent,
    #[error("invalid metadata")]
    InvalidMetadata,
    #[error("invalid comment content")]
    InvalidCommentContent,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid password")]
    InvalidPassword,
    #[error("incomplete credentials")]
    IncompleteCredentials,
    #[error("invalid request")]
    InvalidRequest,
    #[error("invalid posts range")]
    InvalidPostsRange,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::InvalidTitle => ErrorCode::InvalidTitle,
            ValidationError::InvalidSnippet => ErrorCode::InvalidSnippet,
            ValidationError::InvalidContent => ErrorCode::InvalidContent,
            ValidationError::InvalidMetadata => ErrorCode::InvalidMetadata,
            ValidationError::InvalidCommentContent => ErrorCode::InvalidCommentContent,
            ValidationError::InvalidUsername => ErrorCode::InvalidLogin,
            ValidationError::InvalidEmail => ErrorCode::InvalidEmail,
            ValidationError::InvalidPassword => ErrorCode::InvalidPassword,
            ValidationError::IncompleteCredentials => ErrorCode::IncompleteCredentials,
            ValidationError::InvalidRequest => ErrorCode::InvalidRequest,
            ValidationError::InvalidPostsRange => ErrorCode::InvalidPostsRange,
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

fn trimmed_len_within(value: &str, min: usize, max: usize) -> bool {
    let len = value.trim().chars().count();
    (min..=max).contains(&len)
}

fn check(ok: bool, err: ValidationError) -> ValidationResult {
    if ok { Ok(()) } else { Err(err) }
}

// ============================================================================
// Identifiers and paging
// ============================================================================

/// Non-empty, integer, non-negative
pub fn validate_id<T>(raw: &str) -> Result<Id<T>, ValidationError> {
    Id::parse(raw).map_err(|_| ValidationError::InvalidRequest)
}

/// Validated `page` / `posts-per-page` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub page: i64,
    pub per_page: i64,
}

impl Default for PageRange {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_POSTS_PER_PAGE,
        }
    }
}

impl PageRange {
    /// Absent or empty parameters take their defaults
    pub fn parse(page: Option<&str>, per_page: Option<&str>) -> Result<Self, ValidationError> {
        let mut range = Self::default();

        if let Some(raw) = page.filter(|raw| !raw.is_empty()) {
            range.page = raw
                .parse::<i64>()
                .ok()
                .filter(|page| *page >= 0)
                .ok_or(ValidationError::InvalidPostsRange)?;
        }

        if let Some(raw) = per_page.filter(|raw| !raw.is_empty()) {
            range.per_page = raw
                .parse::<i64>()
                .ok()
                .filter(|n| (0..=MAX_POSTS_PER_PAGE).contains(n))
                .ok_or(ValidationError::InvalidPostsRange)?;
        }

        range.offset()?;
        Ok(range)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> Result<i64, ValidationError> {
        self.page
            .checked_mul(self.per_page)
            .ok_or(ValidationError::InvalidPostsRange)
    }
}

// ============================================================================
// Posts
// ============================================================================

pub fn validate_title(title: &str) -> ValidationResult {
    check(
        trimmed_len_within(title, MIN_TITLE_LEN, MAX_TITLE_LEN),
        ValidationError::InvalidTitle,
    )
}

pub fn validate_snippet(snippet: &str) -> ValidationResult {
    check(
        trimmed_len_within(snippet, MIN_SNIPPET_LEN, MAX_SNIPPET_LEN),
        ValidationError::InvalidSnippet,
    )
}

/// Non-empty; not trimmed
pub fn validate_content(content: &str) -> ValidationResult {
    check(!content.is_empty(), ValidationError::InvalidContent)
}

pub fn validate_metadata(metadata: &Metadata) -> ValidationResult {
    check(
        trimmed_len_within(
            &metadata.description,
            MIN_DESCRIPTION_LEN,
            MAX_DESCRIPTION_LEN,
        ),
        ValidationError::InvalidMetadata,
    )?;
    check(
        metadata.keywords.len() <= MAX_KEYWORDS,
        ValidationError::InvalidMetadata,
    )?;
    check(
        metadata
            .keywords
            .iter()
            .all(|keyword| trimmed_len_within(keyword, MIN_KEYWORD_LEN, MAX_KEYWORD_LEN)),
        ValidationError::InvalidMetadata,
    )
}

// ============================================================================
// Comments
// ============================================================================

pub fn validate_comment_content(content: &str) -> ValidationResult {
    check(
        trimmed_len_within(content, MIN_COMMENT_LEN, MAX_COMMENT_LEN),
        ValidationError::InvalidCommentContent,
    )
}

// ============================================================================
// Users
// ============================================================================

/// Also used for post and comment authors
pub fn validate_username(username: &str) -> ValidationResult {
    check(
        trimmed_len_within(username, MIN_USERNAME_LEN, MAX_USERNAME_LEN),
        ValidationError::InvalidUsername,
    )
}

/// Not trimmed
pub fn validate_password(password: &str) -> ValidationResult {
    let len = password.chars().count();
    check(
        (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len),
        ValidationError::InvalidPassword,
    )
}

/// Exactly one `@`, neither first nor last
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    let len = email.chars().count();
    check(
        (1..=MAX_EMAIL_LEN).contains(&len)
            && email.matches('@').count() == 1
            && !email.starts_with('@')
            && !email.ends_with('@'),
        ValidationError::InvalidEmail,
    )
}

// ============================================================================
// Request-level validators
// ============================================================================

/// Title, metadata, author, snippet, content; first failure wins
pub fn validate_post(draft: &PostDraft) -> ValidationResult {
    validate_title(&draft.title)?;
    validate_metadata(&draft.metadata)?;
    validate_username(&draft.author)?;
    validate_snippet(&draft.snippet)?;
    validate_content(&draft.content)
}

/// Validated identifiers of a new comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTarget {
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
}

pub fn validate_new_comment(
    post_id: &str,
    parent_id: Option<&str>,
    author: &str,
    content: &str,
) -> Result<CommentTarget, ValidationError> {
    let post_id = validate_id(post_id)?;
    let parent_id = parent_id.map(validate_id).transpose()?;
    validate_username(author)?;
    validate_comment_content(content)?;
    Ok(CommentTarget { post_id, parent_id })
}

/// All three fields required, then email, username, password
pub fn validate_registration(username: &str, email: &str, password: &str) -> ValidationResult {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::IncompleteCredentials);
    }
    validate_email(email)?;
    validate_username(username)?;
    validate_password(password)
}

/// How a login request identifies the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginIdentity<'a> {
    Email(&'a str),
    Username(&'a str),
}

/// Email wins when both identifiers are present
pub fn validate_login<'a>(
    username: &'a str,
    email: &'a str,
    password: &str,
) -> Result<LoginIdentity<'a>, ValidationError> {
    if (username.is_empty() && email.is_empty()) || password.is_empty() {
        return Err(ValidationError::IncompleteCredentials);
    }
    let identity = if email.is_empty() {
        validate_username(username)?;
        LoginIdentity::Username(username)
    } else {
        validate_email(email)?;
        LoginIdentity::Email(email)
    };
    validate_password(password)?;
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(description: &str, keywords: &[&str]) -> Metadata {
        Metadata {
            description: description.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn title_boundaries() {
        assert_eq!(validate_title(&"a".repeat(9)), Err(ValidationError::InvalidTitle));
        assert!(validate_title(&"a".repeat(10)).is_ok());
        assert!(validate_title(&"a".repeat(120)).is_ok());
        assert_eq!(validate_title(&"a".repeat(121)), Err(ValidationError::InvalidTitle));
    }

    #[test]
    fn title_is_trimmed_before_counting() {
        let padded = format!("   {}   ", "a".repeat(9));
        assert_eq!(validate_title(&padded), Err(ValidationError::InvalidTitle));
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 10 Cyrillic letters are 20 bytes
        assert!(validate_title("Приветмир!").is_ok());
        assert!(validate_username("пользов").is_ok());
    }

    #[test]
    fn snippet_boundaries() {
        assert!(validate_snippet(&"s".repeat(39)).is_err());
        assert!(validate_snippet(&"s".repeat(40)).is_ok());
        assert!(validate_snippet(&"s".repeat(350)).is_ok());
        assert!(validate_snippet(&"s".repeat(351)).is_err());
    }

    #[test]
    fn content_only_needs_to_be_non_empty() {
        assert_eq!(validate_content(""), Err(ValidationError::InvalidContent));
        assert!(validate_content(" ").is_ok());
        assert!(validate_content("body").is_ok());
    }

    #[test]
    fn metadata_rules() {
        let description = "d".repeat(40);
        assert!(validate_metadata(&metadata(&description, &[])).is_ok());
        assert!(validate_metadata(&metadata(&description, &["Prog", "Rust", "Blog", "Code"])).is_ok());
        assert_eq!(
            validate_metadata(&metadata(&description, &["Prog", "Rust", "Blog", "Code", "More"])),
            Err(ValidationError::InvalidMetadata)
        );
        assert_eq!(
            validate_metadata(&metadata(&description, &["abc"])),
            Err(ValidationError::InvalidMetadata)
        );
        assert_eq!(
            validate_metadata(&metadata(&description, &[&"k".repeat(21)])),
            Err(ValidationError::InvalidMetadata)
        );
        assert_eq!(
            validate_metadata(&metadata(&"d".repeat(39), &["Prog"])),
            Err(ValidationError::InvalidMetadata)
        );
        assert_eq!(
            validate_metadata(&metadata(&"d".repeat(161), &["Prog"])),
            Err(ValidationError::InvalidMetadata)
        );
    }

    #[test]
    fn comment_content_boundaries() {
        assert!(validate_comment_content("aaaaaaaaa").is_err());
        assert!(validate_comment_content("aaaaaaaaaa").is_ok());
        assert!(validate_comment_content(&"a".repeat(4096)).is_ok());
        assert!(validate_comment_content(&"a".repeat(4097)).is_err());
        assert!(validate_comment_content("     aaaaaaaaa     ").is_err());
    }

    #[test]
    fn username_boundaries() {
        assert_eq!(validate_username("abcde"), Err(ValidationError::InvalidUsername));
        assert!(validate_username("abcdef").is_ok());
        assert!(validate_username(&"u".repeat(36)).is_ok());
        assert!(validate_username(&"u".repeat(37)).is_err());
    }

    #[test]
    fn password_is_not_trimmed() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("   1234 ").is_ok());
        assert!(validate_password(&"p".repeat(38)).is_ok());
        assert!(validate_password(&"p".repeat(39)).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("u_admin@x").is_ok());
        assert!(validate_email("  user@example.com ").is_ok());
        assert_eq!(validate_email(""), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("user@"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a@b@c"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("no-at-sign"), Err(ValidationError::InvalidEmail));
        let long = format!("{}@x", "a".repeat(254));
        assert_eq!(validate_email(&long), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn id_validation() {
        let id: Result<PostId, _> = validate_id("12");
        assert_eq!(id, Ok(PostId::new(12)));
        for raw in ["", "x1", "-1", "1.0"] {
            let id: Result<CommentId, _> = validate_id(raw);
            assert_eq!(id, Err(ValidationError::InvalidRequest), "{raw:?}");
        }
    }

    #[test]
    fn page_range_defaults() {
        assert_eq!(PageRange::parse(None, None).unwrap(), PageRange::default());
        assert_eq!(PageRange::parse(Some(""), Some("")).unwrap(), PageRange::default());
        assert_eq!(PageRange::default().per_page, 10);
    }

    #[test]
    fn page_range_limits() {
        assert!(PageRange::parse(Some("0"), Some("40")).is_ok());
        assert!(PageRange::parse(Some("0"), Some("0")).is_ok());
        assert_eq!(
            PageRange::parse(Some("0"), Some("41")),
            Err(ValidationError::InvalidPostsRange)
        );
        assert_eq!(
            PageRange::parse(Some("-1"), None),
            Err(ValidationError::InvalidPostsRange)
        );
        assert_eq!(
            PageRange::parse(Some("two"), None),
            Err(ValidationError::InvalidPostsRange)
        );
        assert_eq!(
            PageRange::parse(Some(&i64::MAX.to_string()), Some("40")),
            Err(ValidationError::InvalidPostsRange)
        );
    }

    #[test]
    fn page_range_offset() {
        let range = PageRange::parse(Some("3"), Some("7")).unwrap();
        assert_eq!(range.offset().unwrap(), 21);
        assert_eq!(range.limit(), 7);
    }

    #[test]
    fn username_maps_to_invalid_login_code() {
        assert_eq!(ValidationError::InvalidUsername.code(), ErrorCode::InvalidLogin);
        assert_eq!(
            ValidationError::InvalidCommentContent.code(),
            ErrorCode::InvalidCommentContent
        );
    }

    fn draft() -> PostDraft {
        PostDraft {
            title: "Hello World Post".to_string(),
            author: "u_admin".to_string(),
            snippet: "s".repeat(40),
            content: "body".to_string(),
            metadata: metadata(&"d".repeat(40), &["Prog"]),
            tags: Vec::new(),
        }
    }

    #[test]
    fn post_reports_first_failing_field() {
        assert!(validate_post(&draft()).is_ok());

        let mut bad = draft();
        bad.title = "short".to_string();
        bad.snippet = String::new();
        assert_eq!(validate_post(&bad), Err(ValidationError::InvalidTitle));

        let mut bad = draft();
        bad.author = "abc".to_string();
        bad.metadata.description = String::new();
        assert_eq!(validate_post(&bad), Err(ValidationError::InvalidMetadata));

        let mut bad = draft();
        bad.content = String::new();
        bad.metadata.keywords = vec!["x".to_string()];
        assert_eq!(validate_post(&bad), Err(ValidationError::InvalidMetadata));

        let mut bad = draft();
        bad.author = "abc".to_string();
        bad.snippet = "short".to_string();
        assert_eq!(validate_post(&bad), Err(ValidationError::InvalidUsername));
    }

    #[test]
    fn post_metadata_checked_before_author_and_snippet() {
        let mut bad = draft();
        bad.author = "abc".to_string();
        bad.snippet = "short".to_string();
        bad.metadata.description = "too short".to_string();
        assert_eq!(validate_post(&bad), Err(ValidationError::InvalidMetadata));

        bad.metadata = draft().metadata;
        bad.author = "u_admin".to_string();
        bad.content = String::new();
        assert_eq!(validate_post(&bad), Err(ValidationError::InvalidSnippet));
    }

    #[test]
    fn new_comment_checks_ids_first() {
        let ok = validate_new_comment("1", Some("2"), "u______", "aaaaaaaaaa").unwrap();
        assert_eq!(ok.post_id, PostId::new(1));
        assert_eq!(ok.parent_id, Some(CommentId::new(2)));

        assert_eq!(
            validate_new_comment("", None, "x", "x"),
            Err(ValidationError::InvalidRequest)
        );
        assert_eq!(
            validate_new_comment("1", Some("p"), "x", "x"),
            Err(ValidationError::InvalidRequest)
        );
        assert_eq!(
            validate_new_comment("1", None, "x", "x"),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            validate_new_comment("1", None, "u______", "short"),
            Err(ValidationError::InvalidCommentContent)
        );
    }

    #[test]
    fn registration_order() {
        assert!(validate_registration("u_admin", "u_admin@x", "Pw-12345678").is_ok());
        assert_eq!(
            validate_registration("", "bad", "x"),
            Err(ValidationError::IncompleteCredentials)
        );
        assert_eq!(
            validate_registration("abc", "bad", "x"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("abc", "a@b", "x"),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            validate_registration("abcdef", "a@b", "x"),
            Err(ValidationError::InvalidPassword)
        );
    }

    #[test]
    fn login_prefers_email() {
        assert_eq!(
            validate_login("u_admin", "u_admin@x", "Pw-12345678"),
            Ok(LoginIdentity::Email("u_admin@x"))
        );
        assert_eq!(
            validate_login("u_admin", "", "Pw-12345678"),
            Ok(LoginIdentity::Username("u_admin"))
        );
        assert_eq!(
            validate_login("", "", "Pw-12345678"),
            Err(ValidationError::IncompleteCredentials)
        );
        assert_eq!(
            validate_login("u_admin", "", ""),
            Err(ValidationError::IncompleteCredentials)
        );
        // a bad username is ignored when an email is given
        assert_eq!(
            validate_login("x", "bad", "Pw-12345678"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_login("u_admin", "", "short"),
            Err(ValidationError::InvalidPassword)
        );
    }
}
