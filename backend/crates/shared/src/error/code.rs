//! Error Code - machine readable codes sent on the wire
//!
//! Every error envelope carries exactly one of these strings in its
//! `error` field. The set is closed: clients switch on these values.

use serde::Serialize;

/// ワイヤ上のエラーコード
///
/// `SCREAMING_SNAKE_CASE` でシリアライズされ、文字列はクライアントとの契約です。
///
/// ## Examples
/// ```rust
/// use kernel::error::code::ErrorCode;
///
/// assert_eq!(ErrorCode::NoSuchPost.as_str(), "NO_SUCH_POST");
/// assert_eq!(serde_json::to_string(&ErrorCode::BadBody).unwrap(), "\"BAD_BODY\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Common
    TechnicalError,
    BadBody,
    NoPermissions,
    InvalidRequest,

    // Posts
    InvalidTitle,
    InvalidSnippet,
    InvalidContent,
    InvalidMetadata,
    NoSuchPost,
    InvalidPostsRange,

    // Comments
    NoSuchComment,
    InvalidCommentContent,

    // Tags
    TagAlreadyExists,

    // Users
    WrongCredentials,
    InvalidEmail,
    InvalidLogin,
    InvalidPassword,
    UserAlreadyRegistered,
    IncompleteCredentials,
    InvalidFingerprint,
    InvalidToken,
}

impl ErrorCode {
    /// ワイヤ上の文字列表現
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TechnicalError => "TECHNICAL_ERROR",
            ErrorCode::BadBody => "BAD_BODY",
            ErrorCode::NoPermissions => "NO_PERMISSIONS",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::InvalidTitle => "INVALID_TITLE",
            ErrorCode::InvalidSnippet => "INVALID_SNIPPET",
            ErrorCode::InvalidContent => "INVALID_CONTENT",
            ErrorCode::InvalidMetadata => "INVALID_METADATA",
            ErrorCode::NoSuchPost => "NO_SUCH_POST",
            ErrorCode::InvalidPostsRange => "INVALID_POSTS_RANGE",
            ErrorCode::NoSuchComment => "NO_SUCH_COMMENT",
            ErrorCode::InvalidCommentContent => "INVALID_COMMENT_CONTENT",
            ErrorCode::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            ErrorCode::WrongCredentials => "WRONG_CREDENTIALS",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidLogin => "INVALID_LOGIN",
            ErrorCode::InvalidPassword => "INVALID_PASSWORD",
            ErrorCode::UserAlreadyRegistered => "USER_ALREADY_REGISTERED",
            ErrorCode::IncompleteCredentials => "INCOMPLETE_CREDENTIALS",
            ErrorCode::InvalidFingerprint => "INVALID_FINGERPRINT",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_matches_as_str() {
        let all = [
            ErrorCode::TechnicalError,
            ErrorCode::BadBody,
            ErrorCode::NoPermissions,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidTitle,
            ErrorCode::InvalidSnippet,
            ErrorCode::InvalidContent,
            ErrorCode::InvalidMetadata,
            ErrorCode::NoSuchPost,
            ErrorCode::InvalidPostsRange,
            ErrorCode::NoSuchComment,
            ErrorCode::InvalidCommentContent,
            ErrorCode::TagAlreadyExists,
            ErrorCode::WrongCredentials,
            ErrorCode::InvalidEmail,
            ErrorCode::InvalidLogin,
            ErrorCode::InvalidPassword,
            ErrorCode::UserAlreadyRegistered,
            ErrorCode::IncompleteCredentials,
            ErrorCode::InvalidFingerprint,
            ErrorCode::InvalidToken,
        ];

        for code in all {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::InvalidLogin.to_string(), "INVALID_LOGIN");
        assert_eq!(
            ErrorCode::InvalidCommentContent.to_string(),
            "INVALID_COMMENT_CONTENT"
        );
    }
}
