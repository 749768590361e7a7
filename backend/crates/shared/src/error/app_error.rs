//! Application Error - Unified error type for the HTTP boundary
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::code::ErrorCode;
use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// HTTP 境界で使用する標準エラー型です。
/// `kind` がステータスコードを、`code` がエンベロープの `error` フィールドを決めます。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `code` - ワイヤ上のエラーコード
/// * `message` - ログ用の説明（レスポンスには含めない）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
///
/// let err = AppError::not_found(ErrorCode::NoSuchPost);
/// assert_eq!(err.status_code(), 404);
///
/// let err = AppError::new(ErrorKind::BadRequest, ErrorCode::NoSuchPost)
///     .with_message("Post to update does not exist");
/// assert_eq!(err.code(), ErrorCode::NoSuchPost);
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ワイヤ上のエラーコード
    code: ErrorCode,
    /// ログ用メッセージ
    message: Cow<'static, str>,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// メッセージはエラーコードの文字列で初期化されます。
    #[inline]
    pub fn new(kind: ErrorKind, code: ErrorCode) -> Self {
        Self {
            kind,
            code,
            message: Cow::Borrowed(code.as_str()),
            source: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 400 Bad Request エラー
    #[inline]
    pub fn bad_request(code: ErrorCode) -> Self {
        Self::new(ErrorKind::BadRequest, code)
    }

    /// 401 Unauthorized エラー
    #[inline]
    pub fn unauthorized(code: ErrorCode) -> Self {
        Self::new(ErrorKind::Unauthorized, code)
    }

    /// 403 Forbidden エラー
    #[inline]
    pub fn forbidden(code: ErrorCode) -> Self {
        Self::new(ErrorKind::Forbidden, code)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(code: ErrorCode) -> Self {
        Self::new(ErrorKind::NotFound, code)
    }

    /// 500 Internal Server Error
    ///
    /// ワイヤ上のコードは常に `TECHNICAL_ERROR` です。
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, ErrorCode::TechnicalError).with_message(message)
    }

    /// 503 Service Unavailable エラー
    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, ErrorCode::TechnicalError).with_message(message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// ログ用メッセージを設定
    #[inline]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::app_error::AppError;
    ///
    /// let io_err = std::io::Error::other("connection reset");
    /// let err = AppError::internal("Store failure").with_source(io_err);
    /// assert!(std::error::Error::source(&err).is_some());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// ワイヤ上のエラーコードを取得
    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("code", &self.code);
        builder.field("message", &self.message);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.code, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}
