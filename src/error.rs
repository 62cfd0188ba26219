//! Error taxonomy for the AMQP client core.
use thiserror::Error;

/// The root error type returned by every fallible operation in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AmqpError {
    /// A reply code sent by the server in a `Connection.Close` or
    /// `Channel.Close`, mapped to its named reply-error variant.
    #[error("server replied with {kind}: {reply_text}")]
    Reply {
        /// The named reply error.
        kind: ReplyErrorKind,
        /// The human-readable text accompanying the reply code.
        reply_text: String,
    },

    /// Framing or codec failure.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The server's offered auth mechanism list did not include ours.
    #[error("no supported authentication mechanism found in {0:?}")]
    NoSupportedMechanism(Vec<String>),

    /// Four consecutive heartbeat-interval read timeouts elapsed without
    /// the server sending anything.
    #[error("connection aborted: server missed heartbeats")]
    ConnectionAborted,

    /// Transport I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed connection parameters (e.g. an unparsable `amqp://` URL).
    #[error("invalid connection parameters: {0}")]
    ConnParams(String),

    /// A `Connection.Close`/`Channel.Close` reply code outside the closed
    /// set of 17 named reply codes this crate recognizes.
    #[error("unrecognized reply code {code}: {reply_text}")]
    UnknownReplyCode { code: u16, reply_text: String },
}

impl AmqpError {
    /// The server-assigned reply code, if this is a [`AmqpError::Reply`] or
    /// an [`AmqpError::UnknownReplyCode`].
    #[must_use]
    pub fn reply_code(&self) -> Option<u16> {
        match self {
            Self::Reply { kind, .. } => Some(kind.code()),
            Self::UnknownReplyCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

/// Framing and codec failures, fatal to the read loop wherever encountered.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProtocolError {
    #[error("input truncated: needed {needed} bytes, had {available}")]
    TruncatedInput { needed: usize, available: usize },

    #[error("unknown field-value tag {0:#04x}")]
    UnknownTag(u8),

    #[error("invalid UTF-8 in string value: {0}")]
    InvalidString(#[from] std::str::Utf8Error),

    #[error("unknown method (class_id={class_id}, method_id={method_id})")]
    UnknownMethod { class_id: u16, method_id: u16 },

    #[error("frame did not end with the 0xCE sentinel")]
    FrameEndError,

    #[error(
        "server does not support AMQP 0-9-1; it proposes version {0}.{1}.{2}"
    )]
    VersionMismatch(u8, u8, u8),

    #[error("residual bytes left over after decoding a bounded field: {0}")]
    TrailingBytes(usize),
}

/// One variant per AMQP reply code surfaced to clients of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplyErrorKind {
    ContentTooLarge,
    NoConsumers,
    ConnectionForced,
    InvalidPath,
    AccessRefused,
    NotFound,
    ResourceLocked,
    PreconditionFailed,
    FrameError,
    SyntaxError,
    CommandInvalid,
    ChannelError,
    UnexpectedFrame,
    ResourceError,
    NotAllowed,
    NotImplemented,
    InternalError,
}

impl ReplyErrorKind {
    /// Maps a reply code received from the server to its named kind.
    ///
    /// # Errors
    /// Returns `None` for reply codes outside the closed set this core knows about.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            311 => Self::ContentTooLarge,
            313 => Self::NoConsumers,
            320 => Self::ConnectionForced,
            402 => Self::InvalidPath,
            403 => Self::AccessRefused,
            404 => Self::NotFound,
            405 => Self::ResourceLocked,
            406 => Self::PreconditionFailed,
            501 => Self::FrameError,
            502 => Self::SyntaxError,
            503 => Self::CommandInvalid,
            504 => Self::ChannelError,
            505 => Self::UnexpectedFrame,
            506 => Self::ResourceError,
            530 => Self::NotAllowed,
            540 => Self::NotImplemented,
            541 => Self::InternalError,
            _ => return None,
        })
    }

    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::ContentTooLarge => 311,
            Self::NoConsumers => 313,
            Self::ConnectionForced => 320,
            Self::InvalidPath => 402,
            Self::AccessRefused => 403,
            Self::NotFound => 404,
            Self::ResourceLocked => 405,
            Self::PreconditionFailed => 406,
            Self::FrameError => 501,
            Self::SyntaxError => 502,
            Self::CommandInvalid => 503,
            Self::ChannelError => 504,
            Self::UnexpectedFrame => 505,
            Self::ResourceError => 506,
            Self::NotAllowed => 530,
            Self::NotImplemented => 540,
            Self::InternalError => 541,
        }
    }
}

impl std::fmt::Display for ReplyErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::ContentTooLarge => "CONTENT_TOO_LARGE",
            Self::NoConsumers => "NO_CONSUMERS",
            Self::ConnectionForced => "CONNECTION_FORCED",
            Self::InvalidPath => "INVALID_PATH",
            Self::AccessRefused => "ACCESS_REFUSED",
            Self::NotFound => "NOT_FOUND",
            Self::ResourceLocked => "RESOURCE_LOCKED",
            Self::PreconditionFailed => "PRECONDITION_FAILED",
            Self::FrameError => "FRAME_ERROR",
            Self::SyntaxError => "SYNTAX_ERROR",
            Self::CommandInvalid => "COMMAND_INVALID",
            Self::ChannelError => "CHANNEL_ERROR",
            Self::UnexpectedFrame => "UNEXPECTED_FRAME",
            Self::ResourceError => "RESOURCE_ERROR",
            Self::NotAllowed => "NOT_ALLOWED",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{name} ({})", self.code())
    }
}

/// Raises the [`AmqpError::Reply`] mapped to `reply_code`, carrying `reply_text`,
/// or [`AmqpError::UnknownReplyCode`] if the code is outside the closed set
/// this crate names.
///
/// # Errors
/// Always returns an error; callers use this at a `Connection.Close`/`Channel.Close` site.
pub fn reply_error(reply_code: u16, reply_text: impl Into<String>) -> AmqpError {
    match ReplyErrorKind::from_code(reply_code) {
        Some(kind) => AmqpError::Reply {
            kind,
            reply_text: reply_text.into(),
        },
        None => AmqpError::UnknownReplyCode {
            code: reply_code,
            reply_text: reply_text.into(),
        },
    }
}

/// Abbreviation of `Result<T, AmqpError>`.
pub type AmqpResult<T> = std::result::Result<T, AmqpError>;
