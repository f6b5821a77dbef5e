//! API error handling.
//!
//! We define our own error to use for all fallible resolvers. Besides a
//! message, it contains a coarse "error kind" and a specific "key". Both are
//! exposed as GraphQL error extensions so that clients can react to specific
//! errors without parsing the message.

use juniper::{FieldError, IntoFieldError, ScalarValue, graphql_value};


pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) msg: String,
    pub(crate) kind: ApiErrorKind,
    pub(crate) key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// A record references another record via its project ID, but that
    /// record does not exist.
    MissingJoinTarget,
}

impl ApiErrorKind {
    fn kind_str(&self) -> &str {
        match self {
            Self::MissingJoinTarget => "MISSING_JOIN_TARGET",
        }
    }

    fn message_prefix(&self) -> &str {
        match self {
            Self::MissingJoinTarget => "Missing join target",
        }
    }
}

impl<S: ScalarValue> IntoFieldError<S> for ApiError {
    fn into_field_error(self) -> FieldError<S> {
        let msg = format!("{}: {}", self.kind.message_prefix(), self.msg);
        let ext = graphql_value!({
            "kind": (self.kind.kind_str()),
            "key": (self.key),
        });

        FieldError::new(msg, ext)
    }
}


// ===== Helper macros to easily create errors ==================================================

/// Creates an `ApiError` with a `format!` like syntax. Every error needs a
/// key, so that clients can tell apart errors of the same kind.
macro_rules! api_err {
    ($kind:ident, key = $key:literal, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::api::err::ApiError {
            msg: format!($fmt $(, $arg)*),
            kind: $crate::api::err::ApiErrorKind::$kind,
            key: $key,
        }
    };
}

macro_rules! missing_join_target {
    ($($t:tt)+) => { $crate::api::err::api_err!(MissingJoinTarget, $($t)*) };
}

pub(crate) use api_err;
pub(crate) use missing_join_target;
