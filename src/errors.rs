//! Error types for decoding, chain access and pool data fetches.

use std::fmt;

use thiserror::Error;

/// Errors raised while decoding an ABI return payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload ended before the required word.
    #[error("payload too short: expected at least {expected} bytes, got {actual}")]
    ShortPayload { expected: usize, actual: usize },
    /// A dynamic value declares more bytes than the payload carries.
    #[error("declared length {declared} exceeds the {available} bytes available")]
    LengthOverflow { declared: String, available: usize },
    /// A string payload is not valid UTF-8.
    #[error("string payload is not valid utf-8")]
    InvalidUtf8,
    /// A word does not fit the narrower type the method returns.
    #[error("value {value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },
}

/// Failure reported by a [`ChainClient`](crate::client::ChainClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetworkError {
    message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The logical remote call an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchCall {
    Reserves,
    Token0,
    Token1,
    Symbol,
    Decimals,
    BlockNumber,
    Token0Metadata,
    Token1Metadata,
}

impl fmt::Display for FetchCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reserves => "getReserves()",
            Self::Token0 => "token0()",
            Self::Token1 => "token1()",
            Self::Symbol => "symbol()",
            Self::Decimals => "decimals()",
            Self::BlockNumber => "blockNumber",
            Self::Token0Metadata => "token0 metadata",
            Self::Token1Metadata => "token1 metadata",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a [`GatewayError`], used by callers that map
/// failures onto response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    Network,
    Decode,
    Timeout,
    Cancelled,
}

/// Errors returned by a pool data fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("deadline exceeded while sub-calls were outstanding")]
    Timeout,
    #[error("fetch cancelled by caller")]
    Cancelled,
    /// First failure among a group of concurrent sibling calls.
    #[error("{call} failed: {source}")]
    Fetch {
        call: FetchCall,
        #[source]
        source: Box<GatewayError>,
    },
}

impl GatewayError {
    /// Tags `self` with the call it came from.
    pub fn during(self, call: FetchCall) -> Self {
        Self::Fetch {
            call,
            source: Box::new(self),
        }
    }

    /// Kind of the innermost error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Network(_) => ErrorKind::Network,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Timeout => ErrorKind::Timeout,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Fetch { source, .. } => source.kind(),
        }
    }

    /// Outermost call identity, if the error came from a remote call.
    pub fn failed_call(&self) -> Option<FetchCall> {
        match self {
            Self::Fetch { call, .. } => Some(*call),
            _ => None,
        }
    }

    /// Every call identity from outermost to innermost.
    pub fn call_path(&self) -> Vec<FetchCall> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Fetch { call, source } = current {
            path.push(*call);
            current = source;
        }
        path
    }
}
