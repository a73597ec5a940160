use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    RequestError(Box<dyn error::Error + Send>),
    UnexpectedStatus(u16),
    JsonError(Box<dyn error::Error + Send>),
    IoError(io::Error),
    InvalidUrl(String),
    Timeout,
    ClipboardError(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestError(err) | Self::JsonError(err) => err.fmt(f),
            Self::UnexpectedStatus(code) => write!(f, "Unexpected response status: {code}"),
            Self::IoError(err) => err.fmt(f),
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::ClipboardError(msg) => write!(f, "Clipboard unavailable: {msg}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::JsonError(Box::new(err))
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Error {
        match err {
            ureq::Error::StatusCode(code) => Error::UnexpectedStatus(code),
            ureq::Error::Timeout(_) => Error::Timeout,
            err => Error::RequestError(Box::new(err)),
        }
    }
}

impl From<arboard::Error> for Error {
    fn from(err: arboard::Error) -> Error {
        Error::ClipboardError(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::InvalidUrl(err.to_string())
    }
}
