pub type NavResult<T> = Result<T, NavError>;

#[derive(thiserror::Error, Debug)]
pub enum NavError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("navigation host name must not be empty or whitespace")]
    HostNameEmpty,
    #[error("no navigation host registered under {name:?}")]
    UnknownHost { name: String },
    #[error("navigation host {name:?} was used before setup")]
    HostNotReady { name: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::io::Error> for NavError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl NavError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn unknown_host(name: impl Into<String>) -> Self {
        Self::UnknownHost { name: name.into() }
    }

    pub fn host_not_ready(name: impl Into<String>) -> Self {
        Self::HostNotReady { name: name.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::NavError;

    #[test]
    fn unknown_host_error_carries_host_name() {
        let err = NavError::unknown_host("sidebar");
        assert!(matches!(err, NavError::UnknownHost { ref name } if name == "sidebar"));
        assert_eq!(
            err.to_string(),
            "no navigation host registered under \"sidebar\""
        );
    }
}
