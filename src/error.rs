use crate::catalog::Kind;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] TypeError),

    #[error("please supply an api key")]
    MissingApiKey,

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("JSON deserialization error: {0}")]
    JSON(#[from] JSONError),
}

/// A parameter was missing or did not match its declared kind.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{param} must be of type: {kind}")]
pub struct TypeError {
    param: String,
    kind: Kind,
}

impl TypeError {
    pub fn new(param: &str, kind: Kind) -> Self {
        Self {
            param: param.into(),
            kind,
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({url})")]
pub struct JSONError {
    url: String,
    #[source]
    source: serde_json::Error,
}

impl JSONError {
    pub fn new(url: &str, source: serde_json::Error) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({var})")]
pub struct EnvVarError {
    var: String,
    #[source]
    source: std::env::VarError,
}

impl EnvVarError {
    pub fn new(var: &str, source: std::env::VarError) -> Self {
        Self {
            var: var.into(),
            source,
        }
    }
}
