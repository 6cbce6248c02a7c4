use std::borrow::Cow;

use crate::renderer::Dialect;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Feature: {feature} is not supported by dialect: {dialect}")]
    UnsupportedFeature {
        feature: Cow<'static, str>,
        dialect: Dialect,
    },

    #[error("Construct: {construct} has no syntax in dialect: {dialect}")]
    UnsupportedConstruct {
        construct: Cow<'static, str>,
        dialect: Dialect,
    },

    #[error("Malformed {node} node: missing required field `{field}`")]
    MalformedNode {
        node: &'static str,
        field: &'static str,
    },

    #[error("Unknown database dialect: {name}")]
    UnknownDialect { name: String },

    #[error("Invalid AST json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[inline]
    pub(crate) fn malformed(node: &'static str, field: &'static str) -> Self {
        Error::MalformedNode { node, field }
    }
}
