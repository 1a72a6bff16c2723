use crate::events::AttributeKind;
use thiserror::Error;

#[derive(Error, Clone, PartialEq, Default, Debug)]
pub enum ParserError {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid integer literal '{0}'")]
    InvalidInteger(String),
    #[error("invalid float literal '{0}'")]
    InvalidFloat(String),
    #[error("expression refers to non-existing attribute '{0}'")]
    NonExistingAttribute(String),
    #[error("{name:?}: mismatching types => expected: {expected:?}, found: {actual}")]
    MismatchingTypes {
        name: String,
        expected: AttributeKind,
        actual: String,
    },
    #[error("no more room for string '{value}' in the domain of attribute '{name}'")]
    StringOutOfBounds { name: String, value: String },
    #[error("unknown frequency cap type '{0}'")]
    InvalidFrequencyKind(String),
}
