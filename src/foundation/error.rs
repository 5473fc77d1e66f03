use crate::foundation::core::StatementId;

pub type GeoResult<T> = Result<T, GeoError>;

#[derive(thiserror::Error, Debug)]
pub enum GeoError {
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("no such command: '{0}'")]
    UnknownFunction(String),

    #[error("Variable '{0}' not defined.\nDefine it before using.")]
    UnknownVariable(String),

    #[error("expression error: {0}")]
    Expression(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("change error: {0}")]
    Change(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("statement {statement}: {source}")]
    Statement {
        statement: StatementId,
        source: Box<GeoError>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeoError {
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction(name.into())
    }

    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable(name.into())
    }

    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    pub fn change(msg: impl Into<String>) -> Self {
        Self::Change(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attribute this error to a statement. Already attributed errors keep their original id.
    pub fn at_statement(self, statement: StatementId) -> Self {
        match self {
            Self::Statement { .. } => self,
            other => Self::Statement {
                statement,
                source: Box::new(other),
            },
        }
    }

    /// The statement this error was raised for, if it has been attributed.
    pub fn statement(&self) -> Option<StatementId> {
        match self {
            Self::Statement { statement, .. } => Some(*statement),
            _ => None,
        }
    }

    /// Owned form of [`GeoError::root`].
    pub fn into_root(self) -> GeoError {
        match self {
            Self::Statement { source, .. } => source.into_root(),
            other => other,
        }
    }

    /// The error with any statement attribution stripped.
    pub fn root(&self) -> &GeoError {
        match self {
            Self::Statement { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
