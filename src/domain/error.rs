use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Failure raised while rendering a component tree.
///
/// A render error never rolls back output: by the time it reaches the caller the
/// sink may already hold a partial prefix of the document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("write to output sink failed: {0}")]
    Io(#[from] io::Error),
    #[error("template rendering failed: {message}")]
    Template { message: String },
    #[error("component `{component}` failed: {source}")]
    Component {
        component: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl RenderError {
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    pub fn component(
        component: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Component {
            component,
            source: source.into(),
        }
    }

    /// Whether the failure came from the output sink rather than from a component.
    pub fn is_sink_failure(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
