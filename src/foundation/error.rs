use std::path::PathBuf;

pub type BenchfigResult<T> = Result<T, BenchfigError>;

/// Why a required series could not be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyReason {
    /// Key missing or `null`.
    Absent,
    /// Present with zero samples.
    Empty,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => f.write_str("absent"),
            Self::Empty => f.write_str("empty"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BenchfigError {
    #[error("missing input file '{}'", .path.display())]
    MissingInputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input '{}'", .path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no data found: series '{series}' is {reason}")]
    EmptyDataset {
        series: &'static str,
        reason: EmptyReason,
    },

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BenchfigError {
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn empty(series: &'static str, reason: EmptyReason) -> Self {
        Self::EmptyDataset { series, reason }
    }
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for BenchfigError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Self::Render(format!("chart backend: {err}"))
    }
}
