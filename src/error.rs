use std::path::PathBuf;

/// Errors raised by the pipeline stages.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file parsed but its shape is not what the stage expects.
    #[error("unexpected data in {path}: {detail}")]
    Shape { path: PathBuf, detail: String },

    #[error("cannot form {clusters} clusters from {samples} samples")]
    TooFewSamples { clusters: usize, samples: usize },

    #[error("number of clusters must be at least 1")]
    NoClusters,
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        PipelineError::Json {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn shape(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        PipelineError::Shape {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_samples_display() {
        let err = PipelineError::TooFewSamples {
            clusters: 4,
            samples: 2,
        };
        assert_eq!(err.to_string(), "cannot form 4 clusters from 2 samples");
    }

    #[test]
    fn shape_display_names_the_file() {
        let err = PipelineError::shape("countries.json", "expected a top-level array");
        assert_eq!(
            err.to_string(),
            "unexpected data in countries.json: expected a top-level array"
        );
    }
}
