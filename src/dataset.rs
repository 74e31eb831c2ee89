use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::error::{BenchfigError, BenchfigResult, EmptyReason};

pub const CVCP_KEY: &str = "cvcp";
pub const HTTP_KEY: &str = "http";

/// Ordered latency samples for one system under test. Index is capture position.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(min, max)` of the samples, `None` when empty.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut it = self.values.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub cvcp: SampleSeries,
    pub http: SampleSeries,
}

// Both keys are optional at the serde level so that a missing series is reported as
// `EmptyDataset` rather than as a parse failure.
#[derive(serde::Deserialize)]
struct RawDataset {
    #[serde(default)]
    cvcp: Option<Vec<f64>>,
    #[serde(default)]
    http: Option<Vec<f64>>,
}

impl Dataset {
    /// Call only after [`check_present`] accepted `raw`.
    fn from_raw(raw: RawDataset) -> Self {
        Self {
            cvcp: SampleSeries {
                name: CVCP_KEY,
                values: raw.cvcp.unwrap_or_default(),
            },
            http: SampleSeries {
                name: HTTP_KEY,
                values: raw.http.unwrap_or_default(),
            },
        }
    }
}

fn check_present(raw: &RawDataset) -> BenchfigResult<()> {
    for (key, values) in [(CVCP_KEY, &raw.cvcp), (HTTP_KEY, &raw.http)] {
        match values {
            None => return Err(BenchfigError::empty(key, EmptyReason::Absent)),
            Some(v) if v.is_empty() => return Err(BenchfigError::empty(key, EmptyReason::Empty)),
            Some(_) => {}
        }
    }
    Ok(())
}

/// Parse a dataset document already in memory, applying the same checks as [`load_dataset`].
pub fn parse_dataset(src: &str, origin: &Path) -> BenchfigResult<Dataset> {
    let raw: RawDataset =
        serde_json::from_str(src).map_err(|source| BenchfigError::MalformedInput {
            path: origin.to_path_buf(),
            source,
        })?;
    check_present(&raw)?;
    Ok(Dataset::from_raw(raw))
}

/// Load `{"cvcp": [..], "http": [..]}` from `path`.
///
/// Fails with `MissingInputFile` when the file cannot be opened, `MalformedInput` when it is not
/// a mapping of numeric sequences, and `EmptyDataset` when either series is absent or empty.
pub fn load_dataset(path: &Path) -> BenchfigResult<Dataset> {
    let f = File::open(path).map_err(|source| BenchfigError::MissingInputFile {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawDataset = serde_json::from_reader(BufReader::new(f)).map_err(|source| {
        if source.is_io() {
            BenchfigError::MissingInputFile {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            BenchfigError::MalformedInput {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    check_present(&raw)?;

    let ds = Dataset::from_raw(raw);
    tracing::debug!(
        path = %path.display(),
        cvcp = ds.cvcp.len(),
        http = ds.http.len(),
        "loaded dataset"
    );
    Ok(ds)
}
