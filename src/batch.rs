use crate::error::{ConvertError, Result};
use crate::pipeline;
use crate::report::MatchReport;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_OUTPUT_PREFIX: &str = "converted_";

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub output_prefix: String,
    pub pretty: bool,
    /// Worker threads for directory runs; `None` uses rayon's default.
    pub jobs: Option<usize>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            pretty: true,
            jobs: None,
        }
    }
}

#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<MatchReport>,
}

impl FileOutcome {
    pub fn source_name(&self) -> String {
        file_name(&self.input)
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Successfully converted reports paired with their input file name.
    pub fn reports(&self) -> Vec<(String, &MatchReport)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (o.source_name(), r)))
            .collect()
    }
}

/// Converts a single capture file and writes the report to `output`.
///
/// The document is fully serialized before anything touches `output`, so a
/// failed conversion never leaves a file behind.
pub fn convert_file(input: &Path, output: &Path, opts: &ConvertOptions) -> Result<MatchReport> {
    let raw = fs::read(input)?;
    let report = pipeline::convert(&raw)?;

    let serialized = if opts.pretty {
        serde_json::to_vec_pretty(&report)?
    } else {
        serde_json::to_vec(&report)?
    };

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, serialized)?;

    Ok(report)
}

/// Where a single-file conversion should write: inside `output` when it is an
/// existing directory, otherwise `output` itself.
pub fn output_path_for(input: &Path, output: &Path, opts: &ConvertOptions) -> PathBuf {
    if output.is_dir() {
        output.join(prefixed_name(input, opts))
    } else {
        output.to_path_buf()
    }
}

/// Converts every `*.json` file directly inside `input_dir`.
///
/// Per-file failures are recorded in the summary and do not stop the run.
pub fn convert_dir(input_dir: &Path, output_dir: &Path, opts: &ConvertOptions) -> Result<BatchSummary> {
    fs::create_dir_all(output_dir)?;

    let files = collect_json_files(input_dir)?;
    if files.is_empty() {
        return Ok(BatchSummary::default());
    }

    let jobs = opts
        .jobs
        .filter(|jobs| *jobs > 0)
        .unwrap_or_else(rayon::current_num_threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|err| ConvertError::Io(std::io::Error::other(err)))?;

    let outcomes: Vec<FileOutcome> = pool.install(|| {
        files
            .par_iter()
            .map(|input| {
                let output = output_dir.join(prefixed_name(input, opts));
                let result = convert_file(input, &output, opts);
                if let Err(err) = &result {
                    warn!(file = %input.display(), error = %err, "conversion failed");
                }
                FileOutcome {
                    input: input.clone(),
                    output,
                    result,
                }
            })
            .collect()
    });

    let summary = BatchSummary { outcomes };
    info!(
        total = summary.total(),
        succeeded = summary.succeeded(),
        "batch finished"
    );

    Ok(summary)
}

/// `*.json` files directly inside `dir`, sorted by path.
pub fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        let path = entry.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn prefixed_name(input: &Path, opts: &ConvertOptions) -> String {
    format!("{}{}", opts.output_prefix, file_name(input))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_inside_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ConvertOptions::default();
        let input = Path::new("/captures/match_01.json");

        assert_eq!(
            output_path_for(input, dir.path(), &opts),
            dir.path().join("converted_match_01.json")
        );

        let explicit = dir.path().join("out.json");
        assert_eq!(output_path_for(input, &explicit, &opts), explicit);
    }

    #[test]
    fn collects_only_json_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt", "c.JSON"] {
            fs::write(dir.path().join(name), b"{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = collect_json_files(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn failed_conversion_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, b"not a capture").unwrap();
        let output = dir.path().join("out.json");

        let err = convert_file(&input, &output, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
        assert!(!output.exists());
    }
}
