use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use fleetstat_dataset::{params::AnalysisParams, record::Record};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InputOutputArg {
    /// JSON file holding an array of records
    #[arg(long, short)]
    pub input: PathBuf,
    /// Output file path (defaults to stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl InputOutputArg {
    pub fn read_records(&self) -> anyhow::Result<Vec<Record>> {
        read_records_file(&self.input)
    }

    pub fn save_json<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        Output::save_json(value, self.output.clone())
    }
}

#[derive(Debug)]
enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        tracing::debug!(output = %output.display_path(), "wrote report");
        Ok(())
    }

    fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read vehicle records from a JSON file
///
/// The file must hold a JSON array of objects. Individual attributes are not
/// validated here; malformed values are skipped by each analysis.
fn read_records_file<P>(path: P) -> anyhow::Result<Vec<Record>>
where
    P: AsRef<Path>,
{
    let records: Vec<Record> = read_json_file("records", &path)?;
    tracing::info!(
        records = records.len(),
        path = %path.as_ref().display(),
        "loaded records"
    );
    Ok(records)
}

/// Read analysis parameters from a JSON file
pub fn read_params_file<P>(path: P) -> anyhow::Result<AnalysisParams>
where
    P: AsRef<Path>,
{
    read_json_file("analysis parameters", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_file_kind() {
        let path = std::env::temp_dir().join("fleetstat-util-missing-records.json");
        let err = read_records_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open records file"));
    }

    #[test]
    fn test_save_json_writes_pretty_json_and_newline() {
        let path = std::env::temp_dir().join(format!("fleetstat-util-{}.json", std::process::id()));
        let arg = InputOutputArg {
            input: PathBuf::new(),
            output: Some(path.clone()),
        };
        arg.save_json(&serde_json::json!({ "count": 2 })).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, "{\n  \"count\": 2\n}\n");
    }
}
