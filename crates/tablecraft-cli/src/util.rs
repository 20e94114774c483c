//! Report output and JSON input shared by the subcommands.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Serialize, de::DeserializeOwned};

/// Something a subcommand prints: pretty JSON with `--json`, text lines otherwise.
pub trait Report: Serialize {
    fn text_lines(&self) -> Vec<String>;
}

pub fn render_report<R>(report: &R, json: bool) -> anyhow::Result<String>
where
    R: Report,
{
    let mut rendered = if json {
        serde_json::to_string_pretty(report).context("Failed to serialize report")?
    } else {
        report.text_lines().join("\n")
    };
    rendered.push('\n');
    Ok(rendered)
}

/// Writes `report` to `output`, or to stdout when no path is given.
pub fn write_report<R>(report: &R, json: bool, output: Option<&Path>) -> anyhow::Result<()>
where
    R: Report,
{
    let rendered = render_report(report, json)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("Failed to write report to stdout")?,
    }
    Ok(())
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {kind} file {}", path.display())]
    Open {
        kind: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    #[display("failed to parse {kind} file {}", path.display())]
    Parse {
        kind: &'static str,
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads a round or scoring config file.
pub fn load_json<T>(kind: &'static str, path: &Path) -> Result<T, LoadError>
where
    T: DeserializeOwned,
{
    let text = fs::read_to_string(path).map_err(|source| LoadError::Open {
        kind,
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        kind,
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tablecraft_evaluator::coverage::ScoringConfig;

    use super::*;

    #[derive(Serialize)]
    struct Greeting {
        name: &'static str,
    }

    impl Report for Greeting {
        fn text_lines(&self) -> Vec<String> {
            vec![format!("Hello, {}", self.name), "Bye".to_owned()]
        }
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tablecraft-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_render_text_and_json() {
        let report = Greeting { name: "table" };
        assert_eq!(render_report(&report, false).unwrap(), "Hello, table\nBye\n");
        assert_eq!(
            render_report(&report, true).unwrap(),
            "{\n  \"name\": \"table\"\n}\n"
        );
    }

    #[test]
    fn test_write_report_to_file() {
        let path = temp_file("report.txt", "");
        write_report(&Greeting { name: "file" }, false, Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hello, file\nBye\n");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_config() {
        let path = temp_file("config.json", r#"{"excess_penalty_weight": 1.0}"#);
        let config: ScoringConfig = load_json("scoring config", &path).unwrap();
        assert_eq!(config.tolerance, 10);
        assert!((config.excess_penalty_weight - 1.0).abs() < f64::EPSILON);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_errors_are_typed() {
        let missing = std::env::temp_dir().join("tablecraft-does-not-exist.json");
        let err = load_json::<ScoringConfig>("scoring config", &missing).unwrap_err();
        assert!(matches!(err, LoadError::Open { kind: "scoring config", .. }));

        let path = temp_file("broken.json", "{ not json");
        let err = load_json::<ScoringConfig>("round", &path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { kind: "round", .. }));
        assert!(err.to_string().starts_with("failed to parse round file "));
        fs::remove_file(path).unwrap();
    }
}
