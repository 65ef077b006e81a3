use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use clap::error::ErrorKind;
use modmeta_core::{FieldValue, ModuleFile};
use serde::Serialize;

/// Display and/or modify tracker module metadata (.xm, .mod, .it, .s3m)
#[derive(Parser, Debug)]
#[command(name = "modmeta", version, author)]
struct Cli {
    /// Display metadata
    #[arg(short, long)]
    display: bool,

    /// Print displayed metadata as JSON
    #[arg(short, long, requires = "display")]
    json: bool,

    /// Set title
    #[arg(short = 't', long = "set-title", value_name = "TITLE", conflicts_with = "display")]
    title: Option<String>,

    /// Module file
    #[arg(value_name = "FILENAME")]
    files: Vec<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Display { json: bool },
    SetTitle(String),
    /// No operation requested; the file name is only validated.
    Check,
}

impl Cli {
    fn action(&self) -> Action {
        if self.display {
            Action::Display { json: self.json }
        } else if let Some(title) = &self.title {
            Action::SetTitle(title.clone())
        } else {
            Action::Check
        }
    }

    fn file(&self) -> Result<&PathBuf> {
        match self.files.as_slice() {
            [] => bail!("Need to specify filename"),
            [file] => Ok(file),
            _ => bail!("Only one filename should be specified"),
        }
    }
}

#[derive(Serialize)]
struct FieldReport {
    name: &'static str,
    value: Option<String>,
}

#[derive(Serialize)]
struct MetadataReport {
    file: String,
    format: String,
    fields: Vec<FieldReport>,
}

fn print_metadata(module: &ModuleFile, json: bool) -> Result<()> {
    let fields = module.metadata()?;
    let mut out = io::stdout().lock();

    if json {
        let report = MetadataReport {
            file: module.path().display().to_string(),
            format: module.format().to_string(),
            fields: fields
                .iter()
                .map(|(field, value)| FieldReport {
                    name: field.name(),
                    value: value.is_supported().then(|| value.to_string()),
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    for (field, value) in &fields {
        write!(out, "{field}: ")?;
        match value {
            // Raw bytes go out untouched, padding included.
            FieldValue::Raw(bytes) => out.write_all(bytes)?,
            FieldValue::Unsupported => write!(out, "{value}")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let path = cli.file()?;
    let module = ModuleFile::open(path)?;

    match cli.action() {
        Action::Display { json } => print_metadata(&module, json)?,
        Action::SetTitle(title) => {
            module
                .set_title(&title)
                .with_context(|| format!("{}", path.display()))?;
        }
        Action::Check => log::info!("nothing to do for {}", path.display()),
    }
    Ok(())
}

fn parse_args() -> Result<Option<Cli>> {
    match Cli::try_parse() {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            Ok(None)
        }
        Err(err) => {
            let rendered = err.to_string();
            let line = rendered.lines().next().unwrap_or_default();
            Err(anyhow!("{}", line.trim_start_matches("error: ")))
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let result = parse_args().and_then(|cli| match cli {
        Some(cli) => run(cli),
        None => Ok(()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("modmeta").chain(args.iter().copied()))
    }

    #[test]
    fn test_display_action() {
        let cli = parse(&["-d", "song.xm"]).unwrap();
        assert_eq!(cli.action(), Action::Display { json: false });
        assert_eq!(cli.file().unwrap(), &PathBuf::from("song.xm"));
    }

    #[test]
    fn test_set_title_action() {
        let cli = parse(&["--set-title", "Test Song", "song.mod"]).unwrap();
        assert_eq!(cli.action(), Action::SetTitle("Test Song".into()));
    }

    #[test]
    fn test_no_flags_is_check() {
        let cli = parse(&["song.it"]).unwrap();
        assert_eq!(cli.action(), Action::Check);
    }

    #[test]
    fn test_display_and_set_title_conflict() {
        let err = parse(&["-d", "-t", "x", "song.xm"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_json_requires_display() {
        let err = parse(&["-j", "song.xm"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_file_count() {
        let cli = parse(&["-d"]).unwrap();
        assert_eq!(cli.file().unwrap_err().to_string(), "Need to specify filename");

        let cli = parse(&["-d", "a.xm", "b.xm"]).unwrap();
        assert_eq!(
            cli.file().unwrap_err().to_string(),
            "Only one filename should be specified"
        );
    }
}
