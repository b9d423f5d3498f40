use std::path::PathBuf;

use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use colored::Colorize;

use libdataloom::error::LoomError;
use libdataloom::opts::{CsvDelimiter, ExportFormat, ExportOpts, TextEncoding};

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "export";
pub struct ExportCmd;

#[async_trait]
impl RunCmd for ExportCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Download the project's current state as csv or xlsx")
            .arg(helpers::project_arg())
            .arg(
                Arg::new("format")
                    .long("format")
                    .short('f')
                    .value_parser(["csv", "xlsx"])
                    .default_value("csv")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("delimiter")
                    .long("delimiter")
                    .short('d')
                    .help("csv only")
                    .value_parser(["comma", "semicolon", "tab", "pipe"])
                    .default_value("comma")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("encoding")
                    .long("encoding")
                    .short('e')
                    .help("csv only")
                    .value_parser(["utf-8", "latin-1", "utf-16"])
                    .default_value("utf-8")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("no-header")
                    .long("no-header")
                    .help("Leave the header row out of the csv")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .help("Directory to write the file to")
                    .default_value(".")
                    .action(clap::ArgAction::Set),
            )
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let opts = export_opts_from_args(args)?;
        let output = args
            .get_one::<String>("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let (_store, session) = helpers::open_session(args).await?;
        let path = session.export_to(&output, &opts).await?;
        println!("{} {}", "Exported to".green(), path.display());
        Ok(())
    }
}

pub fn export_opts_from_args(args: &ArgMatches) -> Result<ExportOpts, LoomError> {
    let format = match args.get_one::<String>("format").map(String::as_str) {
        None | Some("csv") => ExportFormat::Csv,
        Some("xlsx") => ExportFormat::Xlsx,
        Some(other) => return Err(LoomError::validation(format!("Unknown format '{other}'"))),
    };
    let delimiter = match args.get_one::<String>("delimiter").map(String::as_str) {
        None | Some("comma") => CsvDelimiter::Comma,
        Some("semicolon") => CsvDelimiter::Semicolon,
        Some("tab") => CsvDelimiter::Tab,
        Some("pipe") => CsvDelimiter::Pipe,
        Some(other) => {
            return Err(LoomError::validation(format!("Unknown delimiter '{other}'")))
        }
    };
    let encoding = match args.get_one::<String>("encoding").map(String::as_str) {
        None | Some("utf-8") => TextEncoding::Utf8,
        Some("latin-1") => TextEncoding::Latin1,
        Some("utf-16") => TextEncoding::Utf16,
        Some(other) => return Err(LoomError::validation(format!("Unknown encoding '{other}'"))),
    };
    Ok(ExportOpts {
        format,
        delimiter,
        include_header: !args.get_flag("no-header"),
        encoding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults_to_plain_csv() {
        let args = ExportCmd.args().get_matches_from(["export", "7"]);
        let opts = export_opts_from_args(&args).unwrap();
        assert_eq!(opts, ExportOpts::default());
        assert!(!opts.is_customized_csv());
    }

    #[test]
    fn test_export_custom_csv() {
        let args = ExportCmd.args().get_matches_from([
            "export",
            "7",
            "--delimiter",
            "tab",
            "--no-header",
            "--encoding",
            "latin-1",
        ]);
        let opts = export_opts_from_args(&args).unwrap();
        assert_eq!(opts.delimiter, CsvDelimiter::Tab);
        assert_eq!(opts.encoding, TextEncoding::Latin1);
        assert!(!opts.include_header);
        assert!(opts.is_customized_csv());
    }

    #[test]
    fn test_export_xlsx() {
        let args = ExportCmd.args().get_matches_from(["export", "7", "-f", "xlsx"]);
        let opts = export_opts_from_args(&args).unwrap();
        assert_eq!(opts.format, ExportFormat::Xlsx);
    }
}
