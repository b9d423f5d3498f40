use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use comfy_table::Table;

use libdataloom::error::LoomError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "profile";
pub struct ProfileCmd;

#[async_trait]
impl RunCmd for ProfileCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Show a statistical profile of every column in a project")
            .arg(helpers::project_arg())
            .arg(
                Arg::new("json")
                    .long("json")
                    .help("Print the raw profile as json")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let (_store, session) = helpers::open_session(args).await?;
        let profile = session.profile().await?;
        if args.get_flag("json") {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            return Ok(());
        }

        let summary = &profile.summary;
        println!(
            "{} rows, {} columns, {} missing cells, {} duplicate rows, {} bytes in memory",
            summary.row_count,
            summary.column_count,
            summary.missing_count,
            summary.duplicate_row_count,
            summary.memory_usage_bytes
        );

        let mut table = Table::new();
        table.set_header(vec!["column", "dtype", "missing", "unique", "stats"]);
        for column in &profile.columns {
            table.add_row(vec![
                column.name.to_owned(),
                column.dtype.as_str().to_string(),
                format!("{} ({:.1}%)", column.missing_count, column.missing_percentage),
                column.unique_count.to_string(),
                column.stats_summary(),
            ]);
        }
        println!("{table}");
        Ok(())
    }
}
