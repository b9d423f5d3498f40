use async_trait::async_trait;
use clap::{ArgMatches, Command};
use colored::Colorize;
use comfy_table::Table;

use libdataloom::error::LoomError;
use libdataloom::model::undoable_count;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "log";
pub struct LogCmd;

#[async_trait]
impl RunCmd for LogCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("See the transformation log of a project")
            .arg(helpers::project_arg())
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let (_store, session) = helpers::open_session(args).await?;
        let logs = session.history().logs().await?;

        let mut table = Table::new();
        table.set_header(vec!["id", "action", "time", "checkpoint", "applied"]);
        for log in logs.iter() {
            table.add_row(vec![
                log.id.to_string(),
                log.action_type.to_owned(),
                log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                log.checkpoint_id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                log.applied.to_string(),
            ]);
        }
        println!("{table}");
        let count = undoable_count(&logs);
        println!("{}", format!("{count} changes can be undone").yellow());
        Ok(())
    }
}
