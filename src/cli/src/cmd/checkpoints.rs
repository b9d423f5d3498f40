use async_trait::async_trait;
use clap::{ArgMatches, Command};
use comfy_table::Table;

use libdataloom::error::LoomError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "checkpoints";
pub struct CheckpointsCmd;

#[async_trait]
impl RunCmd for CheckpointsCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("List the saved checkpoints of a project, newest first")
            .arg(helpers::project_arg())
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let (_store, session) = helpers::open_session(args).await?;
        let checkpoints = session.history().checkpoints().await?;
        if checkpoints.is_empty() {
            println!("No checkpoints saved yet");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["id", "message", "created"]);
        for checkpoint in checkpoints {
            table.add_row(vec![
                checkpoint.id.to_string(),
                checkpoint.message,
                checkpoint.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]);
        }
        println!("{table}");
        Ok(())
    }
}
