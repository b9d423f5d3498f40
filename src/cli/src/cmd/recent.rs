use async_trait::async_trait;
use clap::{ArgMatches, Command};
use comfy_table::Table;

use libdataloom::error::LoomError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "recent";
pub struct RecentCmd;

#[async_trait]
impl RunCmd for RecentCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME).about("List recently modified projects")
    }

    async fn run(&self, _args: &ArgMatches) -> Result<(), LoomError> {
        let store = helpers::store()?;
        let projects = store.recent().await?;
        if projects.is_empty() {
            println!("No projects yet");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["id", "name", "description", "last modified"]);
        for project in projects {
            table.add_row(vec![
                project.project_id.to_string(),
                project.name,
                project.description.unwrap_or_default(),
                project.last_modified.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }
        println!("{table}");
        Ok(())
    }
}
