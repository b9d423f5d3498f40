use async_trait::async_trait;
use clap::{ArgMatches, Command};

use libdataloom::error::LoomError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "show";
pub struct ShowCmd;

#[async_trait]
impl RunCmd for ShowCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Print a page of the project's table")
            .arg(helpers::project_arg())
            .args(helpers::view_args())
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let (_store, session) = helpers::open_session(args).await?;
        helpers::print_table(&session);
        Ok(())
    }
}
