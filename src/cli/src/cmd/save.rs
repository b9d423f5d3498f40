use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use libdataloom::error::LoomError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "save";
pub struct SaveCmd;

#[async_trait]
impl RunCmd for SaveCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Save a checkpoint of the project's current state")
            .arg(helpers::project_arg())
            .arg(
                Arg::new("message")
                    .long("message")
                    .short('m')
                    .help("Checkpoint message")
                    .required(true)
                    .action(clap::ArgAction::Set),
            )
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let message = args
            .get_one::<String>("message")
            .ok_or_else(|| LoomError::required_field("Commit message"))?;
        let (_store, session) = helpers::open_session(args).await?;
        let result = session.history().save(message).await;
        helpers::print_notice(session.notice());
        result?;
        Ok(())
    }
}
