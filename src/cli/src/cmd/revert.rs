use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};
use dialoguer::Confirm;

use libdataloom::error::LoomError;
use libdataloom::model::RecordId;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "revert";
pub struct RevertCmd;

#[async_trait]
impl RunCmd for RevertCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Revert the project to a checkpoint, or to the uploaded data if none is given")
            .arg(helpers::project_arg())
            .arg(
                Arg::new("checkpoint")
                    .help("Checkpoint id, see `dataloom checkpoints`")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("yes")
                    .long("yes")
                    .short('y')
                    .help("Do not ask for confirmation")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let checkpoint_id = args
            .get_one::<String>("checkpoint")
            .map(|id| RecordId::from(id.as_str()));
        let (_store, session) = helpers::open_session(args).await?;
        let history = session.history();

        let target = match &checkpoint_id {
            Some(id) => format!("checkpoint {id}"),
            None => String::from("the original upload"),
        };
        history.request_revert(checkpoint_id);

        if !args.get_flag("yes") {
            match Confirm::new()
                .with_prompt(format!(
                    "Revert {} to {target}? Changes made after it are discarded.",
                    session.project().name
                ))
                .interact()
            {
                Ok(true) => {}
                Ok(false) => {
                    history.cancel_revert();
                    return Ok(());
                }
                Err(e) => {
                    history.cancel_revert();
                    return Err(LoomError::basic_str(format!(
                        "Error confirming revert: {e}"
                    )));
                }
            }
        }

        let result = history.confirm_revert().await;
        helpers::print_notice(session.notice());
        let outcome = result?;
        if let Some(count) = outcome.undoable_count {
            println!("{count} changes can be undone");
        }
        Ok(())
    }
}
