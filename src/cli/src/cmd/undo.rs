use async_trait::async_trait;
use clap::{ArgMatches, Command};

use libdataloom::core::history::UndoOutcome;
use libdataloom::error::LoomError;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "undo";
pub struct UndoCmd;

#[async_trait]
impl RunCmd for UndoCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Undo the most recent change that is not part of a checkpoint")
            .arg(helpers::project_arg())
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let (_store, session) = helpers::open_session(args).await?;
        let result = session.history().undo().await;
        helpers::print_notice(session.notice());
        if let UndoOutcome::Undone(outcome) = result? {
            if let Some(count) = outcome.undoable_count {
                println!("{count} more changes can be undone");
            }
        }
        Ok(())
    }
}
