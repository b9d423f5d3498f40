use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use libdataloom::error::LoomError;
use libdataloom::model::Operation;

use crate::cmd::RunCmd;
use crate::helpers;

pub const NAME: &str = "transform";
pub struct TransformCmd;

fn usize_at(values: &[String], i: usize, flag: &str) -> Result<usize, LoomError> {
    match values.get(i).map(|v| v.parse::<usize>()) {
        Some(Ok(n)) => Ok(n),
        _ => Err(LoomError::validation(format!("--{flag} expects an index"))),
    }
}

fn string_at(values: &[String], i: usize, flag: &str) -> Result<String, LoomError> {
    match values.get(i) {
        Some(s) => Ok(s.to_owned()),
        None => Err(LoomError::validation(format!("--{flag} expects a name"))),
    }
}

fn values(args: &ArgMatches, name: &str) -> Option<Vec<String>> {
    args.get_many::<String>(name)
        .map(|values| values.cloned().collect())
}

/// The operation described by the flags. Indices are display indices: columns
/// count from 1 as printed by `show`, rows count from 0 within the page.
pub fn operation_from_args(args: &ArgMatches) -> Result<Operation, LoomError> {
    if let Some(json) = args.get_one::<String>("op") {
        let operation: Operation = serde_json::from_str(json)?;
        return Ok(operation);
    }
    if let Some(v) = values(args, "add-col") {
        return Ok(Operation::add_col(
            usize_at(&v, 0, "add-col")?,
            string_at(&v, 1, "add-col")?,
        ));
    }
    if let Some(v) = values(args, "del-col") {
        return Ok(Operation::del_col(usize_at(&v, 0, "del-col")?));
    }
    if let Some(v) = values(args, "rename-col") {
        return Ok(Operation::rename_col(
            usize_at(&v, 0, "rename-col")?,
            string_at(&v, 1, "rename-col")?,
        ));
    }
    if let Some(v) = values(args, "add-row") {
        return Ok(Operation::add_row(usize_at(&v, 0, "add-row")?));
    }
    if let Some(v) = values(args, "del-row") {
        return Ok(Operation::del_row(usize_at(&v, 0, "del-row")?));
    }
    if let Some(v) = values(args, "set-cell") {
        return Ok(Operation::change_cell(
            usize_at(&v, 0, "set-cell")?,
            usize_at(&v, 1, "set-cell")?,
            string_at(&v, 2, "set-cell")?,
        ));
    }
    if let Some(column) = args.get_one::<String>("sort") {
        return Ok(Operation::sort(column, !args.get_flag("desc")));
    }
    Err(LoomError::validation(
        "Specify an operation, see `dataloom transform --help`",
    ))
}

#[async_trait]
impl RunCmd for TransformCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Apply one transformation and print the resulting page")
            .arg(helpers::project_arg())
            .args(helpers::view_args())
            .arg(
                Arg::new("op")
                    .long("op")
                    .help("Operation as json, e.g. '{\"operation_type\": \"delCol\", \"col_params\": {\"index\": 2}}'")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("add-col")
                    .long("add-col")
                    .num_args(2)
                    .value_names(["COLUMN", "NAME"])
                    .help("Add a column after the displayed column, 0 adds it first")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("del-col")
                    .long("del-col")
                    .value_name("COLUMN")
                    .help("Delete the displayed column")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("rename-col")
                    .long("rename-col")
                    .num_args(2)
                    .value_names(["COLUMN", "NAME"])
                    .help("Rename the displayed column")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("add-row")
                    .long("add-row")
                    .value_name("ROW")
                    .help("Insert an empty row at this row of the page")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("del-row")
                    .long("del-row")
                    .value_name("ROW")
                    .help("Delete this row of the page")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("set-cell")
                    .long("set-cell")
                    .num_args(3)
                    .value_names(["ROW", "COLUMN", "VALUE"])
                    .help("Change one cell")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("sort")
                    .long("sort")
                    .value_name("COLUMN_NAME")
                    .help("Sort by the named column")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("desc")
                    .long("desc")
                    .help("Sort descending")
                    .action(clap::ArgAction::SetTrue),
            )
            .group(
                clap::ArgGroup::new("operation")
                    .args(["op", "add-col", "del-col", "rename-col", "add-row", "del-row", "set-cell", "sort"])
                    .required(true),
            )
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        let operation = operation_from_args(args)?;
        let (_store, session) = helpers::open_session(args).await?;
        let result = session.apply(operation).await;
        helpers::print_notice(session.notice());
        result?;
        helpers::print_table(&session);
        Ok(())
    }
}
