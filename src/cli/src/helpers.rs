use std::sync::Arc;

use clap::{Arg, ArgMatches};
use colored::Colorize;
use comfy_table::Table;

use libdataloom::config::ClientConfig;
use libdataloom::core::session::Session;
use libdataloom::core::session_store::SessionStore;
use libdataloom::error::LoomError;
use libdataloom::model::{Notice, NoticeLevel, RecordId};

pub const PROJECT_ARG: &str = "project";
pub const PAGE_ARG: &str = "page";
pub const PAGE_SIZE_ARG: &str = "page-size";
pub const ORDER_ARG: &str = "order";

pub fn project_arg() -> Arg {
    Arg::new(PROJECT_ARG)
        .help("Id of the project")
        .required(true)
        .action(clap::ArgAction::Set)
}

/// `--page`, `--page-size` and `--order`, shared by commands that show the table
pub fn view_args() -> Vec<Arg> {
    vec![
        Arg::new(PAGE_ARG)
            .long(PAGE_ARG)
            .short('p')
            .help("Page to show, starting at 1")
            .value_parser(clap::value_parser!(usize))
            .action(clap::ArgAction::Set),
        Arg::new(PAGE_SIZE_ARG)
            .long(PAGE_SIZE_ARG)
            .help("Rows per page: 10, 25, 50 or 100")
            .value_parser(clap::value_parser!(usize))
            .action(clap::ArgAction::Set),
        Arg::new(ORDER_ARG)
            .long(ORDER_ARG)
            .help("Display order of the columns as backend indices, e.g. 2,0,1")
            .action(clap::ArgAction::Set),
    ]
}

pub fn project_id(args: &ArgMatches) -> Result<RecordId, LoomError> {
    match args.get_one::<String>(PROJECT_ARG) {
        Some(id) => Ok(RecordId::from(id.as_str())),
        None => Err(LoomError::required_field("Project id")),
    }
}

pub fn parse_order(order: &str) -> Result<Vec<usize>, LoomError> {
    order
        .split(',')
        .map(|i| {
            i.trim()
                .parse::<usize>()
                .map_err(|_| LoomError::validation(format!("Invalid column index '{i}' in --order")))
        })
        .collect()
}

pub fn store() -> Result<SessionStore, LoomError> {
    let config = ClientConfig::get()?;
    SessionStore::from_config(&config)
}

/// Open the project named on the command line and apply the view args
pub async fn open_session(args: &ArgMatches) -> Result<(SessionStore, Arc<Session>), LoomError> {
    let mut store = store()?;
    let session = store.open(&project_id(args)?).await?;

    if let Ok(Some(order)) = args.try_get_one::<String>(ORDER_ARG) {
        session.set_column_order(parse_order(order)?)?;
    }
    if let Ok(Some(page_size)) = args.try_get_one::<usize>(PAGE_SIZE_ARG) {
        session.set_page_size(*page_size).await?;
    }
    if let Ok(Some(page)) = args.try_get_one::<usize>(PAGE_ARG) {
        if session.go_to_page(*page).await?.is_none() {
            let pages = session.pagination().total_pages();
            return Err(LoomError::validation(format!(
                "Page {page} does not exist, the project has {pages} pages"
            )));
        }
    }
    Ok((store, session))
}

fn cell_to_string(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.to_owned(),
        other => other.to_string(),
    }
}

pub fn print_table(session: &Session) {
    let mut table = Table::new();
    table.set_header(session.display_columns());
    for row in session.display_rows() {
        let mut cells = vec![row.serial.to_string()];
        cells.extend(row.cells.iter().map(cell_to_string));
        table.add_row(cells);
    }
    println!("{table}");

    let pagination = session.pagination();
    println!(
        "page {} of {} ({} rows, {} per page)",
        pagination.page(),
        pagination.total_pages(),
        pagination.total_rows(),
        pagination.page_size()
    );
}

pub fn print_notice(notice: Option<Notice>) {
    if let Some(notice) = notice {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message.green()),
            NoticeLevel::Info => println!("{}", notice.message.yellow()),
            NoticeLevel::Error => eprintln!("{}", notice.message.red()),
        }
    }
}
