use std::collections::HashMap;
use std::process::ExitCode;

use clap::Command;
use colored::Colorize;

pub mod cmd;
pub mod helpers;

#[tokio::main]
async fn main() -> ExitCode {
    libdataloom::util::logging::init_logging();

    let cmds: Vec<Box<dyn cmd::RunCmd>> = vec![
        Box::new(cmd::CheckpointsCmd),
        Box::new(cmd::ConfigCmd),
        Box::new(cmd::ExportCmd),
        Box::new(cmd::LogCmd),
        Box::new(cmd::ProfileCmd),
        Box::new(cmd::RecentCmd),
        Box::new(cmd::RevertCmd),
        Box::new(cmd::SaveCmd),
        Box::new(cmd::ShowCmd),
        Box::new(cmd::TransformCmd),
        Box::new(cmd::UndoCmd),
    ];

    let mut command = Command::new("dataloom")
        .version(libdataloom::constants::DATALOOM_VERSION)
        .about("Edit, version and export DataLoom projects from the command line")
        .subcommand_required(true)
        .arg_required_else_help(true);

    // Add all the commands to the command line
    let mut runners: HashMap<String, Box<dyn cmd::RunCmd>> = HashMap::new();
    for cmd in cmds {
        command = command.subcommand(cmd.args());
        runners.insert(cmd.name().to_string(), cmd);
    }

    let matches = command.get_matches();
    match matches.subcommand() {
        Some((command, args)) => {
            if let Some(runner) = runners.get(command) {
                match runner.run(args).await {
                    Ok(_) => {}
                    Err(err) => {
                        log::debug!("dataloom {command} failed: {err:?}");
                        eprintln!("{}", err.user_message().red());
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                eprintln!("Unknown command `dataloom {command}`");
                return ExitCode::FAILURE;
            }
        }
        None => unreachable!(), // subcommand_required
    }

    ExitCode::SUCCESS
}
