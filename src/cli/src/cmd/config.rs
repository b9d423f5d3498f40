use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command};

use libdataloom::config::ClientConfig;
use libdataloom::error::LoomError;

use crate::cmd::RunCmd;

pub const NAME: &str = "config";
pub struct ConfigCmd;

#[async_trait]
impl RunCmd for ConfigCmd {
    fn name(&self) -> &str {
        NAME
    }

    fn args(&self) -> Command {
        Command::new(NAME)
            .about("Sets the client configuration in ~/.config/dataloom/client_config.toml")
            .arg(
                Arg::new("host")
                    .long("host")
                    .help("Host of the transform server, e.g. localhost:8000 or https://loom.example.com")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("auth-token")
                    .long("auth")
                    .short('a')
                    .help("Bearer token sent with every request. Pass an empty string to clear it.")
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("page-size")
                    .long("page-size")
                    .help("Default rows per page: 10, 25, 50 or 100")
                    .value_parser(clap::value_parser!(usize))
                    .action(clap::ArgAction::Set),
            )
            .arg(
                Arg::new("show")
                    .long("show")
                    .help("Print the config in effect, env overrides included")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg_required_else_help(true)
    }

    async fn run(&self, args: &ArgMatches) -> Result<(), LoomError> {
        if args.get_flag("show") {
            let config = ClientConfig::get()?;
            println!("host: {}", config.base_url());
            println!("page size: {}", config.default_page_size);
            println!("timeout: {}s", config.timeout_secs);
            println!(
                "auth token: {}",
                if config.auth_token.is_some() { "set" } else { "not set" }
            );
            return Ok(());
        }

        let config = apply_args(ClientConfig::get_saved()?, args);
        config.save_default()?;
        Ok(())
    }
}

fn apply_args(mut config: ClientConfig, args: &ArgMatches) -> ClientConfig {
    if let Some(host) = args.get_one::<String>("host") {
        config.host = host.to_owned();
    }
    if let Some(token) = args.get_one::<String>("auth-token") {
        config.auth_token = if token.trim().is_empty() {
            None
        } else {
            Some(token.to_owned())
        };
    }
    if let Some(page_size) = args.get_one::<usize>("page-size") {
        config.default_page_size = *page_size;
    }
    config
}
