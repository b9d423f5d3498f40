use clap;
use libdataloom::error::LoomError;

use async_trait::async_trait;

pub mod checkpoints;
pub use checkpoints::CheckpointsCmd;

pub mod config;
pub use config::ConfigCmd;

pub mod export;
pub use export::ExportCmd;

pub mod log;
pub use log::LogCmd;

pub mod profile;
pub use profile::ProfileCmd;

pub mod recent;
pub use recent::RecentCmd;

pub mod revert;
pub use revert::RevertCmd;

pub mod save;
pub use save::SaveCmd;

pub mod show;
pub use show::ShowCmd;

pub mod transform;
pub use transform::TransformCmd;

pub mod undo;
pub use undo::UndoCmd;

#[async_trait]
pub trait RunCmd {
    fn name(&self) -> &str;
    fn args(&self) -> clap::Command;
    async fn run(&self, args: &clap::ArgMatches) -> Result<(), LoomError>;
}
