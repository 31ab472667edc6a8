use std::path::PathBuf;

use argh::FromArgs;
use lib::channels::ChannelList;
use simplelog::LevelFilter;

use crate::errors::AppError;
use crate::services::{GlobalConfig, HopConfig};

pub const PROGRAM_NAME: &str = "chopping";

/// Channel hopping for wireless interfaces in monitor mode
#[derive(FromArgs)]
pub struct Args {
    /// log level to use for terminal logging (default: info)
    #[argh(option, default = "LevelFilter::Info")]
    pub level: LevelFilter,

    #[argh(subcommand)]
    pub subcommand: Option<SubCommandsArgs>,
}

impl Args {
    pub fn parse_global_config(&self) -> Result<GlobalConfig, AppError> {
        Ok(GlobalConfig { log_level: self.level })
    }
}

#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand)]
pub enum SubCommandsArgs {
    Hop(HopSubcommandArgs),
    List(ListSubcommandArgs),
}

/// Hop an interface through a list of channels
#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand, name = "hop")]
pub struct HopSubcommandArgs {
    /// interface to hop; must already be in monitor mode
    #[argh(option, short = 'i')]
    pub interface: Option<String>,

    /// comma separated channel list (default: channels supported by the driver)
    #[argh(option, short = 'c')]
    pub channels: Option<String>,

    /// number of list positions to advance per hop (default: 1)
    #[argh(option, short = 'h')]
    pub hop: Option<usize>,

    /// delay between hops in milliseconds (default: 1000)
    #[argh(option, short = 't')]
    pub timeout: Option<u64>,

    /// YAML file with hop settings; command line options take precedence
    #[argh(option)]
    pub config: Option<PathBuf>,
}

impl HopSubcommandArgs {
    /// Overwrites the fields of `config` that were given on the command line.
    pub fn overlay_subcommand_args(&self, mut config: HopConfig) -> Result<HopConfig, AppError> {
        if let Some(interface) = &self.interface {
            config.interface = Some(interface.clone());
        }
        if let Some(channels) = &self.channels {
            config.channels = Some(ChannelList::parse(channels)?.as_slice().to_vec());
        }
        if let Some(hop) = self.hop {
            config.hop = hop;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_ms = timeout;
        }
        Ok(config)
    }
}

/// List wireless interfaces with their mode and supported channels
#[derive(FromArgs, Debug, PartialEq)]
#[argh(subcommand, name = "list")]
pub struct ListSubcommandArgs {}

/// Top level usage text, as printed for `--help`.
pub fn usage() -> String {
    match Args::from_args(&[PROGRAM_NAME], &["--help"]) {
        Err(early_exit) => early_exit.output,
        Ok(_) => String::new(),
    }
}
