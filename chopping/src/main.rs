//! # Chopping Main Entry Point
//!
//! Parses command-line arguments, initializes logging and dispatches to the
//! subcommand services.
//!
//! ## Modules
//!
//! - `cli`: Command-line interface parsing and argument handling.
//! - `errors`: Application level errors.
//! - `hop`: Hops a monitor mode interface through a channel list.
//! - `list`: Lists wireless interfaces and what they support.
//! - `services`: Configurations and the `Run` trait shared by the services.

mod cli;
mod errors;
mod hop;
mod list;
mod services;

use std::fs::File;

use cli::*;
use hop::HopService;
use list::ListService;
use log::*;
use services::{FromYaml, HopConfig, Run};
use simplelog::{ColorChoice, CombinedLogger, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use tokio::runtime::Builder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    let Some(subcommand) = &args.subcommand else {
        // Without a command, show how to use the tool and what it could hop.
        print!("{}", usage());
        list::print_wireless_interfaces(&mut std::io::stdout().lock())?;
        std::process::exit(1);
    };

    CombinedLogger::init(vec![
        TermLogger::new(
            args.level,
            simplelog::ConfigBuilder::new().build(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(
            LevelFilter::Error,
            simplelog::ConfigBuilder::new().set_location_level(LevelFilter::Error).build(),
            File::create("chopping.log")?,
        ),
    ])?;
    debug!("Parsed args and initialized CombinedLogger");

    let global_args = args.parse_global_config()?;
    // Every system call the services make is a short blocking ioctl, so one thread is enough.
    let runtime = Builder::new_current_thread().enable_all().build()?;

    match subcommand {
        SubCommandsArgs::Hop(args) => {
            let from_file = match &args.config {
                Some(path) => HopConfig::from_yaml(path.clone())?,
                None => HopConfig::default(),
            };
            runtime.block_on(HopService::new(global_args, args.overlay_subcommand_args(from_file)?).run())?
        }
        SubCommandsArgs::List(_) => runtime.block_on(ListService::new(global_args, ()).run())?,
    }
    Ok(())
}
