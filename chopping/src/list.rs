//! # List Service
//!
//! Prints every wireless interface with its protocol, mode, current channel
//! (monitor mode only) and supported channels.

use std::io::{self, Write};

use lib::interfaces::NetClass;
use lib::survey::{InterfaceReport, survey};
use lib::wireless::WirelessExtensions;
use log::*;

use crate::services::{GlobalConfig, Run};

pub struct ListService {
    global_config: GlobalConfig,
}

impl Run<()> for ListService {
    fn new(global_config: GlobalConfig, _config: ()) -> Self {
        ListService { global_config }
    }

    async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        debug!("Starting list service (log level: {})", self.global_config.log_level);
        print_wireless_interfaces(&mut io::stdout().lock())?;
        Ok(())
    }
}

/// Surveys the host and writes the report to `out`.
pub fn print_wireless_interfaces(out: &mut impl Write) -> io::Result<()> {
    let reports = survey(&WirelessExtensions::new(), &NetClass::default())?;
    write_reports(out, &reports)
}

fn write_reports(out: &mut impl Write, reports: &[InterfaceReport]) -> io::Result<()> {
    writeln!(out, "\nAvailable Wireless Interfaces:")?;
    for report in reports {
        writeln!(out, "{report}")?;
    }
    Ok(())
}
