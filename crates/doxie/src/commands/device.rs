//! Device status and restart handlers.

use doxie_api::{DoxieClient, Hello, HelloExtra};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".into(),
        Some(false) => "no".into(),
        None => "-".into(),
    }
}

fn hello_detail(h: &Hello) -> String {
    output::render_detail(&[
        ("Name", opt(h.name.as_deref())),
        ("Model", opt(h.model.as_deref())),
        ("Firmware (Wi-Fi)", opt(h.firmware_wifi.as_deref())),
        ("MAC", opt(h.mac.as_deref())),
        ("Mode", opt(h.mode.as_deref())),
        ("Network", opt(h.network.as_deref())),
        ("IP", opt(h.ip.as_deref())),
        ("Password", yes_no(h.has_password)),
    ])
}

fn hello_extra_detail(h: &HelloExtra) -> String {
    output::render_detail(&[
        ("Firmware", opt(h.firmware.as_deref())),
        ("External power", yes_no(h.connected_to_external_power)),
    ])
}

pub async fn hello(client: &DoxieClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.hello_info().await?;
    let format = global.output.unwrap_or_default();
    let out = output::render_single(format, &info, hello_detail, |h| {
        opt(h.name.as_deref())
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn hello_extra(client: &DoxieClient, global: &GlobalOpts) -> Result<(), CliError> {
    let info = client.hello_extra_info().await?;
    let format = global.output.unwrap_or_default();
    let out = output::render_single(format, &info, hello_extra_detail, |h| {
        opt(h.firmware.as_deref())
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn restart(client: &DoxieClient, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm(&format!("Restart scanner at {}?", client.address()), global.yes)? {
        return Ok(());
    }
    let envelope = client.restart().await?;
    output::print_output(
        &util::render_envelope(global.output.unwrap_or_default(), &envelope),
        global.quiet,
    );
    util::notice(global.quiet, "Restart requested");
    Ok(())
}
