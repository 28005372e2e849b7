//! `sysdash network`: connection summary or connected devices.

use bytesize::ByteSize;
use tabled::Tabled;

use sysdash_core::presentation::{DeviceKind, connection_labels, format_speed, signal_quality};
use sysdash_core::{ConnectedDevice, NetworkOverview};

use crate::cli::{GlobalOpts, NetworkArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::Context;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
}

fn device_row(d: &ConnectedDevice) -> DeviceRow {
    DeviceRow {
        name: d.name.clone(),
        kind: DeviceKind::from_name(&d.name).to_string(),
        status: d.status.clone(),
        ip: d.ip_address.clone(),
        mac: d.mac_address.clone(),
    }
}

fn mbps(value: f64) -> String {
    format!("{} Mbps", format_speed(value))
}

fn detail(painter: Painter, overview: &NetworkOverview) -> String {
    let n = &overview.network_data;
    let io = &overview.io_data;
    let (connection, caption) = connection_labels(&n.connection_type);
    let (quality, tone) = signal_quality(n.signal_strength);

    output::detail(
        painter,
        "Network",
        &[
            ("Connection", format!("{connection} ({caption})")),
            (
                "Signal",
                format!("{:.0}% {}", n.signal_strength, painter.tone(quality, tone)),
            ),
            ("Download", mbps(n.download_speed)),
            ("Upload", mbps(n.upload_speed)),
            ("Ping", format!("{} ms", format_speed(n.ping))),
            ("Jitter", format!("{} ms", format_speed(n.jitter))),
            ("Packet Loss", format!("{:.1}%", n.packet_loss)),
            ("Stability", format!("{:.0}%", n.stability)),
            ("IP Address", n.ip_address.clone()),
            ("DNS Server", n.dns_server.clone()),
            ("MAC Address", n.mac_address.clone()),
            (
                "Traffic",
                format!(
                    "↓ {}  ↑ {}",
                    ByteSize::b(io.bytes_received),
                    ByteSize::b(io.bytes_sent)
                ),
            ),
            ("Interfaces", io.active_interfaces.join(", ")),
            ("Devices", overview.connected_devices.len().to_string()),
            (
                "Last Updated",
                overview.last_updated.clone().unwrap_or_else(|| "—".to_owned()),
            ),
        ],
    )
}

pub async fn handle(
    ctx: &Context,
    args: &NetworkArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let overview = ctx.client.get_network_overview().await?;

    let out = if args.devices {
        output::render_list(
            global.output,
            &overview.connected_devices,
            device_row,
            |d| d.name.clone(),
        )?
    } else {
        let painter = Painter::new(global.color);
        output::render_single(
            global.output,
            &overview,
            |o| detail(painter, o),
            |o| o.network_data.ip_address.clone(),
        )?
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
