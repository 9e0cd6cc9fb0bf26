use colored::*;
use sweepr_common::network::host::Host;

use crate::terminal::colors;

/// `Host 192.168.1.7 is up (0.42ms)`
pub fn host_up(host: &Host) -> String {
    let addr: ColoredString = host.addr.to_string().color(colors::IPV4_ADDR).bold();
    let mut line: String = format!("Host {addr} is up").color(colors::TEXT_DEFAULT).to_string();

    if let Some(rtt) = host.rtt {
        let millis: String = format!("({:.2}ms)", rtt.as_secs_f64() * 1_000.0);
        line.push(' ');
        line.push_str(&millis.color(colors::SEPARATOR).to_string());
    }

    line
}

/// `192.168.1.7 ── 22, 80, 443` or `192.168.1.8 ── no open ports`
pub fn host_ports(host: &Host) -> String {
    let addr: ColoredString = host.addr.to_string().color(colors::IPV4_ADDR);
    let arrow: ColoredString = "──".color(colors::SEPARATOR);

    if !host.has_open_ports() {
        return format!("{addr} {arrow} {}", "no open ports".dimmed());
    }

    let ports: Vec<String> = host
        .active_ports
        .iter()
        .map(|port| port.to_string().color(colors::PORT).bold().to_string())
        .collect();
    let comma: String = ", ".color(colors::SEPARATOR).to_string();

    format!("{addr} {arrow} {}", ports.join(&comma))
}
