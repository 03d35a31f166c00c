//! Plain text report of a device, its entities, REST surface and probe results.
//!
//! In timed mode only the summary lines are rendered.

use std::{fmt::Write, time::Duration};

use crate::{
    constants::RULE_WIDTH,
    probe::{ProbeOutcome, ProbeReport},
    source::DeviceInfo,
    surface::{category::LISTING_ORDER, Entity, RestSurface},
};

const CHECK: char = '\u{2713}';
const CROSS: char = '\u{2717}';

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn heading(out: &mut String, title: &str) {
    _ = writeln!(out, "{}", rule());
    _ = writeln!(out, "{}", title);
    _ = writeln!(out, "{}", rule());
}

pub fn device_info(device: &DeviceInfo, timed: bool) -> String {
    let mut out = String::new();
    if timed {
        return out;
    }

    heading(&mut out, "DEVICE INFORMATION");
    _ = writeln!(out, "Name:                {}", device.name);
    let optional = [
        ("Friendly Name:       ", &device.friendly_name),
        ("MAC Address:         ", &device.mac_address),
        ("ESPHome Version:     ", &device.esphome_version),
        ("Compilation Time:    ", &device.compilation_time),
        ("Model:               ", &device.model),
        ("Manufacturer:        ", &device.manufacturer),
        ("Platform:            ", &device.platform),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            _ = writeln!(out, "{}{}", label, value);
        }
    }
    _ = writeln!(out, "{}", rule());
    out.push('\n');
    out
}

/// All entities grouped by category, display-only and unknown kinds included
pub fn entities(entities: &[Entity], timed: bool) -> String {
    let mut out = String::new();
    if !timed {
        heading(&mut out, "ENTITIES");
        for category in LISTING_ORDER {
            let mut lines = entities
                .iter()
                .filter(|e| e.category() == *category)
                .map(Entity::display_line)
                .collect::<Vec<_>>();
            if lines.is_empty() {
                continue;
            }
            lines.sort();
            _ = writeln!(out, "\n{} ({}):", category.group_label(), lines.len());
            for line in lines {
                _ = writeln!(out, "{}", line);
            }
        }
        out.push('\n');
        _ = writeln!(out, "{}", rule());
    }

    _ = writeln!(out, "Total Entities: {}", entities.len());
    if !timed {
        _ = writeln!(out, "{}", rule());
    }
    out
}

pub fn surface(surface: &RestSurface, base_url: &str, timed: bool) -> String {
    let mut out = String::new();
    if !timed {
        out.push_str("\n\n");
        heading(&mut out, "REST API ENDPOINTS");
        _ = writeln!(out, "\nBase URL: {}\n", base_url);

        if !surface.skipped.is_empty() {
            out.push('\n');
            heading(
                &mut out,
                &format!("ENTITIES WITHOUT REST ENDPOINTS ({})", surface.skipped.len()),
            );
            for entity in &surface.skipped {
                _ = writeln!(
                    out,
                    "  [{}] {} ({})",
                    entity.kind, entity.name, entity.object_id
                );
            }
            out.push('\n');
        }

        for (category, endpoints) in surface.groups() {
            _ = writeln!(out, "\n{} ({}):", category, endpoints.len());
            for ep in endpoints {
                _ = writeln!(out, "\n  {}", ep.entity_name);
                _ = writeln!(out, "    Endpoint: {}", ep.path);
                _ = writeln!(out, "    Methods:  {}", ep.methods.join(", "));
                if !ep.actions.is_empty() {
                    _ = writeln!(out, "    Actions:  {}", ep.actions.join(", "));
                }
                if !ep.options.is_empty() {
                    _ = writeln!(out, "    Options:  {}", ep.options.join(", "));
                }
            }
        }
        out.push('\n');
        _ = writeln!(out, "{}", rule());
    }

    _ = writeln!(out, "Total REST Endpoints: {}", surface.endpoints.len());
    _ = writeln!(out, "  GET-capable:  {}", surface.get_capable());
    _ = writeln!(out, "  POST-only:    {}", surface.post_only());

    if !timed {
        _ = writeln!(out, "{}", rule());
        out.push('\n');
        out.push_str("Example Usage:\n");
        _ = writeln!(out, "  GET  {}/sensor/{{sensor_id}}", base_url);
        _ = writeln!(out, "  POST {}/switch/{{switch_id}}/turn_on", base_url);
        _ = writeln!(out, "  POST {}/light/{{light_id}}/toggle", base_url);
        out.push('\n');
    }
    out
}

pub fn probe(report: &ProbeReport, timed: bool) -> String {
    let mut out = String::new();
    if !timed {
        out.push('\n');
        heading(&mut out, "TESTING REST ENDPOINTS (GET)");
        out.push('\n');
    }

    if report.tested() == 0 {
        out.push_str("No GET endpoints found to test.\n");
        return out;
    }

    if !timed {
        _ = writeln!(out, "Testing {} GET endpoints...\n", report.tested());
        for result in &report.results {
            let target = format!("[{}] {}", result.category, result.entity_name);
            match &result.outcome {
                ProbeOutcome::Success(body) => {
                    _ = writeln!(out, "{} {}", CHECK, target);
                    _ = writeln!(out, "  URL: {}", result.url);
                    _ = writeln!(out, "  Response: {}", body);
                }
                ProbeOutcome::HttpError { status, body } => {
                    _ = writeln!(out, "{} {} - FAILED", CROSS, target);
                    _ = writeln!(out, "  URL: {}", result.url);
                    _ = writeln!(out, "  Status: {}", status);
                    _ = writeln!(out, "  Response: {}", body);
                }
                ProbeOutcome::Timeout => {
                    _ = writeln!(out, "{} {} - TIMEOUT", CROSS, target);
                    _ = writeln!(out, "  URL: {}", result.url);
                    _ = writeln!(
                        out,
                        "  Error: Request timed out after {} seconds",
                        report.timeout.as_secs_f64()
                    );
                }
                ProbeOutcome::ConnectionError(e) => {
                    _ = writeln!(out, "{} {} - CONNECTION ERROR", CROSS, target);
                    _ = writeln!(out, "  URL: {}", result.url);
                    _ = writeln!(out, "  Error: {}", e);
                }
            }
            out.push('\n');
        }
        _ = writeln!(out, "{}", rule());
    }

    out.push_str("TEST SUMMARY\n");
    if !timed {
        _ = writeln!(out, "{}", rule());
    }
    _ = writeln!(out, "Total Tested:  {}", report.tested());
    _ = writeln!(out, "Successful:    {} {}", report.succeeded, CHECK);
    _ = writeln!(out, "Failed:        {} {}", report.failed, CROSS);
    if !timed {
        _ = writeln!(out, "{}", rule());
        out.push('\n');
    }
    out
}

pub fn execution_time(elapsed: Duration) -> String {
    format!("\nExecution Time: {:.3}s\n", elapsed.as_secs_f64())
}
