//! File exporters for a finished scan.
//!
//! The JSON inventory is the serialized [`ScanResult`]. The topology is a
//! Graphviz document with the gateway at the center of a radial layout. A
//! `.png` destination is rendered through `twopi`; when that fails the DOT
//! source is written next to it instead.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, bail};
use netcensus_common::model::{Device, ScanResult};
use tracing::warn;

const RENDERER: &str = "twopi";

pub fn save_json(result: &ScanResult, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_json(result, &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(result: &ScanResult, writer: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, result).context("failed to serialize scan result")?;
    Ok(())
}

/// Writes the topology and returns the path that was actually written.
pub fn save_topology(result: &ScanResult, path: &Path) -> anyhow::Result<PathBuf> {
    save_topology_with(result, path, RENDERER)
}

fn save_topology_with(result: &ScanResult, path: &Path, renderer: &str) -> anyhow::Result<PathBuf> {
    let dot: String = render_topology(result);
    if !wants_png(path) {
        write_dot(&dot, path)?;
        return Ok(path.to_path_buf());
    }

    match render_png(&dot, path, renderer) {
        Ok(()) => Ok(path.to_path_buf()),
        Err(e) => {
            let fallback: PathBuf = path.with_extension("dot");
            warn!("Cannot render {}: {e:#}; writing {} instead", path.display(), fallback.display());
            write_dot(&dot, &fallback)?;
            Ok(fallback)
        }
    }
}

fn wants_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn write_dot(dot: &str, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, dot).with_context(|| format!("cannot write {}", path.display()))
}

/// Pipes the DOT source into `renderer -Tpng -o <path>`.
fn render_png(dot: &str, path: &Path, renderer: &str) -> anyhow::Result<()> {
    let mut child = Command::new(renderer)
        .arg("-Tpng")
        .arg("-o")
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("cannot run {renderer}"))?;

    child
        .stdin
        .take()
        .context("renderer stdin unavailable")?
        .write_all(dot.as_bytes())?;

    let output = child.wait_with_output()?;
    if !output.status.success() {
        bail!(
            "{renderer} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Renders the star topology: one central gateway node and one edge to
/// every other device.
pub fn render_topology(result: &ScanResult) -> String {
    let gateway_label: String = result
        .gateway_address
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "gateway".to_string());
    let gateway_id: String = format!("gw_{gateway_label}");

    let center_label: String = match result.gateway_device() {
        Some(device) => device_label(device),
        None => format!("Gateway\n{gateway_label}"),
    };

    let mut dot = String::new();
    dot.push_str("digraph topology {\n");
    dot.push_str("    layout=twopi;\n");
    dot.push_str("    overlap=false;\n");
    dot.push_str("    splines=true;\n");
    dot.push_str("    node [fontsize=10];\n");
    let _ = writeln!(
        dot,
        "    {} [label={}, shape=doublecircle, style=filled, fillcolor=lightgray];",
        quote(&gateway_id),
        quote(&center_label)
    );

    for device in result.devices.iter().filter(|d| !d.is_gateway) {
        let node_id: String = format!("dev_{}", device.address);
        let _ = writeln!(dot, "    {} [label={}, shape=box];", quote(&node_id), quote(&device_label(device)));
        let _ = writeln!(dot, "    {} -> {};", quote(&gateway_id), quote(&node_id));
    }

    dot.push_str("}\n");
    dot
}

fn device_label(device: &Device) -> String {
    let mut lines: Vec<String> = vec![device.address.to_string()];
    lines.extend(device.hostname.iter().cloned());
    lines.extend(device.vendor.iter().cloned());
    lines.join("\n")
}

/// Quotes a DOT identifier; newlines become the `\n` label escape.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
