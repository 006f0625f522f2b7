//! Source declarations of the marker attributes.

use ifacegen_core::{Marker, Markers};

use super::{write_banner, CodeWriter};
use crate::pipeline::OutputUnit;

/// C# declaration of `marker` as an attribute class.
pub fn marker_source(marker: &Marker) -> String {
    let mut writer = CodeWriter::new();
    write_banner(&mut writer);

    if let Some(ns) = &marker.namespace {
        writer.line(&format!("namespace {}", ns));
        writer.open();
    }

    let targets: Vec<String> = marker
        .targets
        .iter()
        .map(|t| format!("global::System.AttributeTargets.{}", t.as_str()))
        .collect();
    writer.line(&format!(
        "[global::System.AttributeUsage({}, AllowMultiple = false, Inherited = false)]",
        targets.join(" | ")
    ));
    writer.line(&format!(
        "internal sealed class {} : global::System.Attribute",
        marker.name
    ));
    writer.open();
    writer.close();

    if marker.namespace.is_some() {
        writer.close();
    }

    writer.finish()
}

/// One unit per marker, keyed by the marker's qualified name.
///
/// Hosts add these once, before any generated interface, so that sources
/// using the markers compile.
pub fn support_units(markers: &Markers) -> Vec<OutputUnit> {
    [&markers.discovery, &markers.exclusion]
        .into_iter()
        .map(|marker| OutputUnit::new(marker.qualified_name(), marker_source(marker)))
        .collect()
}
