//! Command handlers for the CLI.
//!
//! Every edit goes through [`RouteEditor`], the same path an interactive
//! page would use, so the share link printed here is exactly what the page
//! would publish.

use std::fmt;
use std::time::Duration;

use anyhow::Context as _;
use fdel_core::form::{ADDRESS, NOTES, QUANTITY};
use fdel_core::{
    build_manifest, decode_or_default, encode, AppConfig, LocationRegistry, ManifestSummary, Route,
};
use fdel_geocoder::{Geocoder, NominatimClient};
use fdel_sync::{run_until_idle, MapSynchronizer, RouteEditor, Viewport};

/// A single form edit requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Edit {
    AddStop {
        address: String,
        quantity: u32,
        notes: String,
    },
    /// 1-based form row, blank rows included.
    RemoveRow(usize),
    SetField {
        name: &'static str,
        value: String,
    },
}

/// Accepts either a bare locator or a full share link.
pub(crate) fn locator_arg(arg: &str) -> &str {
    arg.split_once('#').map_or(arg, |(_, fragment)| fragment)
}

fn load_locations(config: &AppConfig) -> anyhow::Result<LocationRegistry> {
    let registry = match &config.locations_path {
        Some(path) => LocationRegistry::load(path)
            .with_context(|| format!("loading locations from {}", path.display()))?,
        None => LocationRegistry::builtin().context("loading built-in locations")?,
    };
    tracing::debug!(count = registry.len(), "locations loaded");
    Ok(registry)
}

fn synchronizer(config: &AppConfig) -> MapSynchronizer {
    MapSynchronizer::new(
        Duration::from_millis(config.geocode_pacing_ms),
        config.marker_padding,
    )
}

fn open_editor(config: &AppConfig, locator: &str) -> anyhow::Result<RouteEditor> {
    let editor = RouteEditor::open(
        locator_arg(locator),
        load_locations(config)?,
        synchronizer(config),
        &config.view_page,
    )?;
    Ok(editor)
}

pub(crate) fn run_new() -> anyhow::Result<()> {
    println!("{}", encode(&Route::default())?);
    Ok(())
}

pub(crate) fn run_decode(locator: &str) -> anyhow::Result<()> {
    let route = decode_or_default(locator_arg(locator));
    println!("{}", serde_json::to_string_pretty(&route)?);
    Ok(())
}

pub(crate) fn run_manifest(config: &AppConfig, locator: &str) -> anyhow::Result<()> {
    let route = decode_or_default(locator_arg(locator));
    let locations = load_locations(config)?;
    let summary = build_manifest(&route, &locations)?;
    print!("{}", ManifestText(&summary));
    Ok(())
}

/// Applies `edit` through the editor and prints the resulting share link.
pub(crate) fn run_edit(config: &AppConfig, locator: &str, edit: &Edit) -> anyhow::Result<()> {
    let mut editor = open_editor(config, locator)?;
    apply_edit(&mut editor, edit)?;
    let outcome = editor.on_form_changed()?;
    println!("{}", outcome.share_href);
    Ok(())
}

pub(crate) fn apply_edit(editor: &mut RouteEditor, edit: &Edit) -> anyhow::Result<()> {
    let form = editor.form_mut();
    match edit {
        Edit::AddStop {
            address,
            quantity,
            notes,
        } => {
            form.add_row();
            let row = form.rows.len() - 1;
            form.set_field(row, ADDRESS, address)?;
            form.set_field(row, QUANTITY, &quantity.to_string())?;
            form.set_field(row, NOTES, notes)?;
        }
        Edit::RemoveRow(number) => {
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow::anyhow!("row numbers start at 1"))?;
            let removed = form.remove_row(index)?;
            tracing::info!(
                row = number,
                address = removed.value(ADDRESS).unwrap_or_default(),
                "delivery removed"
            );
        }
        Edit::SetField { name, value } => form.set_metadata(name, value)?,
    }
    Ok(())
}

pub(crate) async fn run_map(config: &AppConfig, locator: &str) -> anyhow::Result<()> {
    let client = NominatimClient::with_base_url(
        &config.geocoder_base_url,
        &config.geocoder_country,
        &config.geocoder_city,
        config.geocoder_timeout_secs,
        &config.geocoder_user_agent,
    )?;
    let geocoder = Geocoder::new(client);
    let mut editor = open_editor(config, locator)?;

    let map = editor.map_mut();
    run_until_idle(map, &geocoder).await;

    for alert in map.take_alerts() {
        eprintln!("{alert}");
    }
    for marker in map.layer().iter() {
        println!(
            "{}\t{:.5},{:.5}\t{}",
            marker.glyph(),
            marker.position.lat,
            marker.position.lon,
            marker.title
        );
    }
    println!("{}", describe_viewport(map.viewport()));
    Ok(())
}

pub(crate) fn describe_viewport(viewport: Viewport) -> String {
    match viewport {
        Viewport::Initial { center, zoom } => {
            format!("view: center {:.5},{:.5} zoom {zoom}", center.lat, center.lon)
        }
        Viewport::Fitted(b) => format!(
            "view: {:.5},{:.5} to {:.5},{:.5}",
            b.south, b.west, b.north, b.east
        ),
    }
}

/// Plain-text manifest, one delivery per line.
pub(crate) struct ManifestText<'a>(pub(crate) &'a ManifestSummary);

impl fmt::Display for ManifestText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        if !summary.route_name.is_empty() {
            writeln!(f, "{}", summary.route_name)?;
        }
        let date = summary.display_date.as_deref().unwrap_or(&summary.date);
        if date.is_empty() {
            writeln!(f, "Pickup at {}", summary.time)?;
        } else {
            writeln!(f, "{date}, pickup at {}", summary.time)?;
        }
        writeln!(f, "From: {} ({})\n", summary.pickup.name, summary.pickup.address)?;

        if summary.is_empty() {
            return writeln!(f, "No delivery addresses defined!");
        }

        for line in &summary.lines {
            write!(f, "{:>3}. {} x{}", line.number, line.address, line.quantity)?;
            if line.notes.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, " ({})", line.notes)?;
            }
        }
        let totals = summary.totals;
        writeln!(
            f,
            "\n{} {}, {} {}",
            totals.stop_count,
            if totals.stop_count == 1 { "delivery" } else { "deliveries" },
            totals.total_quantity,
            totals.unit_label("box", "boxes"),
        )
    }
}
