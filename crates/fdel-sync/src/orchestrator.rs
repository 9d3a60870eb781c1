//! Change Orchestrator: the only path that writes route state.
//!
//! The editor owns the route, its form projection, and the map synchronizer.
//! UI code edits the form through [`RouteEditor::form_mut`] and then calls
//! [`RouteEditor::on_form_changed`], which rescans, repairs, republishes the
//! locator, and either rebuilds the form or redraws the map.

use fdel_core::{
    apply_to_form, decode_or_default, encode, scan_and_repair, share_link, Form, LocationRegistry,
    LocatorError, Route, ScanError,
};
use thiserror::Error;

use crate::synchronizer::MapSynchronizer;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Locator(#[from] LocatorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEffect {
    /// The map was redrawn under this generation.
    Redrawn { generation: u64 },
    /// The stop list had emptied; a placeholder row was inserted and the
    /// form rebuilt. The map is cleared and nothing is geocoded.
    FormRebuilt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeOutcome {
    pub locator: String,
    pub share_href: String,
    pub effect: ChangeEffect,
}

pub struct RouteEditor {
    route: Route,
    form: Form,
    locations: LocationRegistry,
    map: MapSynchronizer,
    view_page: String,
    locator: String,
    share_href: String,
}

impl RouteEditor {
    /// Loads `locator` (falling back to the default route), renders the form,
    /// publishes the share link, and schedules the first map redraw.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Locator`] if the loaded route cannot be
    /// re-encoded.
    pub fn open(
        locator: &str,
        locations: LocationRegistry,
        map: MapSynchronizer,
        view_page: &str,
    ) -> Result<Self, EditorError> {
        let mut route = decode_or_default(locator);
        route.ensure_stops();

        let mut form = Form::default();
        apply_to_form(&route, &mut form);

        let locator = encode(&route)?;
        let share_href = share_link(view_page, &locator);

        let mut editor = Self {
            route,
            form,
            locations,
            map,
            view_page: view_page.to_owned(),
            locator,
            share_href,
        };
        editor.map.redraw(&editor.route, &editor.locations);
        Ok(editor)
    }

    /// Reacts to any edit of the form.
    ///
    /// On a scan error the previous route, locator, and map stay as they
    /// were; the form keeps the user's input so it can be corrected.
    ///
    /// # Errors
    ///
    /// - [`EditorError::Scan`] if the form holds an invalid value.
    /// - [`EditorError::Locator`] if the route cannot be encoded.
    pub fn on_form_changed(&mut self) -> Result<ChangeOutcome, EditorError> {
        let scanned = scan_and_repair(&mut self.form)?;
        let locator = encode(&scanned.route)?;

        self.route = scanned.route;
        self.share_href = share_link(&self.view_page, &locator);
        self.locator = locator;
        tracing::info!(
            stops = self.route.stops.len(),
            repaired = scanned.repaired,
            "route updated"
        );

        let effect = if scanned.repaired {
            self.map.invalidate();
            ChangeEffect::FormRebuilt
        } else {
            ChangeEffect::Redrawn {
                generation: self.map.redraw(&self.route, &self.locations),
            }
        };

        Ok(ChangeOutcome {
            locator: self.locator.clone(),
            share_href: self.share_href.clone(),
            effect,
        })
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Mutable access for UI edits. Changes reach the route only through
    /// [`RouteEditor::on_form_changed`].
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    #[must_use]
    pub fn locations(&self) -> &LocationRegistry {
        &self.locations
    }

    #[must_use]
    pub fn map(&self) -> &MapSynchronizer {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapSynchronizer {
        &mut self.map
    }

    /// The current locator, as published in the page fragment.
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    #[must_use]
    pub fn share_href(&self) -> &str {
        &self.share_href
    }
}
