//! Facility registry and bulk enable/disable

use super::control::{self, StagedEdit};
use super::error::{MlogError, Result};
use super::facility::Facility;
use super::importance::{Importance, IMPORTANCE_COUNT};
use std::collections::BTreeMap;

/// A named collection of facilities, addressable by control-name, plus the
/// set of importances the registry currently considers enabled. The set is
/// what later [`insert_adjusted`](Self::insert_adjusted) calls apply to a
/// newly added facility.
pub struct FacilityRegistry {
    name: String,
    facilities: BTreeMap<String, Facility>,
    enabled: [bool; IMPORTANCE_COUNT],
}

impl FacilityRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facilities: BTreeMap::new(),
            enabled: [true; IMPORTANCE_COUNT],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a facility under its own name, leaving the enable state of
    /// its streams untouched.
    pub fn insert(&mut self, facility: Facility) -> Result<()> {
        let control_name = facility.name().to_string();
        self.insert_named(control_name, facility)
    }

    /// Register a facility under an explicit control-name.
    ///
    /// Re-inserting the same facility is a no-op; a *different* facility
    /// under an occupied name is an error.
    pub fn insert_named(&mut self, control_name: impl Into<String>, facility: Facility) -> Result<()> {
        let control_name = control_name.into();
        if let Some(existing) = self.facilities.get(&control_name) {
            if existing.same_facility(&facility) {
                return Ok(());
            }
            return Err(MlogError::duplicate(control_name));
        }
        self.facilities.insert(control_name, facility);
        Ok(())
    }

    /// Register a facility and set each of its streams to the registry's
    /// current enabled-importance set.
    pub fn insert_adjusted(&mut self, facility: Facility) -> Result<()> {
        for importance in Importance::ALL {
            facility
                .stream(importance)
                .set_enabled(self.enabled[importance.index()]);
        }
        self.insert(facility)
    }

    pub fn remove(&mut self, control_name: &str) -> Option<Facility> {
        self.facilities.remove(control_name)
    }

    pub fn facility(&self, control_name: &str) -> Option<&Facility> {
        self.facilities.get(control_name)
    }

    /// Look up one stream by control-name and importance.
    pub fn stream(
        &self,
        control_name: &str,
        importance: Importance,
    ) -> Option<super::stream::Stream> {
        self.facilities
            .get(control_name)
            .map(|f| f.stream(importance).clone())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.facilities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Whether the registry currently considers `importance` enabled (the
    /// state applied by [`insert_adjusted`](Self::insert_adjusted)).
    pub fn importance_enabled(&self, importance: Importance) -> bool {
        self.enabled[importance.index()]
    }

    /// Apply a control string (see [`crate::core::control`] for the
    /// grammar). Transactional: on error nothing changes and the error
    /// carries the 1-based column of the offending token.
    pub fn control(&mut self, input: &str) -> Result<()> {
        let edits = control::parse(input, &|name| self.facilities.contains_key(name))?;
        for edit in &edits {
            self.apply(edit);
        }
        Ok(())
    }

    fn apply(&mut self, edit: &StagedEdit) {
        match &edit.facility {
            None => {
                for facility in self.facilities.values() {
                    for &importance in &edit.importances {
                        facility.stream(importance).set_enabled(edit.enable);
                    }
                }
                // Global clauses also steer what insert_adjusted applies
                // to future facilities.
                for &importance in &edit.importances {
                    self.enabled[importance.index()] = edit.enable;
                }
            }
            Some(name) => {
                if let Some(facility) = self.facilities.get(name) {
                    for &importance in &edit.importances {
                        facility.stream(importance).set_enabled(edit.enable);
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for FacilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacilityRegistry")
            .field("name", &self.name)
            .field("facilities", &self.facilities.keys().collect::<Vec<_>>())
            .finish()
    }
}
