//! Form-field surface: configuration, bindable state, and validity.
//!
//! The list participates in form validation flows the way native controls
//! do: it has a name, a value, a required flag, and check/report validity
//! entry points. Instead of inheriting from a generic control base, the
//! widget owns a [`FormState`] — a small capability object of reactive
//! properties with change signals.

use draglist_core::{Property, Signal};

/// Recognized construction options for a list instance.
#[derive(Debug, Clone)]
pub struct ListConfig<T> {
    /// Form-field name.
    pub name: String,
    /// Tag gating cross-list transfers; lists only exchange items when tags
    /// are equal.
    pub type_tag: String,
    /// Initial (and default) value sequence.
    pub value: Vec<T>,
    /// Whether an empty list fails validity checks.
    pub required: bool,
    /// Read-only lists render but refuse drag-and-drop.
    pub read_only: bool,
    /// Disabled lists refuse drag-and-drop.
    pub disabled: bool,
    /// Whether items can be dragged at all.
    pub draggable: bool,
    /// Opt-in to cross-list transfers.
    pub shareable: bool,
    /// Vertical gap between items, in pixels.
    pub spacing: f32,
}

impl<T> Default for ListConfig<T> {
    fn default() -> Self {
        Self {
            name: String::new(),
            type_tag: String::new(),
            value: Vec::new(),
            required: false,
            read_only: false,
            disabled: false,
            draggable: false,
            shareable: false,
            spacing: 0.0,
        }
    }
}

/// The bindable form-field state of a list instance.
///
/// Setters detect changes through the property cells and emit the matching
/// signal only when the value actually changed.
pub struct FormState {
    name: Property<String>,
    required: Property<bool>,
    read_only: Property<bool>,
    disabled: Property<bool>,

    /// Emitted when the required flag changes.
    pub required_changed: Signal<bool>,
    /// Emitted when the read-only flag changes.
    pub read_only_changed: Signal<bool>,
    /// Emitted when the disabled flag changes.
    pub disabled_changed: Signal<bool>,
}

impl FormState {
    /// Create form state from configuration flags.
    pub fn new(name: String, required: bool, read_only: bool, disabled: bool) -> Self {
        Self {
            name: Property::new(name),
            required: Property::new(required),
            read_only: Property::new(read_only),
            disabled: Property::new(disabled),
            required_changed: Signal::new(),
            read_only_changed: Signal::new(),
            disabled_changed: Signal::new(),
        }
    }

    /// The form-field name.
    pub fn name(&self) -> String {
        self.name.get()
    }

    /// Set the form-field name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.name.set_silent(name.into());
    }

    /// Whether an empty list fails validity checks.
    pub fn required(&self) -> bool {
        self.required.get()
    }

    /// Set the required flag.
    pub fn set_required(&self, state: bool) {
        if self.required.set(state) {
            self.required_changed.emit(state);
        }
    }

    /// Whether the list is read-only.
    pub fn read_only(&self) -> bool {
        self.read_only.get()
    }

    /// Set the read-only flag.
    pub fn set_read_only(&self, state: bool) {
        if self.read_only.set(state) {
            self.read_only_changed.emit(state);
        }
    }

    /// Whether the list is disabled.
    pub fn disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Set the disabled flag.
    pub fn set_disabled(&self, state: bool) {
        if self.disabled.set(state) {
            self.disabled_changed.emit(state);
        }
    }
}

/// Why a list is (in)valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidityState {
    /// The list is required but empty.
    pub value_missing: bool,
    /// At least one rendered item reports itself invalid.
    pub item_invalid: bool,
}

impl ValidityState {
    /// Whether the list passes validation.
    pub fn is_valid(&self) -> bool {
        !self.value_missing && !self.item_invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_setters_emit_only_on_change() {
        let form = FormState::new("tags".to_string(), false, false, false);
        let emitted = Arc::new(Mutex::new(Vec::new()));

        let emitted_clone = emitted.clone();
        form.required_changed.connect(move |&state| {
            emitted_clone.lock().push(state);
        });

        form.set_required(true);
        form.set_required(true); // no change, no emit
        form.set_required(false);

        assert_eq!(*emitted.lock(), vec![true, false]);
    }

    #[test]
    fn test_validity_state() {
        assert!(ValidityState::default().is_valid());
        assert!(
            !ValidityState {
                value_missing: true,
                item_invalid: false
            }
            .is_valid()
        );
        assert!(
            !ValidityState {
                value_missing: false,
                item_invalid: true
            }
            .is_valid()
        );
    }

    #[test]
    fn test_config_defaults() {
        let config: ListConfig<String> = ListConfig::default();
        assert!(!config.draggable);
        assert!(!config.shareable);
        assert!(config.value.is_empty());
        assert_eq!(config.spacing, 0.0);
    }
}
