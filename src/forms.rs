//! Registration Form Assistant — shared state of the multi-step form.
//!
//! The form itself is owned by the portal UI; the assistant only steps
//! through it and fills fields on the user's behalf. The store is reset
//! when a registration flow starts and is never destroyed by this crate.
//!
//! Field values are canonicalized by field class before storing:
//! family-name fields are upper-cased, given-name fields are title-cased
//! token by token (hyphens preserved), everything else is stored verbatim.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// First and last step of every registration form.
pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 6;

/// Which registration form is being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Resident,
    ForeignResident,
    Organization,
}

impl FormKind {
    /// Parse a citizen-type argument from the model.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "resident" | "citizen" | "citoyen" => Some(FormKind::Resident),
            "foreign_resident" | "foreigner" | "etranger" | "resident_etranger" => {
                Some(FormKind::ForeignResident)
            }
            "organization" | "organisation" | "association" => Some(FormKind::Organization),
            _ => None,
        }
    }

    /// Portal route of the matching registration form.
    pub fn route(self) -> &'static str {
        match self {
            FormKind::Resident => "/inscription/resident",
            FormKind::ForeignResident => "/inscription/etranger",
            FormKind::Organization => "/inscription/organisation",
        }
    }

    /// Label spoken back to the user.
    pub fn label(self) -> &'static str {
        match self {
            FormKind::Resident => "inscription résident",
            FormKind::ForeignResident => "inscription résident étranger",
            FormKind::Organization => "inscription organisation",
        }
    }
}

/// A step-navigation instruction from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Next,
    Previous,
    Goto(u8),
}

impl StepDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            StepDirection::Next => "next",
            StepDirection::Previous => "previous",
            StepDirection::Goto(_) => "goto",
        }
    }
}

/// Current state of the registration form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAssistantState {
    pub form: FormKind,
    /// Always within `[FIRST_STEP, LAST_STEP]`.
    pub step: u8,
    pub fields: BTreeMap<String, String>,
}

impl FormAssistantState {
    pub fn new(form: FormKind) -> Self {
        Self {
            form,
            step: FIRST_STEP,
            fields: BTreeMap::new(),
        }
    }

    /// Apply a navigation instruction, clamping to the valid step range.
    pub fn apply(&mut self, direction: StepDirection) -> u8 {
        self.step = match direction {
            StepDirection::Next => (self.step + 1).min(LAST_STEP),
            StepDirection::Previous => self.step.saturating_sub(1).max(FIRST_STEP),
            StepDirection::Goto(n) => n.clamp(FIRST_STEP, LAST_STEP),
        };
        self.step
    }

    /// Names of the fields already filled.
    pub fn filled_fields(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

// ─── Field canonicalization ─────────────────────────────────────────────────

/// Class of a form field, deciding how its value is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    FamilyName,
    GivenName,
    Other,
}

/// Field names treated as family names (portal + extraction spellings).
const FAMILY_NAME_FIELDS: &[&str] = &[
    "lastname",
    "last_name",
    "nom",
    "family_name",
    "familyname",
    "surname",
    "birth_name",
    "nom_naissance",
];

/// Field names treated as given names.
const GIVEN_NAME_FIELDS: &[&str] = &[
    "firstname",
    "first_name",
    "prenom",
    "given_name",
    "givenname",
    "middle_name",
];

/// Classify a field by its name.
pub fn classify_field(field: &str) -> FieldClass {
    let key = field.trim().to_lowercase();
    if FAMILY_NAME_FIELDS.contains(&key.as_str()) {
        FieldClass::FamilyName
    } else if GIVEN_NAME_FIELDS.contains(&key.as_str()) {
        FieldClass::GivenName
    } else {
        FieldClass::Other
    }
}

/// Canonicalize a value for storage according to its field class.
pub fn canonicalize_field(field: &str, value: &str) -> String {
    match classify_field(field) {
        FieldClass::FamilyName => value.trim().to_uppercase(),
        FieldClass::GivenName => title_case(value.trim()),
        FieldClass::Other => value.to_string(),
    }
}

/// Capitalize each whitespace- or hyphen-delimited token, preserving the
/// hyphens ("jean-pierre" → "Jean-Pierre").
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            word.split('-')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

// ─── FormStore ──────────────────────────────────────────────────────────────

/// Accessor seam over the shared form state, injected into the dispatcher
/// so tests can substitute fakes.
pub trait FormStore: Send + Sync {
    fn state(&self) -> FormAssistantState;
    fn set_field(&self, field: &str, value: &str);
    fn set_step(&self, step: u8);
    fn reset(&self, form: FormKind);
}

/// In-process implementation backing the portal's form UI.
pub struct SharedFormStore {
    state: Mutex<FormAssistantState>,
}

impl SharedFormStore {
    pub fn new(form: FormKind) -> Self {
        Self {
            state: Mutex::new(FormAssistantState::new(form)),
        }
    }

    /// Convenience constructor for injection.
    pub fn shared(form: FormKind) -> Arc<Self> {
        Arc::new(Self::new(form))
    }
}

impl FormStore for SharedFormStore {
    fn state(&self) -> FormAssistantState {
        self.state.lock().expect("form lock").clone()
    }

    fn set_field(&self, field: &str, value: &str) {
        self.state
            .lock()
            .expect("form lock")
            .fields
            .insert(field.to_string(), value.to_string());
    }

    fn set_step(&self, step: u8) {
        self.state.lock().expect("form lock").step = step.clamp(FIRST_STEP, LAST_STEP);
    }

    fn reset(&self, form: FormKind) {
        let mut state = self.state.lock().expect("form lock");
        *state = FormAssistantState::new(form);
        tracing::debug!(form = ?form, "form assistant reset");
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
