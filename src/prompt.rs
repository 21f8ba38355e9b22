//! Context/Prompt Builder — assembles the outbound system prompt.
//!
//! Pure functions of the user's identity, current page, time of day, and
//! form progress. No clock or store is read here: the caller supplies
//! everything, which keeps title resolution and prompt assembly
//! deterministic and trivially testable.

use serde::Serialize;

use crate::collaborators::types::Role;
use crate::forms::FormKind;

// ─── Time of day ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Derive from a 24h clock hour.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    /// Current local time of day.
    pub fn now() -> Self {
        use chrono::Timelike;
        Self::from_hour(chrono::Local::now().hour())
    }

    fn greeting(self) -> &'static str {
        match self {
            TimeOfDay::Morning | TimeOfDay::Afternoon => "Bonjour",
            TimeOfDay::Evening => "Bonsoir",
        }
    }
}

// ─── Title resolution ───────────────────────────────────────────────────────

/// First-name values that are actually honorific abbreviations, stored
/// erroneously in the first-name column. These must never be echoed back.
const HONORIFIC_ABBREVIATIONS: &[&str] = &[
    "m", "mr", "mrs", "ms", "mme", "mlle", "dr", "me", "pr",
];

fn is_honorific_abbreviation(name: &str) -> bool {
    let key = name.trim().trim_end_matches('.').to_lowercase();
    HONORIFIC_ABBREVIATIONS.contains(&key.as_str())
}

fn usable_first_name(first_name: Option<&str>) -> Option<&str> {
    first_name
        .map(str::trim)
        .filter(|n| !n.is_empty() && !is_honorific_abbreviation(n))
}

/// Resolve how the assistant addresses the user.
///
/// Deterministic lookup:
/// - elected/senior roles get their fixed honorific, never a first name;
/// - administrative roles get their first name when it is a real name,
///   otherwise a generic collegial address;
/// - citizen-facing roles get their first name when available, otherwise
///   `None` (the prompt falls back to a warm generic greeting);
/// - unidentified users get `None`.
pub fn resolve_title(role: Role, first_name: Option<&str>) -> Option<String> {
    match role {
        Role::President => Some("Monsieur le Président".to_string()),
        Role::VicePresident => Some("Monsieur le Vice-Président".to_string()),
        Role::SecretaryGeneral => Some("Monsieur le Secrétaire général".to_string()),
        Role::Questeur => Some("Monsieur le Questeur".to_string()),
        Role::Deputy => Some("Monsieur le Député".to_string()),
        Role::DepartmentHead | Role::StaffAgent | Role::Administrator => Some(
            usable_first_name(first_name)
                .map(str::to_string)
                .unwrap_or_else(|| "cher collègue".to_string()),
        ),
        Role::Resident | Role::Visitor | Role::ForeignResident | Role::Organization => {
            usable_first_name(first_name).map(str::to_string)
        }
        Role::Unknown => None,
    }
}

// ─── Prompt assembly ────────────────────────────────────────────────────────

/// Form progress snippet appended when the user is on a registration page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormProgress {
    pub form: FormKind,
    pub step: u8,
    pub filled: Vec<String>,
}

/// Everything the prompt is built from.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub role: Role,
    pub first_name: Option<String>,
    pub current_path: String,
    pub time_of_day: TimeOfDay,
    pub form_progress: Option<FormProgress>,
}

/// Static identity portion of the system prompt.
const PROMPT_INTRO: &str = "\
Tu es l'assistant vocal du portail Agora. Tu aides les utilisateurs à \
naviguer dans le portail, gérer leur courrier et leurs messages, consulter \
l'annuaire, préparer des courriers officiels, réutiliser leurs documents et \
avancer dans leurs démarches.";

/// Behavioral rules, constant across contexts.
const PROMPT_RULES: &str = "\
Réponds toujours en français, de manière brève et naturelle à l'oral. \
Utilise les outils mis à ta disposition pour agir ; ne décris jamais une \
action sans l'effectuer. Si un outil échoue, explique simplement le \
problème et propose une alternative.";

/// Whether a route is one of the registration forms.
fn is_registration_path(path: &str) -> bool {
    path.starts_with("/inscription")
}

/// Whether a route is the portal landing page.
fn is_landing_path(path: &str) -> bool {
    matches!(path, "/" | "" | "/accueil")
}

/// Build the full system prompt. Pure: same context, same prompt.
pub fn build_system_prompt(ctx: &PromptContext) -> String {
    let mut prompt = String::from(PROMPT_INTRO);
    prompt.push_str("\n\n");

    let greeting = ctx.time_of_day.greeting();
    match resolve_title(ctx.role, ctx.first_name.as_deref()) {
        Some(title) => {
            prompt.push_str(&format!("Accueille l'utilisateur par « {greeting} {title} »."));
        }
        None if ctx.role.is_identified() => {
            prompt.push_str(&format!(
                "Accueille l'utilisateur chaleureusement par « {greeting} et bienvenue \
                 sur le portail Agora »."
            ));
        }
        None => {
            prompt.push_str(&format!(
                "Accueille l'utilisateur par un simple « {greeting} », sans le nommer."
            ));
        }
    }

    prompt.push_str(&format!("\n\nPage actuelle : {}.", ctx.current_path));

    if is_registration_path(&ctx.current_path) {
        if let Some(progress) = &ctx.form_progress {
            let filled = if progress.filled.is_empty() {
                "aucun".to_string()
            } else {
                progress.filled.join(", ")
            };
            prompt.push_str(&format!(
                "\nL'utilisateur remplit le formulaire {} (étape {} sur 6). \
                 Champs déjà renseignés : {}.",
                progress.form.label(),
                progress.step,
                filled
            ));
        }
    } else if is_landing_path(&ctx.current_path) {
        prompt.push_str(
            "\nL'utilisateur est sur la page d'accueil. Propose le menu des services : \
             démarches, rendez-vous, annuaire, courrier, documents.",
        );
    }

    prompt.push_str("\n\n");
    prompt.push_str(PROMPT_RULES);
    prompt
}

// ─── Tests ──────────────────────────────────────────────────────────────────
