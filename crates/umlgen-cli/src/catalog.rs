//! Built-in diagram catalog.
//!
//! Each entry pairs a short name with the file name of its artifacts and a
//! provider returning the PlantUML source. Sources are embedded at compile
//! time from the `diagrams/` directory.

use umlgen::{UmlgenError, job::DiagramJob};

/// Produces the source text of one diagram.
pub type SourceProvider = fn() -> String;

/// One diagram the CLI knows how to generate.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    name: &'static str,
    output_base_name: &'static str,
    provider: SourceProvider,
}

impl CatalogEntry {
    /// Returns the short name used by `--only`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the artifact file name without extension
    pub fn output_base_name(&self) -> &'static str {
        self.output_base_name
    }

    /// Builds the job for this diagram.
    pub fn job(&self) -> DiagramJob {
        DiagramJob::new(self.name, self.output_base_name, (self.provider)())
    }
}

static CATALOG: [CatalogEntry; 8] = [
    CatalogEntry {
        name: "class",
        output_base_name: "Class Diagram - Voice Automation Hub",
        provider: || include_str!("../diagrams/class.puml").to_string(),
    },
    CatalogEntry {
        name: "sequence-interpretation",
        output_base_name: "Sequence Diagram - Command Interpretation",
        provider: || include_str!("../diagrams/sequence-interpretation.puml").to_string(),
    },
    CatalogEntry {
        name: "sequence-execution",
        output_base_name: "Sequence Diagram - Command Execution",
        provider: || include_str!("../diagrams/sequence-execution.puml").to_string(),
    },
    CatalogEntry {
        name: "sequence-composite",
        output_base_name: "Sequence Diagram - Composite Command Execution",
        provider: || include_str!("../diagrams/sequence-composite.puml").to_string(),
    },
    CatalogEntry {
        name: "component",
        output_base_name: "Component Diagram - Voice Automation Hub Architecture",
        provider: || include_str!("../diagrams/component.puml").to_string(),
    },
    CatalogEntry {
        name: "use-case",
        output_base_name: "Use Case Diagram - Voice Automation Hub",
        provider: || include_str!("../diagrams/use-case.puml").to_string(),
    },
    CatalogEntry {
        name: "state",
        output_base_name: "State Diagram - Command Processing Flow",
        provider: || include_str!("../diagrams/state.puml").to_string(),
    },
    CatalogEntry {
        name: "activity",
        output_base_name: "Activity Diagram - Command Flow",
        provider: || include_str!("../diagrams/activity.puml").to_string(),
    },
];

/// Returns every built-in diagram, in generation order.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Returns the entries named in `only`, in catalog order, or all entries
/// when `only` is empty.
///
/// # Errors
///
/// Returns [`UmlgenError::Config`] naming the first unknown diagram.
pub fn select(only: &[String]) -> Result<Vec<&'static CatalogEntry>, UmlgenError> {
    if let Some(unknown) = only
        .iter()
        .find(|name| !CATALOG.iter().any(|entry| entry.name == name.as_str()))
    {
        let known: Vec<&str> = CATALOG.iter().map(|entry| entry.name).collect();
        return Err(UmlgenError::Config(format!(
            "unknown diagram `{unknown}`, expected one of: {}",
            known.join(", ")
        )));
    }

    Ok(CATALOG
        .iter()
        .filter(|entry| only.is_empty() || only.iter().any(|name| name == entry.name))
        .collect())
}
