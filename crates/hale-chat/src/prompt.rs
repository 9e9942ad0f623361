//! Deterministic system-prompt assembly.
//!
//! Concatenates the fixed persona text with the optional context blocks in
//! a fixed order. Omitted blocks leave no separators behind.

use hale_core::types::{CatalogProduct, HealthData, LabResult, SymptomEntry, UserProfile};

/// Fixed persona and style instructions prepended to every model call.
pub const PERSONA: &str = "You are a friendly, evidence-minded health coach. \
You specialize in hormones, energy, sleep, stress, fitness, and nutrition. \
Explain things in plain language, keep answers practical, and prefer \
lifestyle changes before supplements. Be encouraging but honest. Never \
diagnose; for anything serious, suggest speaking with a doctor.";

/// Lab results rendered in the health block, at most.
const MAX_LAB_RESULTS: usize = 10;
/// Symptom entries rendered in the health block, at most.
const MAX_SYMPTOMS: usize = 5;

/// Inputs for one prompt assembly. Everything except the persona is
/// optional.
#[derive(Default)]
pub struct PromptInput<'a> {
    pub profile: Option<&'a UserProfile>,
    pub health: Option<&'a HealthData>,
    pub products: &'a [CatalogProduct],
    pub knowledge_context: &'a str,
    pub custom_instructions: &'a str,
}

/// Assembles system prompts from persona text plus context blocks.
pub struct PersonaPromptBuilder;

impl PersonaPromptBuilder {
    /// Build the full system prompt.
    ///
    /// Block order is fixed: persona, profile, health data, catalog,
    /// retrieved knowledge, custom instructions. The order is positional,
    /// never derived from map iteration.
    pub fn build(input: &PromptInput<'_>) -> String {
        let mut sections = vec![PERSONA.to_string()];

        if let Some(profile) = input.profile {
            sections.push(profile_block(profile));
        }
        if let Some(block) = input.health.and_then(health_block) {
            sections.push(block);
        }
        if !input.products.is_empty() {
            sections.push(catalog_block(input.products));
        }
        if !input.knowledge_context.is_empty() {
            sections.push(format!(
                "Reference material relevant to the user's question:\n\n{}",
                input.knowledge_context
            ));
        }
        let instructions = input.custom_instructions.trim();
        if !instructions.is_empty() {
            sections.push(instructions.to_string());
        }

        sections.join("\n\n")
    }
}

fn profile_block(profile: &UserProfile) -> String {
    let mut lines = vec!["About the user:".to_string()];
    if let Some(name) = &profile.name {
        lines.push(format!("- Name: {}", name));
    }
    if let Some(age) = profile.age {
        lines.push(format!("- Age: {}", age));
    }
    if let Some(sex) = &profile.sex {
        lines.push(format!("- Sex: {}", sex));
    }
    if !profile.goals.is_empty() {
        lines.push(format!("- Goals: {}", profile.goals.join(", ")));
    }
    if !profile.symptoms.is_empty() {
        lines.push(format!(
            "- Reported symptoms: {}",
            profile.symptoms.join(", ")
        ));
    }
    lines.join("\n")
}

fn health_block(health: &HealthData) -> Option<String> {
    if health.lab_results.is_empty() && health.recent_symptoms.is_empty() {
        return None;
    }

    let mut lines = vec!["Recent health data:".to_string()];
    if !health.lab_results.is_empty() {
        lines.push("Lab results:".to_string());
        for lab in health.lab_results.iter().take(MAX_LAB_RESULTS) {
            lines.push(format!("- {}", render_lab(lab)));
        }
    }
    if !health.recent_symptoms.is_empty() {
        lines.push("Recent symptoms:".to_string());
        for symptom in health.recent_symptoms.iter().take(MAX_SYMPTOMS) {
            lines.push(format!("- {}", render_symptom(symptom)));
        }
    }
    Some(lines.join("\n"))
}

fn render_lab(lab: &LabResult) -> String {
    let mut line = format!("{}: {}", lab.marker, lab.value);
    if let Some(unit) = &lab.unit {
        line.push(' ');
        line.push_str(unit);
    }
    if let Some(range) = &lab.reference_range {
        line.push_str(&format!(" (reference {})", range));
    }
    if let Some(date) = lab.recorded_at {
        line.push_str(&format!(", recorded {}", date));
    }
    line
}

fn render_symptom(symptom: &SymptomEntry) -> String {
    let mut line = symptom.description.clone();
    if let Some(severity) = symptom.severity {
        line.push_str(&format!(" (severity {}/10)", severity));
    }
    if let Some(date) = symptom.recorded_at {
        line.push_str(&format!(", {}", date));
    }
    line
}

fn catalog_block(products: &[CatalogProduct]) -> String {
    let mut lines = vec!["Products available in this deployment's catalog:".to_string()];
    for product in products {
        let mut line = format!("- {}: {}", product.name, product.description);
        if !product.categories.is_empty() {
            line.push_str(&format!(" [{}]", product.categories.join(", ")));
        }
        lines.push(line);
    }
    lines.push(
        "When a product is relevant, refer to it by its exact name so it can be linked."
            .to_string(),
    );
    lines.join("\n")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn profile() -> UserProfile {
        UserProfile {
            name: Some("Sam".to_string()),
            age: Some(42),
            sex: Some("male".to_string()),
            goals: vec!["more energy".to_string()],
            symptoms: vec!["afternoon fatigue".to_string()],
        }
    }

    fn health() -> HealthData {
        HealthData {
            lab_results: vec![LabResult {
                marker: "Total Testosterone".to_string(),
                value: "412".to_string(),
                unit: Some("ng/dL".to_string()),
                reference_range: Some("300-1000".to_string()),
                recorded_at: NaiveDate::from_ymd_opt(2026, 5, 12),
            }],
            recent_symptoms: vec![SymptomEntry {
                description: "poor sleep".to_string(),
                severity: Some(6),
                recorded_at: None,
            }],
        }
    }

    fn product(name: &str) -> CatalogProduct {
        CatalogProduct {
            name: name.to_string(),
            description: "supports energy".to_string(),
            url: "https://example.com/p".to_string(),
            categories: vec!["energy".to_string()],
            benefits: vec![],
        }
    }

    // ---- Empty input ----

    #[test]
    fn test_build_empty_input_is_persona_only() {
        let prompt = PersonaPromptBuilder::build(&PromptInput::default());
        assert_eq!(prompt, PERSONA);
    }

    #[test]
    fn test_build_no_stray_separators() {
        let prompt = PersonaPromptBuilder::build(&PromptInput::default());
        assert!(!prompt.ends_with('\n'));
        assert!(!prompt.contains("\n\n\n"));
    }

    // ---- Block ordering ----

    #[test]
    fn test_build_block_order_is_fixed() {
        let profile = profile();
        let health = health();
        let products = vec![product("AlphaViril")];
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            profile: Some(&profile),
            health: Some(&health),
            products: &products,
            knowledge_context: "### Boosting Testosterone Naturally",
            custom_instructions: "Answer briefly.",
        });

        let persona_at = prompt.find("health coach").unwrap();
        let profile_at = prompt.find("About the user:").unwrap();
        let health_at = prompt.find("Recent health data:").unwrap();
        let catalog_at = prompt.find("Products available").unwrap();
        let knowledge_at = prompt.find("Reference material").unwrap();
        let custom_at = prompt.find("Answer briefly.").unwrap();

        assert!(persona_at < profile_at);
        assert!(profile_at < health_at);
        assert!(health_at < catalog_at);
        assert!(catalog_at < knowledge_at);
        assert!(knowledge_at < custom_at);
    }

    #[test]
    fn test_build_omitted_blocks_leave_no_gaps() {
        let products = vec![product("AlphaViril")];
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            products: &products,
            ..PromptInput::default()
        });
        assert!(!prompt.contains("About the user:"));
        assert!(!prompt.contains("Recent health data:"));
        assert!(!prompt.contains("\n\n\n"));
    }

    // ---- Profile block ----

    #[test]
    fn test_profile_block_fields() {
        let profile = profile();
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            profile: Some(&profile),
            ..PromptInput::default()
        });
        assert!(prompt.contains("- Name: Sam"));
        assert!(prompt.contains("- Age: 42"));
        assert!(prompt.contains("- Sex: male"));
        assert!(prompt.contains("- Goals: more energy"));
        assert!(prompt.contains("- Reported symptoms: afternoon fatigue"));
    }

    // ---- Health block ----

    #[test]
    fn test_health_block_renders_labs_and_symptoms() {
        let health = health();
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            health: Some(&health),
            ..PromptInput::default()
        });
        assert!(prompt.contains("- Total Testosterone: 412 ng/dL (reference 300-1000), recorded 2026-05-12"));
        assert!(prompt.contains("- poor sleep (severity 6/10)"));
    }

    #[test]
    fn test_health_block_limits_labs_to_ten() {
        let health = HealthData {
            lab_results: (0..15)
                .map(|i| LabResult {
                    marker: format!("Marker{}", i),
                    value: "1".to_string(),
                    unit: None,
                    reference_range: None,
                    recorded_at: None,
                })
                .collect(),
            recent_symptoms: vec![],
        };
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            health: Some(&health),
            ..PromptInput::default()
        });
        assert!(prompt.contains("Marker9"));
        assert!(!prompt.contains("Marker10"));
    }

    #[test]
    fn test_health_block_limits_symptoms_to_five() {
        let health = HealthData {
            lab_results: vec![],
            recent_symptoms: (0..8)
                .map(|i| SymptomEntry {
                    description: format!("symptom{}", i),
                    severity: None,
                    recorded_at: None,
                })
                .collect(),
        };
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            health: Some(&health),
            ..PromptInput::default()
        });
        assert!(prompt.contains("symptom4"));
        assert!(!prompt.contains("symptom5"));
    }

    #[test]
    fn test_empty_health_data_omits_block() {
        let health = HealthData::default();
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            health: Some(&health),
            ..PromptInput::default()
        });
        assert_eq!(prompt, PERSONA);
    }

    // ---- Catalog block ----

    #[test]
    fn test_catalog_block_lists_products_and_exact_name_rule() {
        let products = vec![product("AlphaViril"), product("Body-Brain Energy")];
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            products: &products,
            ..PromptInput::default()
        });
        assert!(prompt.contains("- AlphaViril: supports energy [energy]"));
        assert!(prompt.contains("- Body-Brain Energy:"));
        assert!(prompt.contains("exact name"));
    }

    // ---- Custom instructions ----

    #[test]
    fn test_whitespace_instructions_are_omitted() {
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            custom_instructions: "   \n  ",
            ..PromptInput::default()
        });
        assert_eq!(prompt, PERSONA);
    }

    #[test]
    fn test_knowledge_context_included_verbatim() {
        let prompt = PersonaPromptBuilder::build(&PromptInput {
            knowledge_context: "### Sleep Tips\nSource: https://example.com/sleep",
            ..PromptInput::default()
        });
        assert!(prompt.contains("### Sleep Tips"));
        assert!(prompt.contains("Source: https://example.com/sleep"));
    }

    // ---- Determinism ----

    #[test]
    fn test_build_is_deterministic() {
        let profile = profile();
        let health = health();
        let products = vec![product("AlphaViril")];
        let input = PromptInput {
            profile: Some(&profile),
            health: Some(&health),
            products: &products,
            knowledge_context: "ctx",
            custom_instructions: "rules",
        };
        assert_eq!(
            PersonaPromptBuilder::build(&input),
            PersonaPromptBuilder::build(&input)
        );
    }
}
