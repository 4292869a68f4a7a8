use serde::{Deserialize, Serialize};

use crate::form::input::InputRecord;
use crate::form::schema::{FieldSchema, SectionSpec};

/// Minimum share of a section's fields that must be filled for the section to count.
pub const SECTION_FILL_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionProgress {
    pub key: String,
    pub name: String,
    pub filled: usize,
    pub total: usize,
    pub missing_required: Vec<String>,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionSummary {
    pub overall_percentage: u8,
    pub filled_fields: usize,
    pub total_fields: usize,
    pub completed_sections: Vec<String>,
    pub missing_sections: Vec<String>,
    pub is_complete: bool,
    pub sections: Vec<SectionProgress>,
}

/// Scores how far a user has got through the calculator form.
///
/// Holds only the immutable schema it was built with; `score` is pure, so one
/// instance can be shared across request handlers without locking.
#[derive(Debug, Clone)]
pub struct FormCompletionScorer {
    schema: FieldSchema,
}

impl FormCompletionScorer {
    pub fn new(schema: FieldSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Fields present in `input` that no section of the schema lists.
    pub fn unknown_fields<'a>(&self, input: &'a InputRecord) -> Vec<&'a str> {
        input
            .field_names()
            .filter(|name| {
                !self
                    .schema
                    .sections
                    .iter()
                    .any(|s| s.fields.iter().any(|f| f == name))
            })
            .collect()
    }

    pub fn score(&self, input: &InputRecord) -> CompletionSummary {
        let mut filled_fields = 0;
        let mut total_fields = 0;
        let mut completed_sections = Vec::new();
        let mut missing_sections = Vec::new();
        let mut sections = Vec::with_capacity(self.schema.sections.len());

        for section in &self.schema.sections {
            let progress = score_section(section, input);
            filled_fields += progress.filled;
            total_fields += progress.total;

            if progress.complete {
                completed_sections.push(section.display_name.clone());
            } else {
                missing_sections.push(section.display_name.clone());
            }
            sections.push(progress);
        }

        let overall_percentage = if total_fields > 0 {
            ((filled_fields as f64 * 100.0) / total_fields as f64).round() as u8
        } else {
            0
        };

        CompletionSummary {
            overall_percentage,
            filled_fields,
            total_fields,
            is_complete: missing_sections.is_empty(),
            completed_sections,
            missing_sections,
            sections,
        }
    }
}

fn score_section(section: &SectionSpec, input: &InputRecord) -> SectionProgress {
    let total = section.fields.len();
    let filled = section
        .fields
        .iter()
        .filter(|f| input.is_filled(f))
        .count();

    let missing_required: Vec<String> = section
        .required
        .iter()
        .filter(|f| !input.is_filled(f))
        .cloned()
        .collect();

    // A section with no fields has no ratio and never completes.
    let ratio_met = total > 0 && (filled as f64 / total as f64) >= SECTION_FILL_THRESHOLD;

    SectionProgress {
        key: section.key.clone(),
        name: section.display_name.clone(),
        filled,
        total,
        complete: missing_required.is_empty() && ratio_met,
        missing_required,
    }
}
