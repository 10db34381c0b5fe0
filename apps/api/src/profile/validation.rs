use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::profile::models::ProfileForm;

/// Field name (camelCase, as the form knows it) → message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStep {
    Education,
    Career,
    InterestsAndGoals,
    AdditionalInfo,
}

impl ProfileStep {
    pub const ALL: [ProfileStep; 4] = [
        ProfileStep::Education,
        ProfileStep::Career,
        ProfileStep::InterestsAndGoals,
        ProfileStep::AdditionalInfo,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileStep::Education => "Education",
            ProfileStep::Career => "Career",
            ProfileStep::InterestsAndGoals => "Interests & Goals",
            ProfileStep::AdditionalInfo => "Additional Info",
        }
    }
}

/// Validates the fields one step of the form owns.
pub fn validate_step(form: &ProfileForm, step: ProfileStep) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        ProfileStep::Education => {
            require(
                &mut errors,
                "educationLevel",
                &form.education_level,
                "Education level is required",
            );
            require(
                &mut errors,
                "fieldOfStudy",
                &form.field_of_study,
                "Field of study is required",
            );
            require(
                &mut errors,
                "institution",
                &form.institution,
                "Institution name is required",
            );
        }
        ProfileStep::Career => {
            require(
                &mut errors,
                "currentStatus",
                &form.current_status,
                "Current status is required",
            );
            if form.skills.is_empty() {
                errors.insert(
                    "skills".to_string(),
                    "Please select at least one skill".to_string(),
                );
            }
        }
        ProfileStep::InterestsAndGoals => {
            if form.interests.is_empty() {
                errors.insert(
                    "interests".to_string(),
                    "Please select at least one interest".to_string(),
                );
            }
            if form.career_goals.trim().is_empty() {
                errors.insert(
                    "careerGoals".to_string(),
                    "Career goals are required".to_string(),
                );
            }
        }
        ProfileStep::AdditionalInfo => {}
    }

    errors
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

/// Validates every step; used before the profile is saved.
pub fn validate_all(form: &ProfileForm) -> FieldErrors {
    ProfileStep::ALL
        .iter()
        .flat_map(|step| validate_step(form, *step))
        .collect()
}
