use serde::{Deserialize, Serialize};

/// The multi-step intake form. Field names follow the backend's camelCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    // Education
    pub education_level: String,
    pub field_of_study: String,
    pub institution: String,
    pub year_of_completion: String,

    // Career
    pub current_status: String,
    pub work_experience: String,
    pub skills: Vec<String>,

    // Interests & goals
    pub interests: Vec<String>,
    pub career_goals: String,
    pub preferred_work_environment: String,

    // Additional info
    pub preferred_work_location: String,
    pub salary_expectations: String,
    pub willing_to_relocate: bool,
}

impl ProfileForm {
    pub fn skills_summary(&self) -> String {
        self.skills.join(", ")
    }

    pub fn interests_summary(&self) -> String {
        self.interests.join(", ")
    }
}

/// Profile as the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    #[serde(default)]
    pub profile: Option<ProfileForm>,
    #[serde(default)]
    pub profile_complete: bool,
}

pub const EDUCATION_LEVELS: &[&str] = &[
    "10th Pass",
    "12th Pass",
    "Diploma",
    "Undergraduate (Pursuing)",
    "Undergraduate (Completed)",
    "Postgraduate (Pursuing)",
    "Postgraduate (Completed)",
    "PhD (Pursuing)",
    "PhD (Completed)",
    "Other",
];

pub const FIELDS_OF_STUDY: &[&str] = &[
    "Science",
    "Commerce",
    "Arts",
    "Engineering",
    "Medicine",
    "Law",
    "Business Administration",
    "Computer Applications",
    "Design",
    "Other",
];

pub const CURRENT_STATUSES: &[&str] = &[
    "Student",
    "Employed",
    "Unemployed",
    "Self-Employed",
    "Freelancer",
];

pub const INTERESTS: &[&str] = &[
    "Technology",
    "Business",
    "Healthcare",
    "Arts & Design",
    "Science & Research",
    "Education",
    "Engineering",
    "Finance",
    "Marketing",
    "Social Services",
    "Other",
];

pub const SKILLS: &[&str] = &[
    "Programming",
    "Data Analysis",
    "Graphic Design",
    "Content Writing",
    "Digital Marketing",
    "Project Management",
    "Public Speaking",
    "Research",
    "Language Proficiency",
    "Leadership",
];

/// Choice lists the intake form renders.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOptions {
    pub education_levels: &'static [&'static str],
    pub fields_of_study: &'static [&'static str],
    pub current_statuses: &'static [&'static str],
    pub interests: &'static [&'static str],
    pub skills: &'static [&'static str],
}

pub fn profile_options() -> ProfileOptions {
    ProfileOptions {
        education_levels: EDUCATION_LEVELS,
        fields_of_study: FIELDS_OF_STUDY,
        current_statuses: CURRENT_STATUSES,
        interests: INTERESTS,
        skills: SKILLS,
    }
}
