//! Static catalog data: education levels, streams, interest domains and the
//! career → cluster map.

use serde::Serialize;

// ============================================================
// EDUCATION LEVELS
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EducationLevel {
    pub code: &'static str,
    pub label: &'static str,
}

pub const EDUCATION_LEVELS: &[EducationLevel] = &[
    EducationLevel { code: "sslc", label: "SSLC (10th)" },
    EducationLevel { code: "puc", label: "PUC (11th–12th)" },
    EducationLevel { code: "diploma", label: "Diploma" },
    EducationLevel { code: "bachelor", label: "Bachelor’s Degree" },
    EducationLevel { code: "master", label: "Master’s Degree" },
    EducationLevel { code: "other", label: "Other" },
];

pub fn education_level(code: &str) -> Option<&'static EducationLevel> {
    EDUCATION_LEVELS.iter().find(|level| level.code == code)
}

pub const GENDERS: &[&str] = &["male", "female", "other"];

// ============================================================
// STREAMS
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamGroup {
    pub name: &'static str,
    pub streams: &'static [(&'static str, &'static str)],
}

pub const STREAM_GROUPS: &[StreamGroup] = &[
    StreamGroup {
        name: "PUC Streams",
        streams: &[
            ("pcm", "PCM (Physics, Chemistry, Maths)"),
            ("pcmb", "PCMB (Physics, Chemistry, Maths, Biology)"),
            ("pcmc", "PCMC (Physics, Chemistry, Maths, Computer Science)"),
            ("pcb", "PCB (Physics, Chemistry, Biology)"),
            ("commerce", "Commerce"),
            ("arts", "Arts/Humanities"),
        ],
    },
    StreamGroup {
        name: "Diploma & UG Streams",
        streams: &[
            ("cs", "Computer Science (CS)"),
            ("it", "Information Technology (IT)"),
            ("mech", "Mechanical Engineering (MECH)"),
            ("civil", "Civil Engineering"),
            ("ece", "Electronics & Communication (ECE)"),
            ("eee", "Electrical & Electronics (EEE)"),
            ("biotech", "Biotechnology"),
            ("bba", "BBA (Business Administration)"),
            ("bcom", "B.Com (Commerce)"),
            ("ba", "BA (Arts/Humanities)"),
        ],
    },
    StreamGroup {
        name: "General Options",
        streams: &[("no_stream", "No Specific Stream"), ("other", "Other")],
    },
];

/// Display label for a stream code, searching every group in order.
pub fn stream_label(code: &str) -> Option<&'static str> {
    STREAM_GROUPS
        .iter()
        .flat_map(|group| group.streams.iter())
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

pub fn all_stream_codes() -> impl Iterator<Item = &'static str> {
    STREAM_GROUPS
        .iter()
        .flat_map(|group| group.streams.iter().map(|(code, _)| *code))
}

// ============================================================
// INTEREST DOMAINS
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterestDomain {
    pub name: &'static str,
    pub interests: &'static [&'static str],
}

pub const INTEREST_DOMAINS: &[InterestDomain] = &[
    InterestDomain {
        name: "Creative & Arts",
        interests: &[
            "drawing", "painting", "crafting", "photography", "videography", "graphic_design",
            "content_writing", "storytelling", "singing", "dancing", "music_production",
        ],
    },
    InterestDomain {
        name: "Technology & Computers",
        interests: &[
            "coding", "programming", "problem_solving", "robotics", "machine_learning", "ai",
            "web_development", "app_development", "data_analysis", "cybersecurity",
        ],
    },
    InterestDomain {
        name: "Academic & Research",
        interests: &[
            "reading", "maths", "physics", "chemistry", "biology", "research", "experiments",
            "teaching", "tutoring",
        ],
    },
    InterestDomain {
        name: "Social & Community",
        interests: &[
            "volunteering", "social_service", "community_work", "ngo", "counselling",
            "public_speaking", "leadership",
        ],
    },
    InterestDomain {
        name: "Medicine & Health",
        interests: &["healthcare", "first_aid", "human_biology", "medical_research"],
    },
    InterestDomain {
        name: "Business & Management",
        interests: &[
            "entrepreneurship", "marketing", "finance", "sales", "team_management",
            "organizing_events",
        ],
    },
    InterestDomain {
        name: "Engineering / Technical",
        interests: &["mechanics", "electronics", "circuit_design", "automobile", "hardware", "tinkering"],
    },
    InterestDomain {
        name: "Agriculture & Environment",
        interests: &["farming", "gardening", "environment", "sustainability", "animal_care"],
    },
    InterestDomain {
        name: "Law & Government",
        interests: &["law", "civil_services", "political_science", "justice"],
    },
    InterestDomain {
        name: "Sports & Defence",
        interests: &["sports", "athletics", "fitness", "martial_arts", "defence"],
    },
];

pub fn is_known_interest(tag: &str) -> bool {
    INTEREST_DOMAINS
        .iter()
        .any(|domain| domain.interests.contains(&tag))
}

/// `graphic_design` → `Graphic design`
pub fn interest_label(tag: &str) -> String {
    let spaced = tag.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================
// CAREER → CLUSTER MAP
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareerEntry {
    pub title_code: &'static str,
    pub title_label: &'static str,
    pub cluster_code: &'static str,
    pub cluster_label: &'static str,
    /// Interest tags and skill words that point at this career
    pub keywords: &'static [&'static str],
}

const SKILLED_TRADES: (&str, &str) = ("skilled_trades", "Skilled Trades & Vocational");
const HEALTHCARE: (&str, &str) = ("healthcare", "Healthcare & Medicine");
const HOSPITALITY: (&str, &str) = ("hospitality", "Hospitality & Tourism");
const LAW_PUBLIC: (&str, &str) = ("law_public", "Law, Civil & Public Services");
const IT_AI: (&str, &str) = ("it_ai", "Information Technology & AI");
const ARTS_MEDIA: (&str, &str) = ("arts_media", "Arts, Design & Media");
const EDUCATION: (&str, &str) = ("education", "Education & Training");
const AGRICULTURE: (&str, &str) = ("agriculture", "Agriculture & Environment");
const BUSINESS: (&str, &str) = ("business", "Business, Management & Finance");
const ENGINEERING: (&str, &str) = ("engineering", "Engineering & Technology");
const SPORTS_DEFENCE: (&str, &str) = ("sports_defence", "Sports, Fitness & Defence");
const ENTREPRENEURSHIP: (&str, &str) = ("entrepreneurship", "Entrepreneurship & Startups");

macro_rules! career {
    ($code:literal, $label:literal, $cluster:expr, [$($kw:literal),* $(,)?]) => {
        CareerEntry {
            title_code: $code,
            title_label: $label,
            cluster_code: $cluster.0,
            cluster_label: $cluster.1,
            keywords: &[$($kw),*],
        }
    };
}

pub const CAREERS: &[CareerEntry] = &[
    career!("tailor", "Tailor", SKILLED_TRADES, ["crafting", "stitching", "fashion", "design"]),
    career!("pharmacist", "Pharmacist", HEALTHCARE, ["chemistry", "healthcare", "biology", "medicine"]),
    career!("hotel_manager", "Hotel Manager", HOSPITALITY, ["organizing_events", "team_management", "leadership", "hospitality"]),
    career!("police_officer", "Police Officer", LAW_PUBLIC, ["justice", "law", "fitness", "defence", "civil_services"]),
    career!("electrician", "Electrician", SKILLED_TRADES, ["electronics", "wiring", "hardware", "tinkering"]),
    career!("data_scientist", "Data Scientist", IT_AI, ["data_analysis", "machine_learning", "maths", "ai", "python", "statistics"]),
    career!("nurse", "Nurse", HEALTHCARE, ["healthcare", "first_aid", "human_biology", "caring"]),
    career!("content_writer", "Content Writer", ARTS_MEDIA, ["content_writing", "storytelling", "reading", "writing"]),
    career!("cybersecurity_analyst", "Cybersecurity Analyst", IT_AI, ["cybersecurity", "coding", "networking", "problem_solving"]),
    career!("college_professor", "College Professor", EDUCATION, ["teaching", "research", "reading", "public_speaking"]),
    career!("organic_farmer", "Organic Farmer", AGRICULTURE, ["farming", "sustainability", "environment", "gardening"]),
    career!("graphic_designer", "Graphic Designer", ARTS_MEDIA, ["graphic_design", "drawing", "painting", "design", "photoshop"]),
    career!("journalist", "Journalist", ARTS_MEDIA, ["content_writing", "storytelling", "public_speaking", "political_science"]),
    career!("marketing_executive", "Marketing Executive", BUSINESS, ["marketing", "sales", "communication", "public_speaking"]),
    career!("photographer", "Photographer", ARTS_MEDIA, ["photography", "videography", "editing"]),
    career!("hr_manager", "HR Manager", BUSINESS, ["team_management", "counselling", "leadership", "communication"]),
    career!("tutor", "Tutor / Coaching Instructor", EDUCATION, ["tutoring", "teaching", "maths", "physics"]),
    career!("financial_analyst", "Financial Analyst", BUSINESS, ["finance", "maths", "data_analysis", "excel", "accounting"]),
    career!("mechanic", "Mechanic", SKILLED_TRADES, ["mechanics", "automobile", "tinkering", "repair"]),
    career!("civil_engineer", "Civil Engineer", ENGINEERING, ["maths", "physics", "construction", "design"]),
    career!("mechanical_engineer", "Mechanical Engineer", ENGINEERING, ["mechanics", "physics", "automobile", "cad"]),
    career!("data_analyst", "Data Analyst", IT_AI, ["data_analysis", "maths", "excel", "sql", "statistics"]),
    career!("chef", "Chef", HOSPITALITY, ["cooking", "crafting", "food"]),
    career!("ias_officer", "IAS/IPS Officer", LAW_PUBLIC, ["civil_services", "political_science", "leadership", "law"]),
    career!("fitness_trainer", "Fitness Trainer", SPORTS_DEFENCE, ["fitness", "sports", "athletics"]),
    career!("army_personnel", "Army / Defence Personnel", SPORTS_DEFENCE, ["defence", "fitness", "martial_arts", "athletics"]),
    career!("electrical_engineer", "Electrical Engineer", ENGINEERING, ["electronics", "circuit_design", "physics", "hardware"]),
    career!("tour_guide", "Tour Guide", HOSPITALITY, ["storytelling", "public_speaking", "travel", "languages"]),
    career!("pu_lecturer", "PU Lecturer", EDUCATION, ["teaching", "physics", "chemistry", "biology", "maths"]),
    career!("physiotherapist", "Physiotherapist", HEALTHCARE, ["human_biology", "fitness", "healthcare", "sports"]),
    career!("mobile_app_developer", "Mobile App Developer", IT_AI, ["app_development", "coding", "programming", "kotlin", "flutter"]),
    career!("freelancer", "Freelancer / Consultant", ENTREPRENEURSHIP, ["entrepreneurship", "content_writing", "graphic_design", "sales"]),
    career!("social_worker", "Social Worker", LAW_PUBLIC, ["social_service", "volunteering", "ngo", "community_work", "counselling"]),
    career!("horticulturist", "Horticulturist", AGRICULTURE, ["gardening", "biology", "environment", "farming"]),
    career!("software_engineer", "Software Engineer", ENGINEERING, ["coding", "programming", "problem_solving", "web_development", "java", "python"]),
    career!("chartered_accountant", "Chartered Accountant", BUSINESS, ["finance", "accounting", "maths", "tax"]),
    career!("startup_founder", "Startup Founder", ENTREPRENEURSHIP, ["entrepreneurship", "leadership", "marketing", "team_management"]),
    career!("embedded_engineer", "Embedded Systems Engineer", ENGINEERING, ["electronics", "circuit_design", "robotics", "coding", "hardware"]),
    career!("sports_coach", "Sports Coach", SPORTS_DEFENCE, ["sports", "athletics", "leadership", "fitness"]),
    career!("lab_technician", "Lab Technician", HEALTHCARE, ["experiments", "chemistry", "biology", "medical_research"]),
    career!("school_teacher", "School Teacher", EDUCATION, ["teaching", "tutoring", "reading", "storytelling"]),
    career!("doctor_mbbs", "Doctor (MBBS)", HEALTHCARE, ["healthcare", "human_biology", "biology", "medical_research", "first_aid"]),
    career!("lawyer", "Lawyer / Advocate", LAW_PUBLIC, ["law", "justice", "public_speaking", "reading"]),
    career!("ml_engineer", "Machine Learning Engineer", IT_AI, ["machine_learning", "ai", "coding", "maths", "python"]),
    career!("carpenter", "Carpenter", SKILLED_TRADES, ["crafting", "tinkering", "woodwork"]),
    career!("video_editor", "Video Producer / Editor", ARTS_MEDIA, ["videography", "music_production", "editing", "storytelling"]),
    career!("agricultural_scientist", "Agricultural Scientist", AGRICULTURE, ["farming", "research", "biology", "experiments", "sustainability"]),
];

pub fn career(title_code: &str) -> Option<&'static CareerEntry> {
    CAREERS.iter().find(|c| c.title_code == title_code)
}

/// Human label for a title code, title-casing the code when unknown.
pub fn career_label(title_code: &str) -> String {
    match career(title_code) {
        Some(entry) => entry.title_label.to_string(),
        None => title_code
            .split('_')
            .filter(|w| !w.is_empty())
            .map(interest_label)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn career_codes_are_unique() {
        let codes: HashSet<_> = CAREERS.iter().map(|c| c.title_code).collect();
        assert_eq!(codes.len(), CAREERS.len());
    }

    #[test]
    fn stream_lookup_searches_all_groups() {
        assert_eq!(stream_label("pcmb"), Some("PCMB (Physics, Chemistry, Maths, Biology)"));
        assert_eq!(stream_label("ece"), Some("Electronics & Communication (ECE)"));
        assert_eq!(stream_label("no_stream"), Some("No Specific Stream"));
        assert_eq!(stream_label("astronomy"), None);
    }

    #[test]
    fn labels_for_unknown_codes_are_title_cased() {
        assert_eq!(career_label("ml_engineer"), "Machine Learning Engineer");
        assert_eq!(career_label("space_pilot"), "Space Pilot");
        assert_eq!(interest_label("graphic_design"), "Graphic design");
    }

    #[test]
    fn interest_catalog_lookup() {
        assert!(is_known_interest("robotics"));
        assert!(!is_known_interest("skydiving"));
        assert!(education_level("diploma").is_some());
    }
}
