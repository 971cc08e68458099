use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scholarship {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub eligibility: &'static str,
    pub amount: &'static str,
    pub link: &'static str,
    pub category: &'static str,
}

const NSP_PORTAL: &str = "https://scholarships.gov.in";

pub const SCHOLARSHIPS: &[Scholarship] = &[
    Scholarship {
        id: "1",
        title: "Karnataka State Scholarship",
        description: "Financial assistance for students from economically weaker sections",
        eligibility: "Students studying in Karnataka institutions",
        amount: "₹10,000 - ₹50,000",
        link: NSP_PORTAL,
        category: "State Government",
    },
    Scholarship {
        id: "2",
        title: "Post Matric Scholarship for SC/ST",
        description: "Scholarship for students from SC/ST categories",
        eligibility: "SC/ST students pursuing higher education",
        amount: "₹15,000 - ₹1,00,000",
        link: NSP_PORTAL,
        category: "Central Government",
    },
    Scholarship {
        id: "3",
        title: "Merit-cum-Means Scholarship",
        description: "For meritorious students from low-income families",
        eligibility: "Minimum 60% marks, family income below ₹6 lakhs",
        amount: "₹20,000 per year",
        link: NSP_PORTAL,
        category: "Merit Based",
    },
];

impl Scholarship {
    fn matches(&self, needle: &str) -> bool {
        [self.title, self.category, self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Case-insensitive filter on title, category or description. An empty
/// query returns everything.
pub fn search(query: &str) -> Vec<&'static Scholarship> {
    let needle = query.trim().to_lowercase();
    SCHOLARSHIPS
        .iter()
        .filter(|s| needle.is_empty() || s.matches(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_all() {
        assert_eq!(search("").len(), 3);
        assert_eq!(search("   ").len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let ids = |q: &str| search(q).iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids("KARNATAKA"), ["1"]);
        assert_eq!(ids("central"), ["2"]);
        assert_eq!(ids("low-income"), ["3"]);
        assert!(ids("sports quota").is_empty());
    }
}
