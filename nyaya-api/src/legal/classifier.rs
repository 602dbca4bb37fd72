//! Keyword classifier
//!
//! Categories are tried in a fixed order and the first one with a keyword
//! contained in the lower-cased query wins. "complaint" therefore lands in
//! `fir` before `consumer` ever sees it.

use nyaya_common::models::Category;

const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Fir,
        &[
            "fir", "police", "complaint", "theft", "crime", "report", "stolen", "attack",
            "assault", "murder", "robbery", "thana",
        ],
    ),
    (
        Category::Rti,
        &[
            "rti",
            "right to information",
            "information",
            "government",
            "public",
            "transparency",
            "disclosure",
        ],
    ),
    (
        Category::Consumer,
        &[
            "consumer", "complaint", "product", "defect", "quality", "refund", "warranty",
            "purchase",
        ],
    ),
    (
        Category::Property,
        &["property", "land", "ownership", "deed", "tenancy", "lease", "rent", "boundary"],
    ),
    (
        Category::Marriage,
        &[
            "marriage", "divorce", "alimony", "custody", "child", "maintenance", "dowry",
            "separation",
        ],
    ),
    (
        Category::Employment,
        &[
            "employment", "salary", "wage", "contract", "termination", "discrimination",
            "harassment", "leave",
        ],
    ),
];

/// Classify a free-text query into a legal category
pub fn classify_query(query_text: &str) -> Category {
    let query_lower = query_text.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| query_lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_map_to_categories() {
        assert_eq!(classify_query("Someone STOLE my bike, it was stolen"), Category::Fir);
        assert_eq!(classify_query("How do I file an RTI?"), Category::Rti);
        assert_eq!(classify_query("The product I bought is defective"), Category::Consumer);
        assert_eq!(classify_query("My landlord wants to end the lease"), Category::Property);
        assert_eq!(classify_query("Question about divorce"), Category::Marriage);
        assert_eq!(classify_query("Unpaid salary for two months"), Category::Employment);
    }

    #[test]
    fn test_first_matching_category_wins() {
        // "complaint" belongs to both fir and consumer
        assert_eq!(classify_query("consumer complaint"), Category::Fir);
    }

    #[test]
    fn test_substring_matching() {
        // "rent" inside "parents" is still a match
        assert_eq!(classify_query("my parents"), Category::Property);
    }

    #[test]
    fn test_unmatched_is_general() {
        assert_eq!(classify_query("hello there"), Category::General);
        assert_eq!(classify_query(""), Category::General);
    }
}
