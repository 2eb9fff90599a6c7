use std::collections::BTreeSet;

/// Canned reply appended to the transcript when a question is rejected.
pub const REDIRECT_REPLY: &str = "I can only help with beauty topics like skincare, \
haircare, makeup, fragrance, and building a routine with your selected products. \
What would you like to know about those?";

const TOPIC_KEYWORDS: &[&str] = &[
    "routine",
    "routines",
    "skincare",
    "skin",
    "face",
    "haircare",
    "hair",
    "scalp",
    "makeup",
    "fragrance",
    "perfume",
    "cologne",
    "beauty",
    "product",
    "products",
    "cleanser",
    "cleansing",
    "moisturizer",
    "moisturizing",
    "hydrating",
    "serum",
    "sunscreen",
    "spf",
    "toner",
    "exfoliant",
    "exfoliate",
    "retinol",
    "shampoo",
    "conditioner",
    "mask",
    "mascara",
    "lipstick",
    "foundation",
    "concealer",
    "blush",
    "brow",
    "lash",
    "acne",
    "wrinkle",
    "wrinkles",
];

/// Local allow-list check applied before any network call. Once the
/// conversation has prior accepted turns the topic is established and
/// follow-ups pass unconditionally.
pub fn is_on_topic(question: &str, prior_turns: usize) -> bool {
    if prior_turns > 0 {
        return true;
    }

    let lowered = question.to_ascii_lowercase();
    let tokens = token_set(&lowered);
    TOPIC_KEYWORDS.iter().any(|keyword| tokens.contains(keyword))
}

fn token_set(text: &str) -> BTreeSet<&str> {
    text.split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::is_on_topic;

    #[test]
    fn off_topic_question_is_rejected_before_any_turns() {
        assert!(!is_on_topic("What's the weather?", 0));
    }

    #[test]
    fn domain_keyword_passes_the_gate() {
        assert!(is_on_topic("How do I build a morning skincare routine?", 0));
        assert!(is_on_topic("Is SPF 30 enough for daily use?", 0));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert!(is_on_topic("Can I layer RETINOL with a toner?", 0));
    }

    #[test]
    fn keywords_match_whole_tokens_only() {
        // "skincare" inside another word should not count.
        assert!(!is_on_topic("tell me about skincareless things", 0));
    }

    #[test]
    fn follow_ups_pass_once_topic_is_established() {
        assert!(is_on_topic("What's the weather?", 2));
    }
}
