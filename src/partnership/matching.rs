//! Donation-matching heuristic.
//!
//! A full scan of pending requests against pending donations. Both sets are
//! small (a partner portal, not a marketplace), so the quadratic pairing is
//! fine at this scale. Matches are returned to the caller, never persisted.

use chrono::Utc;
use serde::Serialize;

use crate::storage::{DonationRow, FoodRequestRow};

/// A scored request/donation pairing. Many-to-many: nothing deduplicates
/// repeated pairings of the same request or donation.
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate {
    pub request_id: String,
    pub donation_id: String,
    pub partner_id: String,
    pub match_score: i64,
    pub created_at: String,
}

/// Requested food-type tags, decoded from the JSON text column.
/// Undecodable values count as no tags rather than an error.
pub fn requested_tags(request: &FoodRequestRow) -> Vec<String> {
    serde_json::from_str(&request.requested_food_types).unwrap_or_default()
}

/// A pair is eligible when the request is high urgency, or any requested tag
/// appears (case-insensitively) inside the donation's food type.
///
/// The high-urgency branch pairs such a request with *every* pending donation
/// regardless of food type. That is the original product behavior, kept as-is
/// pending clarification (see DESIGN.md).
pub fn is_eligible(request: &FoodRequestRow, donation: &DonationRow) -> bool {
    if request.urgency_level == "high" {
        return true;
    }
    let donation_food = donation.food_type.to_lowercase();
    requested_tags(request)
        .iter()
        .any(|tag| donation_food.contains(&tag.to_lowercase()))
}

/// Leading integer of a free-text quantity ("50 kg" → 50). None when the
/// text does not start with a digit.
fn parse_quantity(text: &str) -> Option<i64> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Additive score, capped at 100:
///   +30 high urgency / +20 medium,
///   +25 per requested tag found in the donation food type,
///   +20 if donation quantity covers the request (+15 at 70% coverage).
/// Unparseable quantities contribute 0.
pub fn match_score(request: &FoodRequestRow, donation: &DonationRow) -> i64 {
    let mut score = match request.urgency_level.as_str() {
        "high" => 30,
        "medium" => 20,
        _ => 0,
    };

    let donation_food = donation.food_type.to_lowercase();
    for tag in requested_tags(request) {
        if donation_food.contains(&tag.to_lowercase()) {
            score += 25;
        }
    }

    if let (Some(requested), Some(donated)) = (
        parse_quantity(&request.quantity_needed),
        parse_quantity(&donation.quantity),
    ) {
        if donated >= requested {
            score += 20;
        } else if donated as f64 >= requested as f64 * 0.7 {
            score += 15;
        }
    }

    score.min(100)
}

/// All eligible pairings of pending requests and donations, each scored.
pub fn find_matches(requests: &[FoodRequestRow], donations: &[DonationRow]) -> Vec<MatchCandidate> {
    let mut matches = Vec::new();
    for request in requests {
        for donation in donations {
            if is_eligible(request, donation) {
                matches.push(MatchCandidate {
                    request_id: request.id.clone(),
                    donation_id: donation.id.clone(),
                    partner_id: request.partner_id.clone(),
                    match_score: match_score(request, donation),
                    created_at: Utc::now().to_rfc3339(),
                });
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(urgency: &str, tags: &[&str], quantity: &str) -> FoodRequestRow {
        FoodRequestRow {
            id: "req-1".to_string(),
            partner_id: "partner-1".to_string(),
            requested_food_types: serde_json::to_string(tags).unwrap(),
            quantity_needed: quantity.to_string(),
            urgency_level: urgency.to_string(),
            delivery_location: "depot".to_string(),
            preferred_delivery_time: None,
            beneficiary_count: 0,
            special_requirements: None,
            request_date: String::new(),
            status: "pending".to_string(),
            created_at: String::new(),
        }
    }

    fn donation(food_type: &str, quantity: &str) -> DonationRow {
        DonationRow {
            id: "don-1".to_string(),
            donor_name: "Donor".to_string(),
            donor_email: "d@d.com".to_string(),
            donor_phone: None,
            food_type: food_type.to_string(),
            quantity: quantity.to_string(),
            expiry_date: None,
            pickup_location: None,
            preferred_pickup_time: None,
            special_instructions: None,
            submission_time: String::new(),
            status: "pending".to_string(),
            created_at: String::new(),
        }
    }

    #[test]
    fn high_urgency_pairs_with_anything() {
        let req = request("high", &["rice"], "100");
        let don = donation("canned beans", "5");
        assert!(is_eligible(&req, &don));
        assert!(match_score(&req, &don) >= 30);
    }

    #[test]
    fn low_urgency_needs_a_tag_match() {
        let don = donation("fresh bread loaves", "20");
        assert!(is_eligible(&request("low", &["bread"], "10"), &don));
        assert!(!is_eligible(&request("low", &["rice"], "10"), &don));
    }

    #[test]
    fn tag_match_is_case_insensitive_substring() {
        let req = request("low", &["BREAD"], "10");
        let don = donation("Sourdough Bread", "10");
        assert!(is_eligible(&req, &don));
        assert_eq!(match_score(&req, &don), 25 + 20);
    }

    #[test]
    fn score_caps_at_100() {
        // high (30) + 3 tags (75) + full quantity (20) = 125 → 100
        let req = request("high", &["rice", "dal", "curry"], "10 kg");
        let don = donation("rice with dal curry", "50 kg");
        assert_eq!(match_score(&req, &don), 100);
    }

    #[test]
    fn medium_urgency_and_partial_quantity() {
        // medium (20) + 1 tag (25) + 70% coverage (15) = 60
        let req = request("medium", &["rice"], "100 kg");
        let don = donation("rice", "75 kg");
        assert_eq!(match_score(&req, &don), 60);
    }

    #[test]
    fn unparseable_quantities_contribute_zero() {
        let req = request("medium", &["rice"], "a few bags");
        let don = donation("rice", "plenty");
        assert_eq!(match_score(&req, &don), 45);

        // One side numeric, the other not — still no quantity bonus.
        let req = request("medium", &["rice"], "100 kg");
        let don = donation("rice", "plenty");
        assert_eq!(match_score(&req, &don), 45);
    }

    #[test]
    fn quantity_parses_leading_integer_only() {
        let req = request("low", &["rice"], "100 kg");
        let don = donation("rice", "100 bags of 5");
        assert_eq!(match_score(&req, &don), 25 + 20);
    }

    #[test]
    fn matches_are_many_to_many() {
        let requests = vec![
            request("high", &[], "10"),
            request("low", &["bread"], "10"),
        ];
        let donations = vec![donation("bread", "10"), donation("rice", "10")];
        let matches = find_matches(&requests, &donations);
        // high request pairs with both donations, low request only with bread
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|m| m.match_score >= 25));
    }

    #[test]
    fn undecodable_tag_column_counts_as_no_tags() {
        let mut req = request("low", &[], "10");
        req.requested_food_types = "not json".to_string();
        assert!(!is_eligible(&req, &donation("bread", "10")));
    }
}
