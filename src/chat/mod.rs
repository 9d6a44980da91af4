//! Rule-based food-safety chat responder.
//!
//! First-match-wins dispatch over a fixed, ordered keyword rule list. No
//! model, no context across turns — every reply is one of the canned strings
//! below, chosen by case-insensitive substring match.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use crate::storage::Storage;

const SAFETY_OVERVIEW: &str = "I can help you with food safety guidelines! Here are the key points: Food must be within expiry date, prepared food should be donated within 2 hours, keep food at proper temperature, and package food securely. What specific food safety question do you have?";

const EXPIRY_WINDOW: &str = "Food donations must be within their expiry date. For prepared foods, they should be donated within 2 hours of preparation. Please check the expiry date on packaged foods before donating.";

const TEMPERATURE_THRESHOLDS: &str = "Temperature control is crucial! Keep cold foods below 40\u{b0}F (4\u{b0}C) and hot foods above 140\u{b0}F (60\u{b0}C). If you're unsure about temperature safety, it's better to be cautious.";

const PACKAGING: &str = "Please package food securely to prevent contamination. Use clean containers, seal properly, and label with preparation time if applicable. Original packaging is preferred when possible.";

const DONATION_INTENT: &str = "I'm here to help you donate food safely! I can guide you through our food safety guidelines and help you prepare your donation. What type of food are you looking to donate?";

const GREETING: &str = "Hello! Welcome to FoodShare AI. I'm here to help you donate surplus food safely and efficiently. How can I assist you with your food donation today?";

const FALLBACK: &str = "I'm here to help you with food donations and safety guidelines. You can ask me about food safety, expiry dates, proper packaging, or temperature requirements. How can I assist you?";

/// Ordered (keywords, response) rules. Order is load-bearing: a message
/// matching several rules gets the first one's response.
const RESPONSE_RULES: &[(&[&str], &str)] = &[
    (&["food safety", "safe"], SAFETY_OVERVIEW),
    (&["expiry", "expire"], EXPIRY_WINDOW),
    (&["temperature", "cold", "hot"], TEMPERATURE_THRESHOLDS),
    (&["packaging", "package"], PACKAGING),
    (&["donate", "donation"], DONATION_INTENT),
    (&["hello", "hi"], GREETING),
];

/// Pick the canned response for a message: first matching rule wins,
/// generic fallback otherwise.
pub fn generate_response(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    for (keywords, response) in RESPONSE_RULES {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return response;
        }
    }
    FALLBACK
}

#[derive(Debug, Clone, Serialize)]
pub struct Guideline {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// The canonical five-item guideline list shown alongside chat replies.
pub fn food_safety_guidelines() -> Vec<Guideline> {
    vec![
        Guideline {
            title: "Food must be within expiry date",
            description: "Check all expiry dates before donating",
            icon: "\u{26a0}\u{fe0f}",
        },
        Guideline {
            title: "Prepared food should be donated within 2 hours",
            description: "Freshly prepared food has a 2-hour window for safe donation",
            icon: "\u{23f0}",
        },
        Guideline {
            title: "Keep food at proper temperature",
            description: "Cold foods below 40\u{b0}F, hot foods above 140\u{b0}F",
            icon: "\u{1f321}\u{fe0f}",
        },
        Guideline {
            title: "Package food securely",
            description: "Use clean containers and proper sealing",
            icon: "\u{1f4e6}",
        },
        Guideline {
            title: "Label with preparation time if applicable",
            description: "Include preparation time for homemade items",
            icon: "\u{1f3f7}\u{fe0f}",
        },
    ]
}

/// Shorter list served when no database is configured (demo mode).
pub fn demo_guidelines() -> Vec<Guideline> {
    vec![
        Guideline {
            title: "Temperature Control",
            description: "Keep food at proper temperature during transport",
            icon: "\u{1f321}\u{fe0f}",
        },
        Guideline {
            title: "Expiry Check",
            description: "Ensure food is within expiry date",
            icon: "\u{1f4c5}",
        },
        Guideline {
            title: "Proper Packaging",
            description: "Package food securely to prevent contamination",
            icon: "\u{1f4e6}",
        },
        Guideline {
            title: "Clean Handling",
            description: "Use clean utensils and containers",
            icon: "\u{1f9e4}",
        },
    ]
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
    pub session_id: String,
    pub guidelines: Vec<Guideline>,
}

pub struct ChatService {
    storage: Arc<Storage>,
}

impl ChatService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Persist the message, pick a response, persist that too.
    ///
    /// A failed log write propagates to the caller as a generic failure — the
    /// reply is only returned once both rows are on disk.
    pub async fn handle_chat(
        &self,
        message: &str,
        session_id: Option<String>,
        ip_address: Option<&str>,
    ) -> Result<ChatReply> {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        self.storage
            .log_chat_interaction(&session_id, message, ip_address)
            .await?;

        let response = generate_response(message);
        self.storage.log_ai_response(&session_id, response).await?;

        Ok(ChatReply {
            success: true,
            response: response.to_string(),
            session_id,
            guidelines: food_safety_guidelines(),
        })
    }
}
