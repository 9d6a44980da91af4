//! Donor-facing donation submissions and intent logging.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::storage::{DonationRow, Storage};

#[derive(Debug, Deserialize)]
pub struct DonationFormData {
    pub donor_name: String,
    pub donor_email: String,
    #[serde(default)]
    pub donor_phone: Option<String>,
    pub food_type: String,
    pub quantity: String,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub preferred_pickup_time: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

pub struct DonationService {
    storage: Arc<Storage>,
}

impl DonationService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Write one pending donation row and hand back its id.
    pub async fn submit_form(&self, data: DonationFormData) -> Result<Value> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        self.storage
            .insert_donation(&DonationRow {
                id: id.clone(),
                donor_name: data.donor_name,
                donor_email: data.donor_email,
                donor_phone: data.donor_phone,
                food_type: data.food_type,
                quantity: data.quantity,
                expiry_date: data.expiry_date,
                pickup_location: data.pickup_location,
                preferred_pickup_time: data.preferred_pickup_time,
                special_instructions: data.special_instructions,
                submission_time: now.clone(),
                status: "pending".to_string(),
                created_at: now,
            })
            .await?;

        Ok(json!({
            "success": true,
            "donation_id": id,
        }))
    }

    pub async fn donations(&self, donation_id: Option<&str>) -> Result<Value> {
        let donations = self.storage.list_donations(donation_id).await?;
        Ok(json!({
            "success": true,
            "total_count": donations.len(),
            "donations": donations,
        }))
    }

    /// Log a donate-intent click and hand the donor off to the chat flow.
    pub async fn record_intent(
        &self,
        user_id: Option<String>,
        ip_address: Option<&str>,
    ) -> Result<Value> {
        let user_id = user_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        self.storage
            .log_donation_intent(&user_id, "donate_initiated", ip_address)
            .await?;

        Ok(json!({
            "success": true,
            "message": "Donation process initiated",
            "ai_chatbot_url": "/ai-chat",
            "session_id": user_id,
            "next_step": "Redirecting to AI chatbot for food safety guidance",
        }))
    }
}
