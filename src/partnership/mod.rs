//! Partner, food-request, and partnership records, plus donation matching.

pub mod matching;

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::ImpactConfig;
use crate::storage::{FoodRequestRow, PartnerRow, PartnershipRow, Storage};

#[derive(Debug, Deserialize)]
pub struct PartnerRegistrationData {
    pub organization_name: String,
    pub email: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub service_areas: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FoodRequestData {
    pub partner_id: String,
    #[serde(default)]
    pub requested_food_types: Vec<String>,
    pub quantity_needed: String,
    #[serde(default = "default_urgency")]
    pub urgency_level: String,
    pub delivery_location: String,
    #[serde(default)]
    pub preferred_delivery_time: Option<String>,
    #[serde(default)]
    pub beneficiary_count: i64,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

fn default_urgency() -> String {
    "medium".to_string()
}

/// Decode a JSON text column into a Value, defaulting rather than failing.
fn json_column(text: &str, fallback: Value) -> Value {
    serde_json::from_str(text).unwrap_or(fallback)
}

fn partner_json(row: &PartnerRow) -> Value {
    json!({
        "id": row.id,
        "organization_name": row.organization_name,
        "contact_person": row.contact_person,
        "email": row.email,
        "phone": row.phone,
        "address": row.address,
        "city": row.city,
        "state": row.state,
        "registration_number": row.registration_number,
        "focus_areas": json_column(&row.focus_areas, json!([])),
        "capacity": row.capacity,
        "service_areas": json_column(&row.service_areas, json!([])),
        "registration_date": row.registration_date,
        "status": row.status,
        "verified": row.verified,
        "created_at": row.created_at,
    })
}

fn partnership_json(row: &PartnershipRow) -> Value {
    json!({
        "id": row.id,
        "name": row.name,
        "type": row.partnership_type,
        "description": row.description,
        "partner_id": row.partner_id,
        "start_date": row.start_date,
        "status": row.status,
        "impact_metrics": json_column(&row.impact_metrics, json!({})),
        "created_at": row.created_at,
    })
}

pub struct PartnershipService {
    storage: Arc<Storage>,
    impact: ImpactConfig,
}

impl PartnershipService {
    pub fn new(storage: Arc<Storage>, impact: ImpactConfig) -> Self {
        Self { storage, impact }
    }

    /// Marketing overview: partnership list, partner count, headline stats.
    pub async fn overview(&self) -> Result<Value> {
        let partnerships = self.storage.list_partnerships().await?;
        let total_partners = self.storage.count_partners().await?;

        Ok(json!({
            "success": true,
            "message": "Building Partnerships for Food Security",
            "description": "Together with our NGO partners, we're creating a sustainable network to combat food waste and hunger across India.",
            "total_partners": total_partners,
            "partnerships": partnerships.iter().map(partnership_json).collect::<Vec<_>>(),
            "impact_stats": {
                "food_distributed": self.impact.food_distributed,
                "partners_active": total_partners,
                "communities_served": self.impact.communities_served,
                "waste_reduced": self.impact.waste_reduced,
            },
        }))
    }

    pub async fn partners(&self) -> Result<Value> {
        let partners = self.storage.list_partners().await?;
        Ok(json!({
            "success": true,
            "partners": partners.iter().map(partner_json).collect::<Vec<_>>(),
            "total_count": partners.len(),
        }))
    }

    /// Register a partner: fresh id, pending verification, unverified.
    pub async fn register_partner(&self, data: PartnerRegistrationData) -> Result<Value> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        self.storage
            .insert_partner(&PartnerRow {
                id: id.clone(),
                organization_name: data.organization_name,
                contact_person: data.contact_person,
                email: data.email,
                phone: data.phone,
                address: data.address,
                city: data.city,
                state: data.state,
                registration_number: data.registration_number,
                focus_areas: serde_json::to_string(&data.focus_areas)?,
                capacity: data.capacity,
                service_areas: serde_json::to_string(&data.service_areas)?,
                registration_date: now.clone(),
                status: "pending_verification".to_string(),
                verified: false,
                created_at: now,
            })
            .await?;

        Ok(json!({
            "success": true,
            "partner_id": id,
            "status": "pending_verification",
        }))
    }

    /// Look up a partner by email and append a login-attempt audit row.
    ///
    /// No password verification happens here — the original logged the
    /// attempt and handed back a fresh session token.
    pub async fn partner_login(&self, email: &str, ip_address: Option<&str>) -> Result<Value> {
        let Some(partner) = self.storage.get_partner_by_email(email).await? else {
            bail!("Partner not found");
        };

        self.storage
            .log_partner_login(email, "success", ip_address)
            .await?;

        Ok(json!({
            "success": true,
            "partner": {
                "id": partner.id,
                "organization_name": partner.organization_name,
                "contact_person": partner.contact_person,
                "verified": partner.verified,
                "status": partner.status,
            },
            "session_token": Uuid::new_v4().to_string(),
        }))
    }

    pub async fn create_food_request(&self, data: FoodRequestData) -> Result<Value> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        self.storage
            .insert_food_request(&FoodRequestRow {
                id: id.clone(),
                partner_id: data.partner_id,
                requested_food_types: serde_json::to_string(&data.requested_food_types)?,
                quantity_needed: data.quantity_needed,
                urgency_level: data.urgency_level,
                delivery_location: data.delivery_location,
                preferred_delivery_time: data.preferred_delivery_time,
                beneficiary_count: data.beneficiary_count,
                special_requirements: data.special_requirements,
                request_date: now.clone(),
                status: "pending".to_string(),
                created_at: now,
            })
            .await?;

        Ok(json!({
            "success": true,
            "request_id": id,
        }))
    }

    pub async fn food_requests(&self, partner_id: Option<&str>) -> Result<Value> {
        let requests = self.storage.list_food_requests(partner_id).await?;
        let list: Vec<Value> = requests
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "partner_id": r.partner_id,
                    "requested_food_types": json_column(&r.requested_food_types, json!([])),
                    "quantity_needed": r.quantity_needed,
                    "urgency_level": r.urgency_level,
                    "delivery_location": r.delivery_location,
                    "preferred_delivery_time": r.preferred_delivery_time,
                    "beneficiary_count": r.beneficiary_count,
                    "special_requirements": r.special_requirements,
                    "request_date": r.request_date,
                    "status": r.status,
                    "created_at": r.created_at,
                })
            })
            .collect();
        Ok(json!({
            "success": true,
            "requests": list,
            "total_count": list.len(),
        }))
    }

    /// Scan pending requests against pending donations and return the scored
    /// pairings. Nothing is written back.
    pub async fn match_donations(&self) -> Result<Value> {
        let requests = self.storage.list_pending_food_requests().await?;
        let donations = self.storage.list_pending_donations().await?;

        let matches = matching::find_matches(&requests, &donations);
        Ok(json!({
            "success": true,
            "total_matches": matches.len(),
            "matches": matches,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn make_service() -> PartnershipService {
        let dir = tempfile::tempdir().unwrap().keep();
        let storage = Arc::new(Storage::new(&dir).await.unwrap());
        PartnershipService::new(storage, ImpactConfig::default())
    }

    fn registration(email: &str) -> PartnerRegistrationData {
        serde_json::from_value(json!({
            "organization_name": "X",
            "email": email,
            "focus_areas": ["bread"],
            "service_areas": ["city"],
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn register_then_list_shows_unverified_partner() {
        let service = make_service().await;

        let reply = service.register_partner(registration("x@x.com")).await.unwrap();
        assert_eq!(reply["success"], json!(true));
        assert_eq!(reply["status"], json!("pending_verification"));
        assert!(reply["partner_id"].as_str().unwrap().len() > 0);

        let partners = service.partners().await.unwrap();
        assert_eq!(partners["total_count"], json!(1));
        let entry = &partners["partners"][0];
        assert_eq!(entry["verified"], json!(false));
        assert_eq!(entry["focus_areas"], json!(["bread"]));
    }

    #[tokio::test]
    async fn login_returns_summary_and_token() {
        let service = make_service().await;
        service.register_partner(registration("y@y.com")).await.unwrap();

        let reply = service.partner_login("y@y.com", Some("1.2.3.4")).await.unwrap();
        assert_eq!(reply["success"], json!(true));
        assert_eq!(reply["partner"]["organization_name"], json!("X"));
        assert!(reply["session_token"].as_str().unwrap().len() > 0);

        assert!(service.partner_login("nobody@x.com", None).await.is_err());
    }

    #[tokio::test]
    async fn food_request_and_match_flow() {
        let service = make_service().await;
        let partner = service.register_partner(registration("z@z.com")).await.unwrap();
        let partner_id = partner["partner_id"].as_str().unwrap().to_string();

        let created = service
            .create_food_request(
                serde_json::from_value(json!({
                    "partner_id": partner_id,
                    "requested_food_types": ["bread"],
                    "quantity_needed": "20 loaves",
                    "urgency_level": "low",
                    "delivery_location": "warehouse 4",
                }))
                .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(created["success"], json!(true));

        let listed = service.food_requests(Some(&partner_id)).await.unwrap();
        assert_eq!(listed["total_count"], json!(1));
        assert_eq!(listed["requests"][0]["urgency_level"], json!("low"));

        // No pending donations yet: the scan finds nothing.
        let matches = service.match_donations().await.unwrap();
        assert_eq!(matches["total_matches"], json!(0));
    }

    #[tokio::test]
    async fn overview_reports_counts_and_stats() {
        let service = make_service().await;
        service.register_partner(registration("o@o.com")).await.unwrap();

        let overview = service.overview().await.unwrap();
        assert_eq!(overview["success"], json!(true));
        assert_eq!(overview["total_partners"], json!(1));
        assert_eq!(overview["impact_stats"]["partners_active"], json!(1));
        assert_eq!(overview["impact_stats"]["waste_reduced"], json!("85%"));
    }
}
