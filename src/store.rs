//! Hosted-backend client: CRUD over the `shipments` table and password
//! sign-in, in the Supabase REST shape (`/rest/v1/<table>`,
//! `/auth/v1/token`). Fetches run on background threads owned by the app
//! loop; this module is the synchronous client they call into.

use crate::shipment::TrackedShipment;

const SHIPMENTS_TABLE: &str = "shipments";

/// Shipment collection load state, drained from a background fetch channel.
pub enum StoreLoadState {
    NotLoaded,
    Loading,
    Loaded(Vec<TrackedShipment>),
    Failed(String),
}

/// An authenticated backend session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub email: String,
}

pub enum AuthState {
    SignedOut,
    SigningIn,
    SignedIn(Session),
    Failed(String),
}

#[derive(Clone)]
pub struct RestStore {
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        RestStore {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: None,
        }
    }

    /// Returns a copy of this store carrying a session token; subsequent
    /// mutations run with the session's permissions.
    pub fn with_session(&self, session: &Session) -> Self {
        let mut store = self.clone();
        store.access_token = Some(session.access_token.clone());
        store
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, SHIPMENTS_TABLE)
    }

    fn row_url(&self, id: &str) -> String {
        format!("{}?id=eq.{}", self.table_url(), id)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.as_deref().unwrap_or(&self.api_key))
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        ureq::request(method, url)
            .set("apikey", &self.api_key)
            .set("Authorization", &self.bearer())
            .set("Content-Type", "application/json")
    }

    pub fn list(&self) -> Result<Vec<TrackedShipment>, String> {
        let url = format!("{}?select=*", self.table_url());
        let body = self
            .request("GET", &url)
            .call()
            .map_err(|e| format!("{}", e))?
            .into_string()
            .map_err(|e| format!("{}", e))?;
        parse_shipments(&body)
    }

    pub fn get(&self, id: &str) -> Result<TrackedShipment, String> {
        let url = format!("{}&select=*", self.row_url(id));
        let body = self
            .request("GET", &url)
            .call()
            .map_err(|e| format!("{}", e))?
            .into_string()
            .map_err(|e| format!("{}", e))?;
        parse_shipments(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| format!("no shipment with id {}", id))
    }

    pub fn create(&self, shipment: &TrackedShipment) -> Result<(), String> {
        let body = serde_json::to_string(shipment).map_err(|e| format!("{}", e))?;
        self.request("POST", &self.table_url())
            .set("Prefer", "return=minimal")
            .send_string(&body)
            .map_err(|e| format!("{}", e))?;
        Ok(())
    }

    pub fn update(&self, id: &str, shipment: &TrackedShipment) -> Result<(), String> {
        let body = serde_json::to_string(shipment).map_err(|e| format!("{}", e))?;
        self.request("PATCH", &self.row_url(id))
            .set("Prefer", "return=minimal")
            .send_string(&body)
            .map_err(|e| format!("{}", e))?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), String> {
        self.request("DELETE", &self.row_url(id))
            .call()
            .map_err(|e| format!("{}", e))?;
        Ok(())
    }

    /// Password sign-in against the backend's own auth endpoint. Credentials
    /// are never compared client-side.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, String> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let payload = serde_json::json!({ "email": email, "password": password });
        let body = ureq::post(&url)
            .set("apikey", &self.api_key)
            .set("Content-Type", "application/json")
            .send_string(&payload.to_string())
            .map_err(|e| format!("{}", e))?
            .into_string()
            .map_err(|e| format!("{}", e))?;
        parse_session(&body)
    }
}

fn parse_shipments(body: &str) -> Result<Vec<TrackedShipment>, String> {
    serde_json::from_str(body).map_err(|e| format!("{}", e))
}

fn parse_session(body: &str) -> Result<Session, String> {
    let v: serde_json::Value = serde_json::from_str(body).map_err(|e| format!("{}", e))?;
    let access_token = v["access_token"]
        .as_str()
        .ok_or("no access_token in auth response")?
        .to_string();
    let email = v["user"]["email"].as_str().unwrap_or_default().to_string();
    Ok(Session { access_token, email })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    #[test]
    fn parses_shipment_rows() {
        let body = r#"[
            {
                "id": "PRD001",
                "name": "Premium Coffee Beans",
                "origin": "Colombia",
                "destination": "New York",
                "ship": "SS Maritime Explorer",
                "status": "In Transit",
                "eta": "2025-04-20T00:00:00Z",
                "image": "",
                "coordinates": { "lat": 25.7617, "lng": -80.1918 }
            }
        ]"#;
        let rows = parse_shipments(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "PRD001");
        assert_eq!(rows[0].current_position, Some(GeoPoint::new(25.7617, -80.1918)));
    }

    #[test]
    fn parses_empty_result_set() {
        assert!(parse_shipments("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_rows() {
        assert!(parse_shipments("{\"oops\":1}").is_err());
        assert!(parse_shipments("not json").is_err());
    }

    #[test]
    fn parses_auth_session() {
        let body = r#"{"access_token":"jwt-token","token_type":"bearer","user":{"email":"ops@example.com"}}"#;
        let session = parse_session(body).unwrap();
        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.email, "ops@example.com");
    }

    #[test]
    fn rejects_auth_response_without_token() {
        assert!(parse_session(r#"{"error":"invalid_grant"}"#).is_err());
    }

    #[test]
    fn row_urls_target_single_record() {
        let store = RestStore::new("https://example.supabase.co/", "anon-key");
        assert_eq!(
            store.row_url("PRD001"),
            "https://example.supabase.co/rest/v1/shipments?id=eq.PRD001"
        );
    }
}
