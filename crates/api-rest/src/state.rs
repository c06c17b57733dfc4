//! In-memory storage behind the REST handlers.
//!
//! Prescriptions belong to the account that created them; every lookup is scoped to the caller.
//! Each account has at most one token, a random v4 UUID kept until the process exits.

use crate::config::ServerConfig;
use api_shared::{DateRange, DayCount, Prescription, PrescriptionPayload};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Owned {
    owner: String,
    record: Prescription,
}

#[derive(Debug, Default)]
struct Store {
    /// username -> password
    users: HashMap<String, String>,
    /// token -> username
    tokens: HashMap<String, String>,
    prescriptions: BTreeMap<i64, Owned>,
    next_id: i64,
}

/// Why a single-record operation found nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Missing,
    NotOwned,
}

impl Lookup {
    pub fn message(&self, id: i64) -> String {
        match self {
            Lookup::Missing => format!("Prescription not found with id: {id}"),
            Lookup::NotOwned => "Prescription does not belong to user".to_string(),
        }
    }
}

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
}

impl AppState {
    /// A fresh store with the configured admin account seeded.
    pub fn new(cfg: &ServerConfig) -> Self {
        let mut store = Store {
            next_id: 1,
            ..Store::default()
        };
        store
            .users
            .insert(cfg.admin_username.clone(), cfg.admin_password.clone());
        tracing::info!("Default admin user created: username={}", cfg.admin_username);

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns the account's token when the credentials match, issuing one on first login.
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let mut store = self.store.write().await;
        if store.users.get(username).map(String::as_str) != Some(password) {
            return None;
        }
        if let Some(token) = store
            .tokens
            .iter()
            .find_map(|(token, user)| (user == username).then(|| token.clone()))
        {
            return Some(token);
        }
        let token = uuid::Uuid::new_v4().simple().to_string();
        store.tokens.insert(token.clone(), username.to_string());
        Some(token)
    }

    pub async fn user_for_token(&self, token: &str) -> Option<String> {
        self.store.read().await.tokens.get(token).cloned()
    }

    /// The caller's prescriptions dated within `range`, ordered by date then id.
    pub async fn list(&self, owner: &str, range: &DateRange) -> Vec<Prescription> {
        let store = self.store.read().await;
        let mut items: Vec<Prescription> = store
            .prescriptions
            .values()
            .filter(|p| p.owner == owner && range.contains(p.record.prescription_date))
            .map(|p| p.record.clone())
            .collect();
        items.sort_by_key(|p| (p.prescription_date, p.id));
        items
    }

    pub async fn get(&self, owner: &str, id: i64) -> Result<Prescription, Lookup> {
        let store = self.store.read().await;
        owned(&store, owner, id).map(|p| p.record.clone())
    }

    pub async fn create(&self, owner: &str, payload: PrescriptionPayload) -> Prescription {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let record = Prescription::from_payload(id, payload);
        store.prescriptions.insert(
            id,
            Owned {
                owner: owner.to_string(),
                record: record.clone(),
            },
        );
        record
    }

    /// Replaces every field of an existing record.
    pub async fn update(
        &self,
        owner: &str,
        id: i64,
        payload: PrescriptionPayload,
    ) -> Result<Prescription, Lookup> {
        let mut store = self.store.write().await;
        owned(&store, owner, id)?;

        let record = Prescription::from_payload(id, payload);
        if let Some(entry) = store.prescriptions.get_mut(&id) {
            entry.record = record.clone();
        }
        Ok(record)
    }

    pub async fn delete(&self, owner: &str, id: i64) -> Result<(), Lookup> {
        let mut store = self.store.write().await;
        owned(&store, owner, id)?;
        store.prescriptions.remove(&id);
        Ok(())
    }

    /// Prescription counts per day with at least one record, ordered by day.
    pub async fn day_wise(&self, owner: &str, range: &DateRange) -> Vec<DayCount> {
        let store = self.store.read().await;
        let mut counts: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for p in store.prescriptions.values() {
            if p.owner == owner && range.contains(p.record.prescription_date) {
                *counts.entry(p.record.prescription_date).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(day, prescription_count)| DayCount {
                day,
                prescription_count,
            })
            .collect()
    }
}

fn owned<'a>(store: &'a Store, owner: &str, id: i64) -> Result<&'a Owned, Lookup> {
    let entry = store.prescriptions.get(&id).ok_or(Lookup::Missing)?;
    if entry.owner != owner {
        return Err(Lookup::NotOwned);
    }
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::Gender;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn payload(day: u32, name: &str) -> PrescriptionPayload {
        PrescriptionPayload {
            prescription_date: date(day),
            patient_name: name.into(),
            patient_age: 30,
            patient_gender: Gender::Other,
            diagnosis: None,
            medicines: None,
            next_visit_date: None,
        }
    }

    fn january() -> DateRange {
        DateRange::new(date(1), date(31))
    }

    #[tokio::test]
    async fn test_login_issues_token_for_seeded_admin() {
        let state = AppState::new(&ServerConfig::default());
        assert_eq!(state.login("admin", "wrong").await, None);

        let token = state.login("admin", "admin").await.unwrap();
        assert_eq!(state.user_for_token(&token).await.as_deref(), Some("admin"));
        assert_eq!(state.user_for_token("nope").await, None);
    }

    #[tokio::test]
    async fn test_repeated_login_reuses_token() {
        let state = AppState::new(&ServerConfig::default());
        let first = state.login("admin", "admin").await.unwrap();
        let second = state.login("admin", "admin").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(state.store.read().await.tokens.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_list_is_filtered() {
        let state = AppState::new(&ServerConfig::default());
        let a = state.create("admin", payload(20, "A")).await;
        let b = state.create("admin", payload(5, "B")).await;
        state
            .create("admin", PrescriptionPayload {
                prescription_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                ..payload(1, "C")
            })
            .await;

        assert_eq!((a.id, b.id), (1, 2));
        let names: Vec<_> = state
            .list("admin", &january())
            .await
            .into_iter()
            .map(|p| p.patient_name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_records_are_scoped_to_owner() {
        let state = AppState::new(&ServerConfig::default());
        let p = state.create("admin", payload(3, "A")).await;

        assert!(state.list("other", &january()).await.is_empty());
        assert_eq!(state.get("other", p.id).await, Err(Lookup::NotOwned));
        assert_eq!(state.delete("other", p.id).await, Err(Lookup::NotOwned));
        assert_eq!(state.get("admin", 99).await, Err(Lookup::Missing));
        assert_eq!(
            Lookup::Missing.message(99),
            "Prescription not found with id: 99"
        );
    }

    #[tokio::test]
    async fn test_update_replaces_and_delete_removes() {
        let state = AppState::new(&ServerConfig::default());
        let p = state.create("admin", payload(3, "A")).await;

        let updated = state.update("admin", p.id, payload(4, "A2")).await.unwrap();
        assert_eq!(updated.id, p.id);
        assert_eq!(state.get("admin", p.id).await.unwrap().patient_name, "A2");

        state.delete("admin", p.id).await.unwrap();
        assert_eq!(state.get("admin", p.id).await, Err(Lookup::Missing));
    }

    #[tokio::test]
    async fn test_day_wise_groups_by_date() {
        let state = AppState::new(&ServerConfig::default());
        state.create("admin", payload(9, "A")).await;
        state.create("admin", payload(2, "B")).await;
        state.create("admin", payload(9, "C")).await;

        let rows = state.day_wise("admin", &january()).await;
        assert_eq!(
            rows,
            vec![
                DayCount { day: date(2), prescription_count: 1 },
                DayCount { day: date(9), prescription_count: 2 },
            ]
        );
    }
}
