//! Scenario files: registrations plus an ordered list of payment events.
//!
//! ```json
//! {
//!   "users": ["alice", "bob", "carol"],
//!   "resources": ["post-1"],
//!   "upvoters": { "post-1": ["bob"] },
//!   "events": [
//!     { "kind": "upvote", "user": "alice", "payment": "1", "resource": "post-1" },
//!     { "kind": "view", "user": "carol", "payment": "1", "resource": "post-1" }
//!   ]
//! }
//! ```
//!
//! `upvoters` is optional and restores existing upvoter lists in arrival
//! order; its keys are registered as resources too.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use yem_brain::{Event, PlatformConfig, PlatformState};
use yem_core::amount::parse_money;
use yem_core::types::{ResourceId, UserId};
use yem_harmonic::shared;

pub type State = PlatformState<UserId, ResourceId>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventSpec {
    Upvote {
        user: UserId,
        payment: String,
        resource: ResourceId,
    },
    View {
        user: UserId,
        payment: String,
        resource: ResourceId,
    },
}

impl EventSpec {
    fn to_event(&self) -> Result<Event<UserId, ResourceId>> {
        let event = match self {
            EventSpec::Upvote {
                user,
                payment,
                resource,
            } => Event::upvote(user.clone(), parse_money(payment)?, resource.clone()),
            EventSpec::View {
                user,
                payment,
                resource,
            } => Event::view(user.clone(), parse_money(payment)?, resource.clone()),
        };
        Ok(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub users: Vec<UserId>,
    #[serde(default)]
    pub resources: Vec<ResourceId>,
    #[serde(default)]
    pub upvoters: BTreeMap<ResourceId, Vec<UserId>>,
    #[serde(default)]
    pub events: Vec<EventSpec>,
}

impl Scenario {
    /// Read and parse a JSON scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Initial platform state. Uses the process-wide harmonic cache.
    pub fn platform(&self, config: PlatformConfig<UserId>) -> Result<State> {
        let mut builder = PlatformState::builder(config)
            .users(self.users.iter().cloned())
            .resources(self.resources.iter().cloned())
            .harmonics(shared());
        for (resource, upvoters) in &self.upvoters {
            builder = builder.resource_with_upvoters(resource.clone(), upvoters.iter().cloned());
        }
        Ok(builder.build()?)
    }

    /// Events with their amounts parsed. Fails on the first bad amount,
    /// naming its position.
    pub fn events(&self) -> Result<Vec<Event<UserId, ResourceId>>> {
        self.events
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.to_event().with_context(|| format!("event #{}", i + 1)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use yem_core::amount::{money, whole};
    use yem_brain::Upvoters;

    const SAMPLE: &str = r#"{
        "users": ["alice", "bob", "carol"],
        "resources": ["post-1", "post-2"],
        "upvoters": { "post-2": ["bob"] },
        "events": [
            { "kind": "upvote", "user": "alice", "payment": "1", "resource": "post-1" },
            { "kind": "view", "user": "carol", "payment": "3/2", "resource": "post-1" }
        ]
    }"#;

    #[test]
    fn parses_sample() {
        let s = Scenario::parse(SAMPLE).unwrap();
        assert_eq!(s.users.len(), 3);
        assert_eq!(s.upvoters[&ResourceId::new("post-2")], vec![UserId::new("bob")]);
        let events = s.events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), "upvote");
        assert_eq!(*events[1].payment(), money(3, 2).unwrap());
    }

    #[test]
    fn builds_platform_with_restored_upvoters() {
        let s = Scenario::parse(SAMPLE).unwrap();
        let p = s
            .platform(PlatformConfig::with_defaults(UserId::new("server")))
            .unwrap();
        assert!(p.is_resource(&ResourceId::new("post-1")));
        assert_eq!(
            p.upvoters(&ResourceId::new("post-2")).map(Upvoters::to_vec),
            Some(vec![UserId::new("bob")])
        );
    }

    #[test]
    fn empty_object_is_empty_scenario() {
        let s = Scenario::parse("{}").unwrap();
        assert!(s.users.is_empty());
        assert!(s.events().unwrap().is_empty());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let text = r#"{ "events": [
            { "kind": "tip", "user": "a", "payment": "1", "resource": "r" }
        ] }"#;
        assert!(Scenario::parse(text).is_err());
    }

    #[test]
    fn bad_amount_names_event() {
        let text = r#"{ "events": [
            { "kind": "view", "user": "a", "payment": "1", "resource": "r" },
            { "kind": "view", "user": "a", "payment": "lots", "resource": "r" }
        ] }"#;
        let err = Scenario::parse(text).unwrap().events().unwrap_err();
        assert_eq!(err.to_string(), "event #2");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let s = Scenario::load(file.path()).unwrap();
        assert_eq!(s.events.len(), 2);
        let first = s.events().unwrap().remove(0);
        assert_eq!(*first.payment(), whole(1));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scenario::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read scenario"));
    }
}
