//! Shared fakes for data source tests.
//!
//! # What this does NOT handle
//! - HTTP mocking (see provider_session_tests.rs, which uses wiremock)

#![allow(dead_code)]

use std::future::Future;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use atracker_client::{ClientError, Target, TargetList, WriteStatus};
use atracker_provider::{ClientSession, Clock, ProviderError, TargetsApi};
use chrono::{DateTime, TimeZone, Utc};

/// What the fake remote does when asked for targets.
pub enum Behavior {
    Targets(Vec<Target>),
    Fail(fn() -> ClientError),
    Hang,
}

/// In-memory stand-in for the Activity Tracker client.
pub struct FakeTargets {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeTargets {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TargetsApi for FakeTargets {
    fn list_targets(&self) -> impl Future<Output = Result<TargetList, ClientError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = match &self.behavior {
            Behavior::Targets(targets) => Some(Ok(TargetList {
                targets: targets.clone(),
            })),
            Behavior::Fail(make) => Some(Err(make())),
            Behavior::Hang => None,
        };
        async move {
            match outcome {
                Some(result) => result,
                None => std::future::pending().await,
            }
        }
    }
}

/// Client session over a [`FakeTargets`], or one that always fails.
pub struct FakeSession {
    targets: Option<FakeTargets>,
}

impl FakeSession {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            targets: Some(FakeTargets::new(behavior)),
        }
    }

    pub fn with_targets(targets: Vec<Target>) -> Self {
        Self::new(Behavior::Targets(targets))
    }

    pub fn broken() -> Self {
        Self { targets: None }
    }

    pub fn calls(&self) -> usize {
        self.targets.as_ref().map(FakeTargets::calls).unwrap_or(0)
    }
}

impl ClientSession for FakeSession {
    type Targets = FakeTargets;

    async fn atracker_v2(&self) -> Result<&FakeTargets, ProviderError> {
        self.targets
            .as_ref()
            .ok_or_else(|| ProviderError::Session("no credentials configured".to_string()))
    }
}

/// Clock that advances one millisecond per reading.
pub struct SteppingClock {
    next_millis: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            next_millis: AtomicI64::new(at.timestamp_millis()),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.next_millis.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis).unwrap()
    }
}

/// Target with just a name and type.
pub fn target(name: &str, target_type: &str) -> Target {
    Target {
        name: Some(name.to_string()),
        target_type: Some(target_type.to_string()),
        ..Default::default()
    }
}

/// The `t1` / `t2` pair used by the scenario tests.
pub fn scenario_targets() -> Vec<Target> {
    let mut t1 = target("t1", "cloud_object_storage");
    t1.write_status = Some(WriteStatus {
        status: Some("success".to_string()),
        ..Default::default()
    });
    vec![t1, target("t2", "logdna")]
}
