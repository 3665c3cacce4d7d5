//! Named flows the dev tooling can discover and run.
//!
//! [`bootstrap`] loads `.env` and registers every built-in flow. Registering
//! a flow never runs it.

mod poll_results;

use std::collections::BTreeMap;
use std::sync::Arc;

use dotenvy::dotenv;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::store::PollStore;
use crate::utils::error::{AppError, AppResult};

pub use poll_results::PollResultsFlow;

pub trait Flow: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn run(&self, input: Value) -> BoxFuture<'_, AppResult<Value>>;
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FlowInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Default)]
pub struct FlowRegistry {
    flows: BTreeMap<&'static str, Arc<dyn Flow>>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, flow: Arc<dyn Flow>) -> AppResult<()> {
        let name = flow.name();
        if self.flows.contains_key(name) {
            return Err(AppError::Conflict(format!("Flow '{name}' is already registered")));
        }
        self.flows.insert(name, flow);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Flow>> {
        self.flows.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.flows.keys().copied().collect()
    }

    pub fn describe(&self) -> Vec<FlowInfo> {
        self.flows
            .values()
            .map(|flow| FlowInfo {
                name: flow.name(),
                description: flow.description(),
            })
            .collect()
    }
}

pub fn bootstrap(store: Arc<dyn PollStore>) -> AppResult<FlowRegistry> {
    dotenv().ok();

    let mut registry = FlowRegistry::new();
    registry.register(Arc::new(PollResultsFlow::new(store)))?;

    info!(flows = ?registry.names(), "Registered flows");
    Ok(registry)
}
