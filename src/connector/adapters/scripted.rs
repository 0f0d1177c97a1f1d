//! Deterministic in-process capability.
//!
//! Used for local flows and tests where no remote service is available. Each
//! action is scripted up front; anything not scripted is reported as an
//! unsupported operation.

use crate::connector::{
    ports::{Capability, CapabilityDescriptor, CapabilityError, CapabilityResult, ConnectionCheck},
    services::CapabilityFactory,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

#[derive(Debug, Clone)]
enum Reply {
    Fixed(Value),
    Echo,
    Fail(String),
}

/// Capability whose behaviour is fixed at construction.
///
/// Clones share the call log and open state.
#[derive(Debug, Clone)]
pub struct ScriptedCapability {
    replies: HashMap<String, Reply>,
    connection: ConnectionCheck,
    rejected_secrets: Vec<String>,
    open_failure: Option<String>,
    descriptor: CapabilityDescriptor,
    calls: Arc<Mutex<Vec<String>>>,
    open: Arc<AtomicBool>,
}

impl Default for ScriptedCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCapability {
    /// Creates a capability with no scripted actions and a valid connection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            connection: ConnectionCheck::valid(),
            rejected_secrets: Vec::new(),
            open_failure: None,
            descriptor: CapabilityDescriptor::default(),
            calls: Arc::new(Mutex::new(Vec::new())),
            open: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes `action` return `result`.
    #[must_use]
    pub fn responding(mut self, action: impl Into<String>, result: Value) -> Self {
        self.replies.insert(action.into(), Reply::Fixed(result));
        self
    }

    /// Makes `action` return its parameters unchanged.
    #[must_use]
    pub fn echoing(mut self, action: impl Into<String>) -> Self {
        self.replies.insert(action.into(), Reply::Echo);
        self
    }

    /// Makes `action` fail with a rejection carrying `message`.
    #[must_use]
    pub fn failing(mut self, action: impl Into<String>, message: impl Into<String>) -> Self {
        self.replies
            .insert(action.into(), Reply::Fail(message.into()));
        self
    }

    /// Sets the verdict returned by connection checks.
    #[must_use]
    pub fn with_connection_check(mut self, check: ConnectionCheck) -> Self {
        self.connection = check;
        self
    }

    /// Rejects connection checks whose credentials contain `secret` as a value.
    #[must_use]
    pub fn rejecting_secret(mut self, secret: impl Into<String>) -> Self {
        self.rejected_secrets.push(secret.into());
        self
    }

    /// Makes [`Capability::open`] fail with `message`.
    #[must_use]
    pub fn failing_to_open(mut self, message: impl Into<String>) -> Self {
        self.open_failure = Some(message.into());
        self
    }

    /// Sets the advertised descriptor.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: CapabilityDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Returns the action names executed so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns whether the capability is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn holds_rejected_secret(&self, credentials: &Value) -> bool {
        credentials.as_object().is_some_and(|fields| {
            fields.values().any(|value| {
                value
                    .as_str()
                    .is_some_and(|text| self.rejected_secrets.iter().any(|secret| secret == text))
            })
        })
    }
}

#[async_trait]
impl Capability for ScriptedCapability {
    async fn validate_connection(&self, _config: &Value, credentials: &Value) -> ConnectionCheck {
        if self.holds_rejected_secret(credentials) {
            return ConnectionCheck::invalid("credentials were rejected by the remote service");
        }
        self.connection.clone()
    }

    async fn execute(&self, action: &str, params: Value) -> CapabilityResult<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action.to_owned());

        match self.replies.get(action) {
            Some(Reply::Fixed(result)) => Ok(result.clone()),
            Some(Reply::Echo) => Ok(params),
            Some(Reply::Fail(message)) => Err(CapabilityError::Rejected(message.clone())),
            None => Err(CapabilityError::UnsupportedOperation(action.to_owned())),
        }
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        self.descriptor
    }

    async fn open(&self) -> CapabilityResult<()> {
        if let Some(message) = &self.open_failure {
            return Err(CapabilityError::Connection(message.clone()));
        }
        self.open.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> CapabilityResult<()> {
        self.open.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Factory producing copies of a scripted capability.
#[derive(Debug, Clone)]
pub struct ScriptedCapabilityFactory {
    template: ScriptedCapability,
    construction_failure: Option<String>,
    built: Arc<AtomicUsize>,
}

impl ScriptedCapabilityFactory {
    /// Creates a factory handing out clones of `template`.
    #[must_use]
    pub fn new(template: ScriptedCapability) -> Self {
        Self {
            template,
            construction_failure: None,
            built: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Makes every construction attempt fail with `message`.
    #[must_use]
    pub fn failing_construction(mut self, message: impl Into<String>) -> Self {
        self.construction_failure = Some(message.into());
        self
    }

    /// Returns the number of construction attempts.
    #[must_use]
    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }

    /// Returns the template shared with every built capability.
    #[must_use]
    pub const fn template(&self) -> &ScriptedCapability {
        &self.template
    }
}

impl CapabilityFactory for ScriptedCapabilityFactory {
    fn build(
        &self,
        _config: &Value,
        _credentials: &Value,
    ) -> CapabilityResult<Arc<dyn Capability>> {
        self.built.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.construction_failure {
            return Err(CapabilityError::Connection(message.clone()));
        }
        Ok(Arc::new(self.template.clone()))
    }
}
