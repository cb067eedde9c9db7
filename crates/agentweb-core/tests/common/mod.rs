#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use agentweb_core::types::Operation;
use agentweb_core::{
    ApiRequest, ApiResponse, ClientConfig, ManualClock, MemoryCredentialStore, RecordingNotifier,
    SessionManager, SyncController, TranscriptClient, Transport, TransportError,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

pub type EventLog = Rc<RefCell<Vec<String>>>;

#[derive(Clone)]
enum Reply {
    Respond(ApiResponse),
    Fail(String),
}

/// Transport that answers from per-operation scripts.
///
/// Each operation has a queue of replies; the last one is sticky and keeps
/// being returned once the queue is down to it.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: RefCell<HashMap<Operation, VecDeque<Reply>>>,
    calls: RefCell<Vec<ApiRequest>>,
    events: RefCell<Option<EventLog>>,
    yielding: Cell<bool>,
}

impl ScriptedTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, operation: Operation, status: u16, body: Value) -> &Self {
        self.push(
            operation,
            Reply::Respond(ApiResponse {
                status,
                body: body.to_string(),
            }),
        )
    }

    pub fn respond_raw(&self, operation: Operation, status: u16, body: &str) -> &Self {
        self.push(
            operation,
            Reply::Respond(ApiResponse {
                status,
                body: body.to_string(),
            }),
        )
    }

    pub fn succeed(&self, operation: Operation, data: Value) -> &Self {
        self.respond(operation, 200, success(data))
    }

    pub fn fail(&self, operation: Operation, message: &str) -> &Self {
        self.push(operation, Reply::Fail(message.to_string()))
    }

    /// Record request/settle markers into `log`
    pub fn record_into(&self, log: EventLog) {
        *self.events.borrow_mut() = Some(log);
    }

    /// Yield to the executor mid-request so concurrent calls interleave
    pub fn yielding(&self) {
        self.yielding.set(true);
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls.borrow().iter().map(|c| c.operation).collect()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    pub fn reset_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push(&self, operation: Operation, reply: Reply) -> &Self {
        self.scripts
            .borrow_mut()
            .entry(operation)
            .or_default()
            .push_back(reply);
        self
    }

    fn next_reply(&self, operation: Operation) -> Option<Reply> {
        let mut scripts = self.scripts.borrow_mut();
        let queue = scripts.get_mut(&operation)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn event(&self, text: String) {
        if let Some(log) = self.events.borrow().as_ref() {
            log.borrow_mut().push(text);
        }
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let operation = request.operation;
        self.calls.borrow_mut().push(request);
        self.event(format!("POST {}", operation.path()));

        if self.yielding.get() {
            tokio::task::yield_now().await;
        }

        let reply = self.next_reply(operation);
        self.event(format!("settled {}", operation.path()));
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(TransportError(message)),
            None => Err(TransportError(format!("no script for {}", operation.path()))),
        }
    }
}

pub fn success(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn failure(err: &str) -> Value {
    json!({ "success": false, "err": err })
}

pub fn start_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
}

pub struct Harness {
    pub controller: SyncController,
    pub transport: Rc<ScriptedTransport>,
    pub store: Rc<MemoryCredentialStore>,
    pub clock: Rc<ManualClock>,
    pub notifier: Rc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Rc::new(ManualClock::new(start_time()));
        let store = Rc::new(MemoryCredentialStore::with_clock(clock.clone()));
        let transport = ScriptedTransport::new();
        let notifier = Rc::new(RecordingNotifier::new());
        let session = SessionManager::with_clock(
            store.clone(),
            ClientConfig::default().credential_ttl,
            clock.clone(),
        );
        let controller = SyncController::new(
            session,
            TranscriptClient::new(transport.clone()),
            notifier.clone(),
        );
        Self {
            controller,
            transport,
            store,
            clock,
            notifier,
        }
    }

    /// Harness whose service issues `token` and starts with an empty history
    pub fn fresh(token: &str) -> Self {
        let harness = Self::new();
        harness
            .transport
            .succeed(Operation::InitSession, json!(token))
            .succeed(Operation::FetchHistory, json!([]));
        harness
    }
}

/// Record every change of the pending flag into `log`
pub fn track_pending(controller: &SyncController, log: EventLog) {
    let last = Cell::new(controller.pending());
    controller.subscribe(move |view| {
        if view.pending != last.get() {
            last.set(view.pending);
            log.borrow_mut().push(format!("pending={}", view.pending));
        }
    });
}
