//! Shared fixtures for behaviour tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ferroscreen_core::{
    FieldCatalog, FieldRef, RawResponse, RawRow, ScreenerTransport, TransportError, WireQuery,
};
use serde_json::Value;
use tokio::sync::Notify;
use tokio::time::Instant;

pub fn field(key: &str) -> FieldRef {
    FieldCatalog::builtin().field(key).expect("builtin field")
}

pub fn timed(key: &str, code: &str) -> FieldRef {
    field(key).with_interval(code).expect("interval-capable field")
}

/// One scripted reply; an empty script answers every call with one row.
#[derive(Debug, Clone)]
pub enum Reply {
    Rows(usize),
    Fail(TransportError),
    Raw(RawResponse),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub started: Instant,
    pub market: String,
    pub body: Value,
}

/// Lets a test hold an execution in flight.
#[derive(Debug, Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
    latency: Duration,
    gate: Option<Arc<Gate>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Every call takes `latency` of (tokio) time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_gate(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Reply {
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or(Reply::Rows(1))
    }
}

fn rows_for(query: &WireQuery, count: usize) -> RawResponse {
    let width = query.columns().len();
    RawResponse {
        total_count: count as u64,
        rows: (0..count)
            .map(|index| RawRow {
                symbol: format!("TEST:ROW{index}"),
                values: vec![Value::from(index as u64); width],
            })
            .collect(),
    }
}

impl ScreenerTransport for ScriptedTransport {
    fn send<'a>(
        &'a self,
        query: &'a WireQuery,
    ) -> Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.calls.lock().expect("calls lock").push(Call {
                started: Instant::now(),
                market: query.market().to_owned(),
                body: query.to_json().expect("wire body serializes"),
            });

            if let Some(gate) = &self.gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            let reply = self.next_reply();
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            match reply {
                Reply::Rows(count) => Ok(rows_for(query, count)),
                Reply::Fail(error) => Err(error),
                Reply::Raw(raw) => Ok(raw),
            }
        })
    }
}
