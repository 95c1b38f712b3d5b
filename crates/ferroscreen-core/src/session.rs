//! Stateful screener session.
//!
//! A [`ScreenerSession`] accumulates selection, filters, universe, sort and
//! paging, and compiles a fresh [`ScreenerQuery`] on every
//! [`execute`](ScreenerSession::execute). At most one execution is in flight
//! per session; mutations made while one is running are queued and applied,
//! in call order, once it returns.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::compiler::{compile_with, CompileOptions, WireQuery};
use crate::domain::ScreenerKind;
use crate::error::{CompileError, ScreenerError};
use crate::field::FieldRef;
use crate::filter::Predicate;
use crate::materializer::{materialize, ResultTable};
use crate::query::{Page, ScreenerQuery, Sort, SortDirection, Universe};
use crate::transport::ScreenerTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Executing,
}

#[derive(Debug, Clone)]
enum SessionCommand {
    Select(Vec<FieldRef>),
    Filter(Predicate),
    ClearFilters,
    SetUniverse(Universe),
    SetTickers(Vec<String>),
    Sort(Sort),
    Paginate(Page),
}

impl SessionCommand {
    fn apply(self, query: &mut ScreenerQuery) {
        match self {
            Self::Select(fields) => query.add_fields(fields),
            Self::Filter(predicate) => query.filters.push(predicate),
            Self::ClearFilters => query.filters.clear(),
            Self::SetUniverse(universe) => query.universe = universe,
            Self::SetTickers(tickers) => query.universe.tickers = tickers,
            Self::Sort(sort) => query.sort = Some(sort),
            Self::Paginate(page) => query.page = page,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    query: ScreenerQuery,
    pending: Vec<SessionCommand>,
}

struct SessionInner {
    state: Mutex<SessionState>,
    exec_gate: tokio::sync::Mutex<()>,
    transport: Arc<dyn ScreenerTransport>,
    options: CompileOptions,
}

impl SessionInner {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .expect("session state lock should not be poisoned")
    }
}

/// Resets the phase and drains queued commands, even if the execute future
/// is dropped mid-flight.
struct ExecutionGuard<'a> {
    inner: &'a SessionInner,
}

impl Drop for ExecutionGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.inner.state();
        state.phase = SessionPhase::Idle;
        let pending = std::mem::take(&mut state.pending);
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "applying queued session mutations");
        }
        for command in pending {
            command.apply(&mut state.query);
        }
    }
}

/// Cloneable handle; clones share state and the single-flight gate.
#[derive(Clone)]
pub struct ScreenerSession {
    inner: Arc<SessionInner>,
}

impl ScreenerSession {
    pub fn new(kind: ScreenerKind, transport: Arc<dyn ScreenerTransport>) -> Self {
        Self::from_query(ScreenerQuery::new(kind), transport)
    }

    /// Starts from a prepared query instead of an empty one.
    pub fn from_query(query: ScreenerQuery, transport: Arc<dyn ScreenerTransport>) -> Self {
        Self::with_options(query, transport, CompileOptions::default())
    }

    pub fn with_options(
        query: ScreenerQuery,
        transport: Arc<dyn ScreenerTransport>,
        options: CompileOptions,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                state: Mutex::new(SessionState {
                    phase: SessionPhase::Idle,
                    query,
                    pending: Vec::new(),
                }),
                exec_gate: tokio::sync::Mutex::new(()),
                transport,
                options,
            }),
        }
    }

    pub fn kind(&self) -> ScreenerKind {
        self.inner.state().query.kind
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.state().phase
    }

    /// Number of mutations waiting for the in-flight execution to finish.
    pub fn pending_mutations(&self) -> usize {
        self.inner.state().pending.len()
    }

    /// Snapshot of the accumulated query (queued mutations not included).
    pub fn query(&self) -> ScreenerQuery {
        self.inner.state().query.clone()
    }

    pub fn select<I>(&self, fields: I) -> &Self
    where
        I: IntoIterator<Item = FieldRef>,
    {
        self.submit(SessionCommand::Select(fields.into_iter().collect()))
    }

    pub fn filter(&self, predicate: Predicate) -> &Self {
        self.submit(SessionCommand::Filter(predicate))
    }

    pub fn clear_filters(&self) -> &Self {
        self.submit(SessionCommand::ClearFilters)
    }

    pub fn set_universe(&self, universe: Universe) -> &Self {
        self.submit(SessionCommand::SetUniverse(universe))
    }

    pub fn set_tickers<I, S>(&self, tickers: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.submit(SessionCommand::SetTickers(
            tickers.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn sort(&self, field: FieldRef, direction: SortDirection) -> &Self {
        self.submit(SessionCommand::Sort(Sort::new(field, direction)))
    }

    pub fn paginate(&self, offset: usize, limit: usize) -> &Self {
        self.submit(SessionCommand::Paginate(Page::new(offset, limit)))
    }

    /// Compiles the current state without sending it.
    pub fn compile(&self) -> Result<WireQuery, CompileError> {
        let query = self.query();
        compile_with(&query, &self.inner.options)
    }

    /// Compiles the current state, sends it once and materializes the rows.
    ///
    /// Transport failures are returned unchanged; nothing is retried here.
    pub async fn execute(&self) -> Result<ResultTable, ScreenerError> {
        let _gate = self.inner.exec_gate.lock().await;

        let query = {
            let mut state = self.inner.state();
            state.phase = SessionPhase::Executing;
            state.query.clone()
        };
        let _guard = ExecutionGuard { inner: &self.inner };

        let started = Instant::now();
        let wire = compile_with(&query, &self.inner.options)?;
        let raw = self.inner.transport.send(&wire).await?;
        let table = materialize(&wire, raw)?;

        tracing::info!(
            kind = %query.kind,
            rows = table.rows.len(),
            total = table.total_count,
            latency_ms = started.elapsed().as_millis() as u64,
            request_id = %table.request_id,
            "screener query executed"
        );
        Ok(table)
    }

    fn submit(&self, command: SessionCommand) -> &Self {
        let mut state = self.inner.state();
        match state.phase {
            SessionPhase::Idle => command.apply(&mut state.query),
            SessionPhase::Executing => state.pending.push(command),
        }
        self
    }
}

impl std::fmt::Debug for ScreenerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state();
        f.debug_struct("ScreenerSession")
            .field("phase", &state.phase)
            .field("kind", &state.query.kind)
            .field("pending", &state.pending.len())
            .finish_non_exhaustive()
    }
}
