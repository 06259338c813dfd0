use crate::execution::ExecutionEngine;
use crate::execution::ExecutionRequest;
use crate::fragment_typemap::FragmentTypeMap;
use crate::node::FieldStrategies;
use crate::node::FieldStrategy;
use crate::requester::AutoRequesterError;
use crate::requester::Scheduler;
use crate::response::ResponseValue;
use crate::response::ResponseView;
use crate::schema::Schema;
use crate::selection::SelectionSet;
use futures::future::LocalBoxFuture;
use futures::future::Shared;
use futures::FutureExt;
use std::any::Any;
use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::rc::Weak;
use tokio::sync::oneshot;

type Result<T> = std::result::Result<T, AutoRequesterError>;
type BatchResult = Result<Rc<ResponseValue>>;

/// Everything fetched so far: the union of every selection sent and the
/// deep merge of every response received.
#[derive(Debug)]
struct FetchedState {
    data: Rc<ResponseValue>,
    selection_set: SelectionSet,
}

/// Selections accumulated since the last flush. Every access that joins
/// the batch waits on `result`.
struct PendingBatch {
    result: Shared<LocalBoxFuture<'static, BatchResult>>,
    selection_set: SelectionSet,
}
impl PendingBatch {
    fn new(receiver: oneshot::Receiver<BatchResult>) -> Self {
        Self {
            result: receive_batch_result(receiver).boxed_local().shared(),
            selection_set: SelectionSet::new(),
        }
    }
}

async fn receive_batch_result(receiver: oneshot::Receiver<BatchResult>) -> BatchResult {
    receiver.await.unwrap_or(Err(AutoRequesterError::BatchCancelled))
}

struct RequesterState {
    fetched: FetchedState,
    pending: Option<PendingBatch>,
}

/// The state behind an [`AutoRequester`](crate::requester::AutoRequester),
/// shared by every node it hands out.
pub(crate) struct RequesterShared {
    context: RefCell<Option<Rc<dyn Any>>>,
    engine: Box<dyn ExecutionEngine>,
    fragment_typemap: FragmentTypeMap,
    request_counter: Cell<usize>,
    scheduler: Box<dyn Scheduler>,
    schema: Schema,
    state: RefCell<RequesterState>,
    strategies: RefCell<HashMap<String, Rc<FieldStrategies>>>,
}
impl RequesterShared {
    pub fn new(
        schema: Schema,
        fragment_typemap: FragmentTypeMap,
        engine: Box<dyn ExecutionEngine>,
        scheduler: Box<dyn Scheduler>,
        context: Option<Rc<dyn Any>>,
    ) -> Self {
        Self {
            context: RefCell::new(context),
            engine,
            fragment_typemap,
            request_counter: Cell::new(0),
            scheduler,
            schema,
            state: RefCell::new(RequesterState {
                fetched: FetchedState {
                    data: Rc::new(ResponseValue::Object(Default::default())),
                    selection_set: SelectionSet::new(),
                },
                pending: None,
            }),
            strategies: RefCell::new(HashMap::new()),
        }
    }

    /// Run one flushed batch through the engine and grow the fetched state
    /// with it.
    async fn execute_batch(&self, selection_set: SelectionSet) -> BatchResult {
        let request_number = self.request_counter.get() + 1;
        self.request_counter.set(request_number);
        tracing::debug!(request_number, selections = selection_set.len(), "flushing batch");
        tracing::trace!(request_number, document = %selection_set, "outgoing document");

        let request = ExecutionRequest::new(selection_set.clone())
            .with_context(self.context.borrow().clone());
        let response = self.engine.execute(request).await?;
        let data = response.into_response_value()?;

        let mut state = self.state.borrow_mut();
        state.fetched.selection_set.merge(&selection_set)?;
        Rc::make_mut(&mut state.fetched.data).merge(data);
        Ok(state.fetched.data.clone())
    }

    /// Request `selection_set` from the query root.
    ///
    /// Whatever the fetched state already covers is answered from it; only
    /// the rest joins the pending batch (opening one, and scheduling its
    /// flush, if none is pending).
    pub fn execute_root(
        self: &Rc<Self>,
        selection_set: SelectionSet,
    ) -> Result<LocalBoxFuture<'static, Result<ResponseView>>> {
        let mut flush_task = None;
        let batch_result = {
            let mut state = self.state.borrow_mut();
            let missing = selection_set.left_outer_join(&state.fetched.selection_set)?;
            if missing.is_empty() {
                tracing::trace!("answered from fetched data");
                let view = ResponseView::root(state.fetched.data.clone());
                return Ok(futures::future::ready(Ok(view)).boxed_local());
            }

            let batch = state.pending.get_or_insert_with(|| {
                let (sender, receiver) = oneshot::channel();
                flush_task = Some(flush_batch(Rc::downgrade(self), sender).boxed_local());
                PendingBatch::new(receiver)
            });
            batch.selection_set.merge(&missing)?;
            batch.result.clone()
        };

        if let Some(flush_task) = flush_task {
            tracing::debug!("opened batch");
            self.scheduler.schedule(flush_task);
        }
        Ok(async move {
            batch_result.await.map(ResponseView::root)
        }.boxed_local())
    }

    pub fn executed_request_count(&self) -> usize {
        self.request_counter.get()
    }

    /// The resolution strategy of every field of `type_name`, computed on
    /// first use and shared by every node of that type.
    pub fn field_strategies(&self, type_name: &str) -> Rc<FieldStrategies> {
        if let Some(strategies) = self.strategies.borrow().get(type_name) {
            return strategies.clone();
        }
        let strategies = Rc::new(
            self.schema.object_type(type_name)
                .map(|object_type| FieldStrategy::for_object_type(&self.schema, object_type))
                .unwrap_or_default(),
        );
        self.strategies.borrow_mut().insert(type_name.to_string(), strategies.clone());
        strategies
    }

    pub fn fragment_typemap(&self) -> &FragmentTypeMap {
        &self.fragment_typemap
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn set_context(&self, context: Option<Rc<dyn Any>>) {
        *self.context.borrow_mut() = context;
    }
}
impl std::fmt::Debug for RequesterShared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("RequesterShared")
            .field("executed_requests", &self.request_counter.get())
            .field("fetched", &state.fetched.selection_set)
            .field("has_pending_batch", &state.pending.is_some())
            .finish()
    }
}

/// The deferred half of a batch: take whatever the batch accumulated by the
/// time this runs, execute it, and hand the outcome to every waiter.
async fn flush_batch(requester: Weak<RequesterShared>, sender: oneshot::Sender<BatchResult>) {
    // A dropped requester drops the sender, which cancels the batch.
    let Some(requester) = requester.upgrade() else {
        return;
    };
    let Some(batch) = requester.state.borrow_mut().pending.take() else {
        return;
    };

    let outcome = if batch.selection_set.is_empty() {
        Ok(requester.state.borrow().fetched.data.clone())
    } else {
        requester.execute_batch(batch.selection_set).await
    };
    if let Err(err) = &outcome {
        tracing::debug!(error = %err, "batch failed");
    }
    // Every waiter may have gone away already.
    let _ = sender.send(outcome);
}
