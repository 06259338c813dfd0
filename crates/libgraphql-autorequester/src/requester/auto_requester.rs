use crate::execution::ExecutionEngine;
use crate::fragment_typemap::FragmentTypeMap;
use crate::node::ExecuteBinding;
use crate::node::NodeCore;
use crate::node::ProxyNode;
use crate::requester::AutoRequesterBuilder;
use crate::requester::AutoRequesterError;
use crate::requester::RequesterShared;
use crate::schema::Schema;
use std::any::Any;
use std::rc::Rc;

/// Hands out a lazily-populated graph rooted at the schema's query type.
///
/// Field reads on the graph are batched per executor turn, diffed against
/// everything already fetched, and sent to the [`ExecutionEngine`] as one
/// anonymous query per batch.
///
/// Everything here is single-threaded: with the default
/// [`LocalSpawnScheduler`](crate::requester::LocalSpawnScheduler), drive
/// the requester from inside a [`tokio::task::LocalSet`].
#[derive(Clone, Debug)]
pub struct AutoRequester {
    query: ProxyNode,
    shared: Rc<RequesterShared>,
}
impl AutoRequester {
    pub fn builder(schema: Schema, engine: impl ExecutionEngine + 'static) -> AutoRequesterBuilder {
        AutoRequesterBuilder::new(schema, engine)
    }

    /// The number of batches sent to the execution engine so far.
    pub fn executed_request_count(&self) -> usize {
        self.shared.executed_request_count()
    }

    pub fn fragment_typemap(&self) -> &FragmentTypeMap {
        self.shared.fragment_typemap()
    }

    pub(crate) fn from_shared(shared: Rc<RequesterShared>) -> Result<Self, AutoRequesterError> {
        let query_type_name = shared.schema().query_type_name().to_string();
        let query_core = NodeCore::new(shared.clone(), query_type_name, ExecuteBinding::Root)?;
        Ok(Self {
            query: ProxyNode::new(query_core),
            shared,
        })
    }

    /// An [`AutoRequester`] without preload fragments, flushing batches
    /// with the default scheduler.
    pub fn new(
        schema: Schema,
        engine: impl ExecutionEngine + 'static,
    ) -> Result<Self, AutoRequesterError> {
        Self::builder(schema, engine).build()
    }

    /// The root node. Every call returns a handle to the same node.
    pub fn query(&self) -> ProxyNode {
        self.query.clone()
    }

    pub fn schema(&self) -> &Schema {
        self.shared.schema()
    }

    /// Replace the context handed to the execution engine with every
    /// subsequent request.
    pub fn set_context(&self, context: impl Any) {
        self.shared.set_context(Some(Rc::new(context)));
    }
}
