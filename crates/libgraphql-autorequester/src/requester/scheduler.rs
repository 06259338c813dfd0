use futures::future::LocalBoxFuture;

/// Decides when a requester's pending batch is flushed.
///
/// [`schedule`](Self::schedule) is called once per batch, right after the
/// batch is opened. The task must not be polled before `schedule` returns:
/// every field read made until the task first runs lands in the batch it
/// flushes.
pub trait Scheduler {
    fn schedule(&self, task: LocalBoxFuture<'static, ()>);
}

/// Runs flushes as tasks on the current [`tokio::task::LocalSet`], so a
/// batch is flushed once the task that opened it yields.
///
/// Requesters using this scheduler must be driven from within a `LocalSet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSpawnScheduler;
impl Scheduler for LocalSpawnScheduler {
    fn schedule(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}
