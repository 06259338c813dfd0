use crate::requester::AutoRequester;
use crate::requester::AutoRequesterError;
use crate::requester::Scheduler;
use crate::schema::Schema;
use crate::test::FixtureEngine;
use crate::test::run_local;
use crate::test::schema;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde_json::json;
use std::cell::RefCell;
use std::future::IntoFuture;
use std::rc::Rc;

const FIELD_COUNT: usize = 10;

fn wide_schema() -> Schema {
    let fields: Vec<String> = (0..FIELD_COUNT).map(|idx| format!("f{idx}: Int")).collect();
    schema(&format!("type Query {{ {} }}", fields.join(" ")))
}

fn wide_engine() -> FixtureEngine {
    let data: serde_json::Map<String, serde_json::Value> = (0..FIELD_COUNT)
        .map(|idx| (format!("f{idx}"), json!(idx * 10)))
        .collect();
    FixtureEngine::new(wide_schema(), serde_json::Value::Object(data))
}

/// Holds flush tasks until the test runs them.
#[derive(Clone, Default)]
struct QueuedScheduler {
    tasks: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
}
impl QueuedScheduler {
    fn discard_pending(&self) {
        self.tasks.borrow_mut().clear();
    }

    async fn run_pending(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for task in tasks {
            task.await;
        }
    }
}
impl Scheduler for QueuedScheduler {
    fn schedule(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}

#[test]
fn reads_started_together_share_one_request() {
    run_local(async {
        let engine = wide_engine();
        let requester = AutoRequester::new(wide_schema(), engine.clone()).unwrap();
        let query = requester.query();

        let values = futures::future::join_all(
            (0..FIELD_COUNT).map(|idx| query.get(&format!("f{idx}")).into_future()),
        ).await;

        let values: Vec<i64> = values.into_iter()
            .map(|value| value.unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(values, (0..FIELD_COUNT as i64).map(|idx| idx * 10).collect::<Vec<_>>());
        assert_eq!(engine.execution_count(), 1);
    });
}

#[test]
fn sequential_reads_each_get_a_request() {
    run_local(async {
        let engine = wide_engine();
        let requester = AutoRequester::new(wide_schema(), engine.clone()).unwrap();
        let query = requester.query();

        assert_eq!(query.resolve("f1").await.unwrap().as_i64(), Some(10));
        assert_eq!(query.resolve("f2").await.unwrap().as_i64(), Some(20));
        assert_eq!(engine.execution_count(), 2);
    });
}

#[test]
fn reads_register_before_they_are_awaited() {
    run_local(async {
        let engine = wide_engine();
        let requester = AutoRequester::new(wide_schema(), engine.clone()).unwrap();
        let query = requester.query();

        let properties: Vec<_> = (0..FIELD_COUNT)
            .map(|idx| query.get(&format!("f{idx}")))
            .collect();
        assert!(properties[0].peek().is_none());

        for (idx, property) in properties.iter().enumerate() {
            let value = property.clone().await.unwrap();
            assert_eq!(value.as_i64(), Some(idx as i64 * 10));
        }
        assert_eq!(engine.execution_count(), 1);
        assert_eq!(properties[FIELD_COUNT - 1].peek().unwrap().unwrap().as_i64(), Some(90));
    });
}

#[test]
fn reads_made_before_an_await_ride_in_its_batch() {
    run_local(async {
        let engine = wide_engine();
        let requester = AutoRequester::new(wide_schema(), engine.clone()).unwrap();
        let query = requester.query();

        let first = query.get("f1");
        let second = query.get("f2");
        assert_eq!(first.await.unwrap().as_i64(), Some(10));
        assert_eq!(engine.execution_count(), 1);
        assert_eq!(second.await.unwrap().as_i64(), Some(20));
        assert_eq!(engine.execution_count(), 1);

        let third = query.get("f3");
        assert_eq!(third.await.unwrap().as_i64(), Some(30));
        assert_eq!(engine.execution_count(), 2);
        let second_document = &engine.documents()[1];
        assert!(second_document.contains("f3"));
        assert!(!second_document.contains("f2"));
    });
}

#[test]
fn chained_reads_coalesce() {
    run_local(async {
        let engine = wide_engine();
        let requester = AutoRequester::new(wide_schema(), engine.clone()).unwrap();
        let query = requester.query();

        let doubled = query.get("f4").into_future().map(|value| {
            value.map(|value| value.as_i64().unwrap_or_default() * 2)
        });
        let described = query.get("f5").into_future().then(|value| async move {
            value.map(|value| format!("f5 = {}", value.as_i64().unwrap_or_default()))
        });

        let (doubled, described) = futures::join!(doubled, described);
        assert_eq!(doubled.unwrap(), 80);
        assert_eq!(described.unwrap(), "f5 = 50");
        assert_eq!(engine.execution_count(), 1);
    });
}

#[test]
fn batches_stay_open_until_the_scheduler_flushes_them() {
    run_local(async {
        let engine = wide_engine();
        let scheduler = QueuedScheduler::default();
        let requester = AutoRequester::builder(wide_schema(), engine.clone())
            .scheduler(scheduler.clone())
            .build()
            .unwrap();
        let query = requester.query();

        let first = query.get("f3").into_future();
        tokio::task::yield_now().await;
        let second = query.get("f4").into_future();
        assert_eq!(engine.execution_count(), 0);

        scheduler.run_pending().await;
        let (first, second) = futures::join!(first, second);
        assert_eq!(first.unwrap().as_i64(), Some(30));
        assert_eq!(second.unwrap().as_i64(), Some(40));
        assert_eq!(engine.execution_count(), 1);
    });
}

#[test]
fn unflushed_batches_are_cancelled() {
    run_local(async {
        let engine = wide_engine();
        let scheduler = QueuedScheduler::default();
        let requester = AutoRequester::builder(wide_schema(), engine.clone())
            .scheduler(scheduler.clone())
            .build()
            .unwrap();

        let pending = requester.query().get("f5").into_future();
        scheduler.discard_pending();
        assert_eq!(pending.await.unwrap_err(), AutoRequesterError::BatchCancelled);
        assert_eq!(engine.execution_count(), 0);
    });
}

#[test]
fn fetched_fields_are_answered_without_a_request() {
    run_local(async {
        let engine = wide_engine();
        let requester = AutoRequester::new(wide_schema(), engine.clone()).unwrap();
        let query = requester.query();

        query.prefetch("{ f6 f7 }", serde_json::Value::Null).await.unwrap();
        assert_eq!(engine.execution_count(), 1);

        let (f6, f7) = futures::join!(query.get("f6").into_future(), query.get("f7").into_future());
        assert_eq!((f6.unwrap().as_i64(), f7.unwrap().as_i64()), (Some(60), Some(70)));
        assert_eq!(engine.execution_count(), 1);
        assert_eq!(requester.executed_request_count(), 1);
    });
}
