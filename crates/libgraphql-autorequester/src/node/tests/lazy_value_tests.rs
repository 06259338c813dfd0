use crate::node::LazyValue;
use crate::requester::AutoRequesterError;
use crate::test::run_local;
use std::cell::Cell;
use std::cell::RefCell;
use std::future::IntoFuture;
use std::rc::Rc;

fn counting(runs: &Rc<Cell<usize>>, value: i32) -> LazyValue<i32> {
    let runs = runs.clone();
    LazyValue::new(move || {
        runs.set(runs.get() + 1);
        async move { Ok(value) }
    })
}

#[test]
fn initializer_waits_for_first_await() {
    let runs = Rc::new(Cell::new(0));
    let lazy = counting(&runs, 7);
    assert_eq!(lazy.peek(), None);
    assert_eq!(runs.get(), 0);

    assert_eq!(run_local(lazy.clone().into_future()), Ok(7));
    assert_eq!(lazy.peek(), Some(Ok(7)));
    assert_eq!(runs.get(), 1);
}

#[test]
fn into_future_starts_initialization_synchronously() {
    let runs = Rc::new(Cell::new(0));
    let lazy = counting(&runs, 7);

    let pending = (&lazy).into_future();
    assert_eq!(runs.get(), 1);
    assert_eq!(run_local(pending), Ok(7));
}

#[test]
fn start_runs_the_initializer_once() {
    let runs = Rc::new(Cell::new(0));
    let lazy = counting(&runs, 5);

    lazy.start();
    lazy.start();
    assert_eq!(runs.get(), 1);
    assert_eq!(run_local(lazy.into_future()), Ok(5));
    assert_eq!(runs.get(), 1);
}

#[test]
fn concurrent_and_later_awaits_share_one_outcome() {
    let runs = Rc::new(Cell::new(0));
    let lazy = counting(&runs, 3);
    let handle = lazy.clone();

    run_local(async {
        let (left, right) = futures::join!((&lazy).into_future(), (&handle).into_future());
        assert_eq!(left, Ok(3));
        assert_eq!(right, Ok(3));
        assert_eq!(lazy.clone().await, Ok(3));
    });
    assert_eq!(runs.get(), 1);
    assert!(lazy.ptr_eq(&handle));
    assert!(!lazy.ptr_eq(&counting(&runs, 3)));
}

#[test]
fn failures_are_memoized_too() {
    let runs = Rc::new(Cell::new(0));
    let lazy: LazyValue<i32> = {
        let runs = runs.clone();
        LazyValue::new(move || {
            runs.set(runs.get() + 1);
            async { Err(AutoRequesterError::BatchCancelled) }
        })
    };

    run_local(async {
        assert_eq!((&lazy).await, Err(AutoRequesterError::BatchCancelled));
        assert_eq!((&lazy).await, Err(AutoRequesterError::BatchCancelled));
    });
    assert_eq!(runs.get(), 1);
}

#[test]
fn ready_values_are_complete_from_the_start() {
    let lazy = LazyValue::ready(Ok("done".to_string()));
    assert_eq!(lazy.peek(), Some(Ok("done".to_string())));
    assert_eq!(format!("{lazy:?}"), r#"LazyValue { state: "complete" }"#);
}

#[test]
fn awaiting_itself_from_its_initializer_fails() {
    let slot: Rc<RefCell<Option<LazyValue<i32>>>> = Rc::new(RefCell::new(None));
    let lazy = {
        let slot = slot.clone();
        LazyValue::new(move || {
            let this = slot.borrow_mut().take().expect("slot is filled before the first await");
            this.into_future()
        })
    };
    *slot.borrow_mut() = Some(lazy.clone());

    assert_eq!(
        run_local(lazy.into_future()),
        Err(AutoRequesterError::ReentrantInitialization),
    );
}
