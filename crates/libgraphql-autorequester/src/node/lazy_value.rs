use crate::requester::AutoRequesterError;
use futures::future::LocalBoxFuture;
use futures::future::Shared;
use futures::FutureExt;
use std::cell::RefCell;
use std::future::Future;
use std::future::IntoFuture;
use std::rc::Rc;

type Result<T> = std::result::Result<T, AutoRequesterError>;
type SharedResult<T> = Shared<LocalBoxFuture<'static, Result<T>>>;
type Initializer<T> = Box<dyn FnOnce() -> LocalBoxFuture<'static, Result<T>>>;

enum LazyState<T: Clone + 'static> {
    Initializing,
    NotStarted(Initializer<T>),
    Started(SharedResult<T>),
}

/// A value computed at most once, on first demand, and shared by every
/// handle to it.
///
/// The initializer runs synchronously the first time the value is
/// [started](Self::start) or turned into a future. Properties handed out by
/// a [`ProxyNode`](crate::node::ProxyNode) are started as they are created,
/// which is what registers the underlying field request with the current
/// batch. Every later (or concurrent) `.await` observes the same pending or
/// completed outcome.
pub struct LazyValue<T: Clone + 'static> {
    state: Rc<RefCell<LazyState<T>>>,
}
impl<T: Clone + 'static> LazyValue<T> {
    pub fn new<F, Fut>(initializer: F) -> Self
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = Result<T>> + 'static,
    {
        let initializer: Initializer<T> = Box::new(move || initializer().boxed_local());
        Self {
            state: Rc::new(RefCell::new(LazyState::NotStarted(initializer))),
        }
    }

    /// A value that is already complete.
    pub fn ready(result: Result<T>) -> Self {
        Self {
            state: Rc::new(RefCell::new(LazyState::Started(
                futures::future::ready(result).boxed_local().shared(),
            ))),
        }
    }

    /// The outcome, if the value has already been computed.
    pub fn peek(&self) -> Option<Result<T>> {
        match &*self.state.borrow() {
            LazyState::Started(shared) => shared.peek().cloned(),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Run the initializer now, if it has not run yet.
    pub(crate) fn start(&self) {
        let _ = self.shared();
    }

    fn shared(&self) -> SharedResult<T> {
        let initializer = {
            let mut state = self.state.borrow_mut();
            if let LazyState::Started(shared) = &*state {
                return shared.clone();
            }
            match std::mem::replace(&mut *state, LazyState::Initializing) {
                LazyState::NotStarted(initializer) => initializer,
                _ => return futures::future::ready(
                    Err(AutoRequesterError::ReentrantInitialization),
                ).boxed_local().shared(),
            }
        };

        let shared = initializer().shared();
        *self.state.borrow_mut() = LazyState::Started(shared.clone());
        shared
    }
}
impl<T: Clone + 'static> Clone for LazyValue<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
impl<T: Clone + 'static> std::fmt::Debug for LazyValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.state.borrow() {
            LazyState::Initializing => "initializing",
            LazyState::NotStarted(_) => "not started",
            LazyState::Started(shared) if shared.peek().is_some() => "complete",
            LazyState::Started(_) => "pending",
        };
        f.debug_struct("LazyValue").field("state", &state).finish()
    }
}
impl<T: Clone + 'static> IntoFuture for LazyValue<T> {
    type Output = Result<T>;
    type IntoFuture = SharedResult<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.shared()
    }
}
impl<T: Clone + 'static> IntoFuture for &LazyValue<T> {
    type Output = Result<T>;
    type IntoFuture = SharedResult<T>;

    fn into_future(self) -> Self::IntoFuture {
        self.shared()
    }
}
