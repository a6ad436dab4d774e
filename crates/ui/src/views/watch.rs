use dioxus::prelude::*;
use tokio::sync::watch;

/// Mirror a view-model `watch` channel into a signal for rendering.
///
/// The receiver is created once per component; the signal follows every
/// value published after that until the sender is dropped.
pub fn use_watch<T>(subscribe: impl FnOnce() -> watch::Receiver<T>) -> Signal<T>
where
    T: Clone + 'static,
{
    let rx = use_hook(subscribe);
    let mut value = use_signal(|| rx.borrow().clone());

    use_future(move || {
        let mut rx = rx.clone();
        async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                value.set(next);
            }
        }
    });

    value
}
