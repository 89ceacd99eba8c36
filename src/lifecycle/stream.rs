use crate::handle::ScreenHandle;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Releases a listener registration when dropped.
pub(crate) struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

/// Screens delivered to one phase, backed by its own listener registration.
///
/// The listener is registered when the stream is created and removed when
/// the stream is dropped, including when the task polling it is cancelled.
pub struct ListenerStream {
    screens: UnboundedReceiverStream<ScreenHandle>,
    _subscription: Subscription,
}

impl ListenerStream {
    pub(crate) fn new(
        receiver: mpsc::UnboundedReceiver<ScreenHandle>,
        subscription: Subscription,
    ) -> Self {
        Self {
            screens: UnboundedReceiverStream::new(receiver),
            _subscription: subscription,
        }
    }
}

impl Stream for ListenerStream {
    type Item = ScreenHandle;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.screens).poll_next(cx)
    }
}
