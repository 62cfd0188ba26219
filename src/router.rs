//! Dispatches decoded frames to the handler registered for their
//! `(channel, class-id, method-id)`, plus a single heartbeat handler slot.
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AmqpResult;
use crate::frame::{Frame, FramePayload};
use crate::methods::MethodArguments;

/// Handles one decoded method frame's arguments.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    async fn handle(&self, arguments: MethodArguments) -> AmqpResult<()>;
}

/// Handles an incoming heartbeat frame.
#[async_trait]
pub trait HeartbeatHandler: Send + Sync {
    async fn handle(&self) -> AmqpResult<()>;
}

/// What happened when a frame was handed to the router.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    Dispatched,
    /// No handler was registered for this frame; the connection logs and
    /// continues, matching the source's catch-and-skip on a missing route.
    NoRoute,
}

#[derive(Default)]
pub struct FrameRouter {
    method_routes: HashMap<(u16, u16, u16), Box<dyn MethodHandler>>,
    heartbeat_route: Option<Box<dyn HeartbeatHandler>>,
}

impl FrameRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_method_route(
        &mut self,
        channel: u16,
        class_id: u16,
        method_id: u16,
        handler: Box<dyn MethodHandler>,
    ) {
        self.method_routes.insert((channel, class_id, method_id), handler);
    }

    pub fn register_heartbeat_route(&mut self, handler: Box<dyn HeartbeatHandler>) {
        self.heartbeat_route = Some(handler);
    }

    /// Dispatches `frame` to its registered handler, sequentially: callers
    /// are expected to await this before reading the next frame off the
    /// transport, since handlers may themselves send frames.
    pub async fn route(&self, frame: Frame) -> AmqpResult<RouteOutcome> {
        match frame.payload {
            FramePayload::Method(method_frame) => {
                let key = (
                    frame.channel,
                    method_frame.arguments.class_id(),
                    method_frame.arguments.method_id(),
                );
                match self.method_routes.get(&key) {
                    Some(handler) => {
                        handler.handle(method_frame.arguments).await?;
                        Ok(RouteOutcome::Dispatched)
                    }
                    None => Ok(RouteOutcome::NoRoute),
                }
            }
            FramePayload::Heartbeat => match &self.heartbeat_route {
                Some(handler) => {
                    handler.handle().await?;
                    Ok(RouteOutcome::Dispatched)
                }
                None => Ok(RouteOutcome::NoRoute),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::connection;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl MethodHandler for CountingHandler {
        async fn handle(&self, _arguments: MethodArguments) -> AmqpResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatches_to_the_registered_handler() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut router = FrameRouter::new();
        router.register_method_route(
            0,
            connection::CLASS_ID,
            connection::CloseOk::METHOD_ID,
            Box::new(CountingHandler(count.clone())),
        );

        let frame = Frame::method(0, MethodArguments::ConnectionCloseOk(connection::CloseOk));
        let outcome = router.route(frame).await.unwrap();
        assert_eq!(outcome, RouteOutcome::Dispatched);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_route_is_reported_without_erroring() {
        let router = FrameRouter::new();
        let frame = Frame::method(0, MethodArguments::ConnectionCloseOk(connection::CloseOk));
        assert_eq!(router.route(frame).await.unwrap(), RouteOutcome::NoRoute);
    }
}
