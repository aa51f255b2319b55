use scenebridge_shared::OutgoingMessage;

/// Outbound half of the protocol transport.
///
/// The engine only calls `send` while a session is connected. Delivery is
/// fire-and-forget; the transport is expected to queue reliably on its own.
pub trait Transport {
    fn send(&mut self, message: OutgoingMessage);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, message: OutgoingMessage) {
        (**self).send(message);
    }
}
