use super::MapEvent;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Receiving end of a map event subscription.
///
/// The stream ends once the map drops the sending side, i.e. after
/// `unsubscribe` or, for click subscriptions, when the layer is removed.
#[derive(Debug)]
pub struct Subscription {
	id: SubscriptionId,
	receiver: UnboundedReceiver<MapEvent>,
}

impl Subscription {
	/// Creates a subscription and the sender a map adapter keeps for it.
	pub fn channel(id: SubscriptionId) -> (UnboundedSender<MapEvent>, Subscription) {
		let (sender, receiver) = unbounded_channel();
		(sender, Subscription { id, receiver })
	}

	pub fn id(&self) -> SubscriptionId {
		self.id
	}

	/// Waits for the next event, `None` once the subscription is closed.
	pub async fn recv(&mut self) -> Option<MapEvent> {
		self.receiver.recv().await
	}

	/// Returns a queued event without waiting.
	pub fn try_recv(&mut self) -> Option<MapEvent> {
		self.receiver.try_recv().ok()
	}

	/// `true` once the sender is gone and no events are queued.
	pub fn is_closed(&self) -> bool {
		self.receiver.is_closed() && self.receiver.is_empty()
	}
}
