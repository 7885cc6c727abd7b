//! Core signal dispatch.

use crate::error::SignalError;
use crate::name::SignalName;
use parking_lot::RwLock;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Signal receiver function type.
pub type ReceiverFn<T> = Arc<
	dyn Fn(Arc<T>) -> Pin<Box<dyn Future<Output = Result<(), SignalError>> + Send>> + Send + Sync,
>;

/// Information about a connected receiver.
struct ReceiverInfo<T: Send + Sync + 'static> {
	receiver: ReceiverFn<T>,
	dispatch_uid: Option<String>,
	priority: i32, // Higher values execute first
}

impl<T: Send + Sync + 'static> Clone for ReceiverInfo<T> {
	fn clone(&self) -> Self {
		Self {
			receiver: Arc::clone(&self.receiver),
			dispatch_uid: self.dispatch_uid.clone(),
			priority: self.priority,
		}
	}
}

/// A signal that dispatches events to connected receivers.
///
/// Receivers are async closures invoked in priority order (descending,
/// registration order within a priority). A `Signal` is cheaply clonable;
/// clones share the same receiver list.
pub struct Signal<T: Send + Sync + 'static> {
	receivers: Arc<RwLock<Vec<ReceiverInfo<T>>>>,
	name: String,
}

impl<T: Send + Sync + 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			receivers: Arc::clone(&self.receivers),
			name: self.name.clone(),
		}
	}
}

impl<T: Send + Sync + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("name", &self.name)
			.field("receiver_count", &self.receiver_count())
			.finish()
	}
}

impl<T: Send + Sync + 'static> Signal<T> {
	/// Create a new signal with a type-safe name.
	///
	/// # Examples
	///
	/// ```
	/// use vitrine_signals::{Signal, SignalName};
	///
	/// let signal = Signal::<String>::new(SignalName::MODAL_OPENED);
	/// assert_eq!(signal.name(), "modal_opened");
	/// ```
	pub fn new(name: SignalName) -> Self {
		Self {
			receivers: Arc::new(RwLock::new(Vec::new())),
			name: name.as_str().to_string(),
		}
	}

	/// Returns this signal's name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Connect a receiver function to this signal.
	pub fn connect<F, Fut>(&self, receiver: F)
	where
		F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<(), SignalError>> + Send + 'static,
	{
		self.connect_with_options(receiver, None, 0);
	}

	/// Connect a receiver with a dispatch uid and priority.
	///
	/// # Arguments
	/// * `receiver` - The receiver function to connect
	/// * `dispatch_uid` - Optional unique identifier; a second connection
	///   with the same uid replaces the first
	/// * `priority` - Execution priority (higher values execute first)
	pub fn connect_with_options<F, Fut>(
		&self,
		receiver: F,
		dispatch_uid: Option<String>,
		priority: i32,
	) where
		F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<(), SignalError>> + Send + 'static,
	{
		let boxed: ReceiverFn<T> = Arc::new(move |instance| Box::pin(receiver(instance)));
		let mut receivers = self.receivers.write();

		// Remove existing receiver with the same dispatch_uid
		if let Some(ref uid) = dispatch_uid {
			receivers.retain(|r| r.dispatch_uid.as_deref() != Some(uid));
		}

		receivers.push(ReceiverInfo {
			receiver: boxed,
			dispatch_uid,
			priority,
		});

		// Sort by priority (descending - higher priority first)
		receivers.sort_by(|a, b| b.priority.cmp(&a.priority));
	}

	/// Disconnect a receiver by dispatch uid.
	///
	/// Returns `true` if a receiver was removed.
	pub fn disconnect(&self, dispatch_uid: &str) -> bool {
		let mut receivers = self.receivers.write();
		let before = receivers.len();
		receivers.retain(|r| r.dispatch_uid.as_deref() != Some(dispatch_uid));
		receivers.len() != before
	}

	/// Remove all connected receivers.
	pub fn disconnect_all(&self) {
		self.receivers.write().clear();
	}

	/// Returns the number of connected receivers.
	pub fn receiver_count(&self) -> usize {
		self.receivers.read().len()
	}

	/// Send this signal to all connected receivers.
	///
	/// Stops at the first receiver error.
	///
	/// # Errors
	///
	/// Returns the first [`SignalError`] raised by a receiver.
	pub async fn send(&self, instance: T) -> Result<(), SignalError> {
		let instance = Arc::new(instance);
		let receivers = self.receivers.read().clone();

		for info in receivers {
			(info.receiver)(Arc::clone(&instance)).await?;
		}

		Ok(())
	}

	/// Send this signal robustly, catching receiver errors.
	///
	/// Every receiver runs regardless of earlier failures; the per-receiver
	/// results are returned in dispatch order.
	pub async fn send_robust(&self, instance: T) -> Vec<Result<(), SignalError>> {
		let instance = Arc::new(instance);
		let receivers = self.receivers.read().clone();
		let mut results = Vec::with_capacity(receivers.len());

		for info in receivers {
			results.push((info.receiver)(Arc::clone(&instance)).await);
		}

		results
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::Mutex;

	fn counter_signal() -> (Signal<u32>, Arc<Mutex<Vec<u32>>>) {
		let signal = Signal::<u32>::new(SignalName::custom("test_signal"));
		let seen = Arc::new(Mutex::new(Vec::new()));
		(signal, seen)
	}

	#[tokio::test]
	async fn test_send_reaches_all_receivers() {
		let (signal, seen) = counter_signal();
		for _ in 0..3 {
			let seen = Arc::clone(&seen);
			signal.connect(move |value| {
				let seen = Arc::clone(&seen);
				async move {
					seen.lock().push(*value);
					Ok(())
				}
			});
		}

		signal.send(7).await.unwrap();
		assert_eq!(seen.lock().as_slice(), &[7, 7, 7]);
	}

	#[tokio::test]
	async fn test_priority_order() {
		let (signal, seen) = counter_signal();
		for (priority, tag) in [(0, 1u32), (10, 2), (5, 3)] {
			let seen = Arc::clone(&seen);
			signal.connect_with_options(
				move |_| {
					let seen = Arc::clone(&seen);
					async move {
						seen.lock().push(tag);
						Ok(())
					}
				},
				None,
				priority,
			);
		}

		signal.send(0).await.unwrap();
		assert_eq!(seen.lock().as_slice(), &[2, 3, 1]);
	}

	#[tokio::test]
	async fn test_dispatch_uid_replaces_earlier_connection() {
		let (signal, seen) = counter_signal();
		for tag in [1u32, 2] {
			let seen = Arc::clone(&seen);
			signal.connect_with_options(
				move |_| {
					let seen = Arc::clone(&seen);
					async move {
						seen.lock().push(tag);
						Ok(())
					}
				},
				Some("chrome".to_string()),
				0,
			);
		}

		assert_eq!(signal.receiver_count(), 1);
		signal.send(0).await.unwrap();
		assert_eq!(seen.lock().as_slice(), &[2]);
	}

	#[tokio::test]
	async fn test_disconnect_by_uid() {
		let (signal, _seen) = counter_signal();
		signal.connect_with_options(|_| async { Ok(()) }, Some("a".to_string()), 0);
		signal.connect(|_| async { Ok(()) });

		assert!(signal.disconnect("a"));
		assert!(!signal.disconnect("a"));
		assert_eq!(signal.receiver_count(), 1);
	}

	#[tokio::test]
	async fn test_send_stops_at_first_error() {
		let (signal, seen) = counter_signal();
		signal.connect_with_options(
			|_| async { Err(SignalError::new("boom")) },
			None,
			10,
		);
		{
			let seen = Arc::clone(&seen);
			signal.connect(move |value| {
				let seen = Arc::clone(&seen);
				async move {
					seen.lock().push(*value);
					Ok(())
				}
			});
		}

		assert!(signal.send(1).await.is_err());
		assert!(seen.lock().is_empty());
	}

	#[tokio::test]
	async fn test_send_robust_collects_results() {
		let (signal, _seen) = counter_signal();
		signal.connect_with_options(
			|_| async { Err(SignalError::new("boom")) },
			None,
			10,
		);
		signal.connect(|_| async { Ok(()) });

		let results = signal.send_robust(1).await;
		assert_eq!(results.len(), 2);
		assert!(results[0].is_err());
		assert!(results[1].is_ok());
	}

	#[tokio::test]
	async fn test_disconnect_all() {
		let (signal, _seen) = counter_signal();
		signal.connect(|_| async { Ok(()) });
		signal.connect(|_| async { Ok(()) });
		signal.disconnect_all();
		assert_eq!(signal.receiver_count(), 0);
	}
}
