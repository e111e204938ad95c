//! Call session state
//!
//! At most one incoming and one active call exist at any time. The active
//! call owns transient media-stream and peer-connection handles: process-
//! local resources that are excluded from snapshots and released as one
//! group by [`CallState::clear_active_call`].

use piazza_core::{ActiveCall, CallStatus, IncomingCall, StateCell};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque handle to a platform media stream.
///
/// The core never inspects the stream; it only tracks ownership so release
/// is deterministic. Cloning shares the underlying resource.
#[derive(Clone)]
pub struct MediaStreamHandle(Arc<dyn Any + Send + Sync>);

impl MediaStreamHandle {
    /// Wrap a platform stream object.
    pub fn new<T: Any + Send + Sync>(inner: T) -> Self {
        Self(Arc::new(inner))
    }

    /// Borrow the platform object back, when the caller knows its type.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for MediaStreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MediaStreamHandle(..)")
    }
}

/// Opaque handle to a platform peer connection.
#[derive(Clone)]
pub struct PeerConnectionHandle(Arc<dyn Any + Send + Sync>);

impl PeerConnectionHandle {
    /// Wrap a platform connection object.
    pub fn new<T: Any + Send + Sync>(inner: T) -> Self {
        Self(Arc::new(inner))
    }

    /// Borrow the platform object back, when the caller knows its type.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for PeerConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PeerConnectionHandle(..)")
    }
}

/// State of the call surface.
///
/// The handle fields are serialization-exempt: snapshots carry the call
/// descriptors and flags, never the runtime resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallState {
    /// Ring awaiting an answer, when any.
    pub incoming_call: Option<IncomingCall>,
    /// The call in progress, when any.
    pub active_call: Option<ActiveCall>,
    /// Local capture stream.
    #[serde(skip)]
    pub local_stream: Option<MediaStreamHandle>,
    /// Remote stream.
    #[serde(skip)]
    pub remote_stream: Option<MediaStreamHandle>,
    /// Peer connection carrying both streams.
    #[serde(skip)]
    pub peer_connection: Option<PeerConnectionHandle>,
    /// Microphone muted.
    pub is_muted: bool,
    /// Camera off.
    pub is_video_off: bool,
}

impl CallState {
    /// Record an inbound ring, replacing any previous one.
    pub fn set_incoming_call(&mut self, call: IncomingCall) {
        self.incoming_call = Some(call);
    }

    /// Drop the pending ring (answered, rejected, or timed out).
    pub fn clear_incoming_call(&mut self) {
        self.incoming_call = None;
    }

    /// Install the call in progress, replacing any previous one.
    pub fn set_active_call(&mut self, call: ActiveCall) {
        self.active_call = Some(call);
    }

    /// Advance the active call's lifecycle status; no-op without a call.
    pub fn update_call_status(&mut self, status: CallStatus) {
        if let Some(call) = &mut self.active_call {
            call.status = status;
        }
    }

    /// Attach the local capture stream.
    pub fn set_local_stream(&mut self, stream: MediaStreamHandle) {
        self.local_stream = Some(stream);
    }

    /// Attach the remote stream.
    pub fn set_remote_stream(&mut self, stream: MediaStreamHandle) {
        self.remote_stream = Some(stream);
    }

    /// Attach the peer connection.
    pub fn set_peer_connection(&mut self, connection: PeerConnectionHandle) {
        self.peer_connection = Some(connection);
    }

    /// Flip the microphone flag.
    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    /// Flip the camera flag.
    pub fn toggle_video(&mut self) {
        self.is_video_off = !self.is_video_off;
    }

    /// End the active call: the call record, both streams, the peer
    /// connection, and both media flags reset together. Releasing as one
    /// group means a stream reference can never outlive its call.
    pub fn clear_active_call(&mut self) {
        self.active_call = None;
        self.local_stream = None;
        self.remote_stream = None;
        self.peer_connection = None;
        self.is_muted = false;
        self.is_video_off = false;
    }
}

/// Scoped owner of a call's media resources.
///
/// The call surface acquires streams and the peer connection through this
/// guard; dropping it (normal hang-up, error, navigation away) runs
/// [`CallState::clear_active_call`] exactly once, so every exit path
/// releases the whole resource group.
pub struct CallMediaGuard {
    cell: StateCell<CallState>,
    released: bool,
}

impl CallMediaGuard {
    /// Take ownership of the media lifecycle for the current call.
    pub fn new(cell: StateCell<CallState>) -> Self {
        Self {
            cell,
            released: false,
        }
    }

    /// Attach the local capture stream.
    pub fn attach_local_stream(&self, stream: MediaStreamHandle) {
        self.cell.mutate(|call| call.set_local_stream(stream));
    }

    /// Attach the remote stream.
    pub fn attach_remote_stream(&self, stream: MediaStreamHandle) {
        self.cell.mutate(|call| call.set_remote_stream(stream));
    }

    /// Attach the peer connection.
    pub fn attach_peer_connection(&self, connection: PeerConnectionHandle) {
        self.cell.mutate(|call| call.set_peer_connection(connection));
    }

    /// Release explicitly instead of at scope end.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.released = true;
            self.cell.mutate(CallState::clear_active_call);
        }
    }
}

impl Drop for CallMediaGuard {
    fn drop(&mut self) {
        self.release_inner();
    }
}
