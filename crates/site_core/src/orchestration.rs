//! Ordered host event queue feeding the site dispatcher.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use shared::protocol::UiEvent;

pub fn event_queue(capacity: usize) -> (Sender<UiEvent>, Receiver<UiEvent>) {
    bounded(capacity.max(1))
}

pub fn event_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::NavLinkClicked { .. } => "nav_link_clicked",
        UiEvent::ButtonContainerClicked { .. } => "button_container_clicked",
        UiEvent::TogglerClicked => "toggler_clicked",
        UiEvent::GridClicked { .. } => "grid_clicked",
        UiEvent::ModalClicked { .. } => "modal_clicked",
        UiEvent::KeyDown { .. } => "key_down",
        UiEvent::FocusChanged { .. } => "focus_changed",
        UiEvent::Intersection { .. } => "intersection",
        UiEvent::ViewportResized { .. } => "viewport_resized",
    }
}

/// Queues a host event; on failure `status` carries the reason.
pub fn dispatch_ui_event(tx: &Sender<UiEvent>, event: UiEvent, status: &mut String) -> bool {
    let name = event_name(&event);
    match tx.try_send(event) {
        Ok(()) => {
            tracing::trace!(event = name, "queued host event");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = format!("event queue is full; dropped {name}");
            tracing::warn!(event = name, "event queue full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = format!("event dispatcher disconnected; dropped {name}");
            tracing::warn!(event = name, "event dispatcher disconnected");
            false
        }
    }
}
