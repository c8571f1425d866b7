use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cracky_api::CrackyApiClient;
use search_state::SearchFields;

use crate::widget::{
    AssistantWidget, SendFailureKind, SendId, SendOutcome, SendRequest, WidgetHost,
};

enum ControllerEvent {
    SendResolved {
        request: SendRequest,
        outcome: SendOutcome,
    },
    QuickSendDue,
}

struct ActiveSend {
    send_id: SendId,
    join_handle: Option<JoinHandle<()>>,
}

/// Bridges the async chat client into the single-threaded widget loop.
///
/// `dispatch_send` runs the remote call on a worker thread and queues the
/// outcome; the widget thread applies queued outcomes in arrival order via
/// [`WidgetController::flush_pending_events`]. Hosts that render should
/// call that after every input event and whenever they are woken.
pub struct WidgetController {
    client: Arc<CrackyApiClient>,
    pending_events: Arc<Mutex<VecDeque<ControllerEvent>>>,
    active_send: Mutex<Option<ActiveSend>>,
    render_requested: AtomicBool,
}

impl WidgetController {
    pub fn new(client: CrackyApiClient) -> Arc<Self> {
        Arc::new(Self {
            client: Arc::new(client),
            pending_events: Arc::new(Mutex::new(VecDeque::new())),
            active_send: Mutex::new(None),
            render_requested: AtomicBool::new(false),
        })
    }

    /// Applies every queued controller event to the widget and returns how
    /// many were applied.
    pub fn flush_pending_events(
        self: &Arc<Self>,
        widget: &mut AssistantWidget,
        fields: &mut SearchFields,
    ) -> usize {
        let mut applied = 0usize;

        loop {
            let event = {
                let mut pending_events = lock_unpoisoned(&self.pending_events);
                pending_events.pop_front()
            };

            let Some(event) = event else {
                break;
            };

            let mut host = Arc::clone(self);
            match event {
                ControllerEvent::SendResolved { request, outcome } => {
                    widget.on_send_result(&request, outcome, &mut host);
                }
                ControllerEvent::QuickSendDue => {
                    widget.on_send(fields, &mut host);
                }
            }
            applied += 1;
        }

        applied
    }

    #[must_use]
    pub fn has_pending_events(&self) -> bool {
        !lock_unpoisoned(&self.pending_events).is_empty()
    }

    /// Returns and clears the render request raised by widget callbacks.
    pub fn take_render_request(&self) -> bool {
        self.render_requested.swap(false, Ordering::SeqCst)
    }

    fn dispatch_send_internal(self: &Arc<Self>, request: SendRequest) -> Result<(), String> {
        let mut active_send = self.lock_active_send();
        if active_send.is_some() {
            return Err("Send already active".to_string());
        }

        let send_id = request.send_id;
        let join_handle = self.spawn_send_worker(request)?;
        *active_send = Some(ActiveSend {
            send_id,
            join_handle: Some(join_handle),
        });

        Ok(())
    }

    fn spawn_send_worker(
        self: &Arc<Self>,
        request: SendRequest,
    ) -> Result<JoinHandle<()>, String> {
        let controller = Arc::clone(self);
        thread::Builder::new()
            .name(format!("cracky-send-{}", request.send_id))
            .spawn(move || controller.send_worker(request))
            .map_err(|error| format!("Failed to spawn send worker: {error}"))
    }

    fn send_worker(self: Arc<Self>, request: SendRequest) {
        let outcome = self.resolve_outcome(&request);
        let send_id = request.send_id;
        self.enqueue_event(ControllerEvent::SendResolved { request, outcome });
        self.clear_active_send_if_matching(send_id);
    }

    fn resolve_outcome(&self, request: &SendRequest) -> SendOutcome {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(error) => {
                return SendOutcome::Failed {
                    kind: SendFailureKind::Transport,
                    detail: format!("failed to initialize tokio runtime: {error}"),
                }
            }
        };

        let result = runtime.block_on(
            self.client
                .send_message(&request.text, request.bearer_token.as_deref()),
        );

        match result {
            Ok(reply) => SendOutcome::Reply { text: reply.reply },
            Err(error) if error.is_unauthorized() => SendOutcome::Failed {
                kind: SendFailureKind::Unauthorized,
                detail: error.to_string(),
            },
            Err(error) => SendOutcome::Failed {
                kind: SendFailureKind::Transport,
                detail: error.to_string(),
            },
        }
    }

    fn schedule_quick_send_internal(self: &Arc<Self>, delay: Duration) {
        let controller = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name("cracky-quick-send".to_string())
            .spawn(move || {
                thread::sleep(delay);
                controller.enqueue_event(ControllerEvent::QuickSendDue);
            });

        if let Err(error) = spawned {
            log::warn!("failed to schedule quick send: {error}");
        }
    }

    fn enqueue_event(self: &Arc<Self>, event: ControllerEvent) {
        let mut pending_events = lock_unpoisoned(&self.pending_events);
        pending_events.push_back(event);
    }

    fn clear_active_send_if_matching(&self, send_id: SendId) {
        let mut active_send = self.lock_active_send();
        let matches = active_send.as_ref().map(|active| active.send_id) == Some(send_id);
        if !matches {
            return;
        }

        let mut completed = match active_send.take() {
            Some(completed) => completed,
            None => return,
        };

        if let Some(join_handle) = completed.join_handle.take() {
            let is_current_thread = join_handle.thread().id() == thread::current().id();
            if !is_current_thread && join_handle.is_finished() {
                let _ = join_handle.join();
            }
        }
    }

    fn lock_active_send(&self) -> MutexGuard<'_, Option<ActiveSend>> {
        lock_unpoisoned(&self.active_send)
    }
}

impl WidgetHost for Arc<WidgetController> {
    fn dispatch_send(&mut self, request: SendRequest) -> Result<(), String> {
        self.dispatch_send_internal(request)
    }

    fn schedule_quick_send(&mut self, delay: Duration) {
        self.schedule_quick_send_internal(delay)
    }

    fn request_render(&mut self) {
        self.render_requested.store(true, Ordering::SeqCst);
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
