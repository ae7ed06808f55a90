//! Chat Controller
//!
//! Binds user intents to use cases and owns the [`ChatViewModel`].
//! Runs as an actor: commands are handled one at a time, in order, and a
//! fresh view snapshot is emitted as a [`UiEvent`] after every mutation.
//!
//! Nothing in the loop waits on the network. Server round trips are queued
//! as [`Request`]s and run one at a time on a spawned task, so they reach
//! the server and apply to the view in the order they were asked for.
//! Their results and the debounced or delayed effects (driven by
//! [`TimerSlot`]s) come back through the same loop.

use crate::config::UiTiming;
use crate::ports::chat_api::{ChatApi, ChatReply};
use crate::ports::clipboard::ClipboardPort;
use crate::ports::confirmation::ConfirmationPort;
use crate::ports::ui_event::UiEvent;
use crate::use_cases::deferred::TimerSlot;
use crate::use_cases::render_message::MessageRenderer;
use crate::use_cases::send_message::{SendMessageError, SendMessageUseCase};
use crate::use_cases::session_client::{
    NewConversation, OpenedSession, Removal, SessionClient, SessionError,
};
use docchat_domain::text::{APOLOGY_MESSAGE, COPY_FAILED_TOAST, COPY_TOAST, DELETE_FAILED_ALERT};
use docchat_domain::{
    ChatViewModel, MessageView, Role, Session, SessionId, ToastPhase, pick_follow_ups,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// User intents accepted by the controller
///
/// Message targets are indices into the current conversation; `None`
/// means the newest message at the time the controller handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Initial load: session list, then current history
    Init,
    /// Composer submit
    Submit(String),
    NewSession,
    SwitchSession(SessionId),
    DeleteSession(SessionId),
    RefreshSessions,
    ToggleSidebar,
    CloseSidebar,
    /// Search box changed; applied after the debounce delay
    FilterChanged(String),
    ToggleExpanded(Option<usize>),
    CopyMessage(Option<usize>),
    EditMessage(Option<usize>),
    /// Submit the follow-up chip at this position
    ChooseFollowUp(usize),
    Quit,
}

/// Deferred effects delivered back to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
enum TimerEvent {
    ApplyFilter { generation: u64, query: String },
    ShowFollowUps { generation: u64 },
    FocusComposer { generation: u64 },
    AdvanceToast { generation: u64 },
}

/// Server round trips, run one at a time away from the loop
#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    Init,
    Send(String),
    Refresh,
    Create,
    Switch(SessionId),
    Delete(SessionId),
}

/// A finished [`Request`], applied back on the loop
#[derive(Debug)]
enum Completion {
    Loaded {
        sessions: Option<Vec<Session>>,
        history: Vec<MessageView>,
    },
    Replied(Result<ChatReply, SendMessageError>),
    Listed(Option<Vec<Session>>),
    Created(Option<NewConversation>),
    Switched(Option<OpenedSession>),
    Deleted(Result<Removal, SessionError>),
}

/// Controller owning the chat view-model
pub struct ChatController {
    api: Arc<dyn ChatApi>,
    clipboard: Arc<dyn ClipboardPort>,
    confirmation: Arc<dyn ConfirmationPort>,
    send_use_case: SendMessageUseCase,
    sessions: SessionClient,
    renderer: MessageRenderer,
    timing: UiTiming,
    view: ChatViewModel,
    rng: StdRng,
    /// Channel sender for UI events
    tx: mpsc::UnboundedSender<UiEvent>,
    timer_tx: mpsc::UnboundedSender<TimerEvent>,
    timer_rx: Option<mpsc::UnboundedReceiver<TimerEvent>>,
    filter_timer: TimerSlot,
    follow_up_timer: TimerSlot,
    focus_timer: TimerSlot,
    toast_timer: TimerSlot,
    /// Generation of the toast the toast timer is driving
    toast_generation: u64,
    // -- Server requests --
    requests: VecDeque<Request>,
    in_flight: Option<JoinHandle<()>>,
    done_tx: mpsc::UnboundedSender<Completion>,
    done_rx: Option<mpsc::UnboundedReceiver<Completion>>,
}

impl ChatController {
    pub fn new(
        api: Arc<dyn ChatApi>,
        clipboard: Arc<dyn ClipboardPort>,
        confirmation: Arc<dyn ConfirmationPort>,
        timing: UiTiming,
        tx: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        let renderer = MessageRenderer::new();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = mpsc::unbounded_channel();

        Self {
            send_use_case: SendMessageUseCase::new(api.clone()),
            sessions: SessionClient::new(api.clone(), renderer.clone(), confirmation.clone()),
            api,
            clipboard,
            confirmation,
            renderer,
            timing,
            view: ChatViewModel::new(),
            rng: StdRng::from_entropy(),
            tx,
            timer_tx,
            timer_rx: Some(timer_rx),
            filter_timer: TimerSlot::new(),
            follow_up_timer: TimerSlot::new(),
            focus_timer: TimerSlot::new(),
            toast_timer: TimerSlot::new(),
            toast_generation: 0,
            requests: VecDeque::new(),
            in_flight: None,
            done_tx,
            done_rx: Some(done_rx),
        }
    }

    /// Use `renderer` for every bubble, including session history
    pub fn with_renderer(mut self, renderer: MessageRenderer) -> Self {
        self.sessions = SessionClient::new(
            self.api.clone(),
            renderer.clone(),
            self.confirmation.clone(),
        );
        self.renderer = renderer;
        self
    }

    pub fn with_sidebar_open(mut self, open: bool) -> Self {
        self.view = self.view.with_sidebar_open(open);
        self
    }

    /// Deterministic follow-up selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn view(&self) -> &ChatViewModel {
        &self.view
    }

    /// Process commands until `Quit` or until every sender is dropped.
    pub async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<ChatCommand>) {
        let (Some(mut timers), Some(mut completions)) = (self.timer_rx.take(), self.done_rx.take())
        else {
            warn!("Chat controller started twice");
            return;
        };
        info!("Chat controller started");

        loop {
            tokio::select! {
                command = inbox.recv() => match command {
                    Some(ChatCommand::Quit) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(event) = timers.recv() => self.handle_timer(event),
                Some(done) = completions.recv() => self.finish_request(done),
            }
        }

        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        info!("Chat controller stopped");
        let _ = self.tx.send(UiEvent::Exit);
    }

    pub fn handle_command(&mut self, command: ChatCommand) {
        debug!("Handling command: {:?}", command);
        match command {
            ChatCommand::Init => self.enqueue(Request::Init),
            ChatCommand::Submit(text) => self.submit(&text),
            ChatCommand::NewSession => self.enqueue(Request::Create),
            ChatCommand::SwitchSession(id) => self.enqueue(Request::Switch(id)),
            ChatCommand::DeleteSession(id) => self.enqueue(Request::Delete(id)),
            ChatCommand::RefreshSessions => self.enqueue(Request::Refresh),
            ChatCommand::ToggleSidebar => {
                let open = self.view.toggle_sidebar();
                debug!("Sidebar {}", if open { "opened" } else { "closed" });
                self.emit_view();
            }
            ChatCommand::CloseSidebar => {
                if self.view.sidebar_open() {
                    self.view.close_sidebar();
                    self.emit_view();
                }
            }
            ChatCommand::FilterChanged(query) => {
                self.filter_timer
                    .arm(self.timing.filter_debounce, &self.timer_tx, |generation| {
                        TimerEvent::ApplyFilter { generation, query }
                    });
            }
            ChatCommand::ToggleExpanded(target) => {
                if let Some(index) = self.resolve_target(target) {
                    if self.view.toggle_expanded(index) {
                        self.emit_view();
                    }
                }
            }
            ChatCommand::CopyMessage(target) => {
                if let Some(index) = self.resolve_target(target) {
                    self.copy_message(index);
                }
            }
            ChatCommand::EditMessage(target) => {
                let editable = self
                    .resolve_target(target)
                    .and_then(|index| self.view.message(index))
                    .filter(|m| m.can_edit());
                if let Some(message) = editable {
                    let _ = self.tx.send(UiEvent::FillComposer(message.content.clone()));
                }
            }
            ChatCommand::ChooseFollowUp(index) => {
                if let Some(text) = self.view.follow_ups().get(index).cloned() {
                    self.submit(&text);
                }
            }
            ChatCommand::Quit => {}
        }
    }

    fn resolve_target(&self, target: Option<usize>) -> Option<usize> {
        target.or_else(|| self.view.messages().len().checked_sub(1))
    }

    fn submit(&mut self, text: &str) {
        let message = text.trim();
        if message.is_empty() {
            return;
        }

        self.follow_up_timer.disarm();
        let had_follow_ups = !self.view.follow_ups().is_empty();
        self.view.clear_follow_ups();
        let queued = self.in_flight.is_some();
        self.enqueue(Request::Send(message.to_string()));
        // A queued send shows its bubble when it starts; hide the chips now
        if queued && had_follow_ups {
            self.emit_view();
        }
    }

    fn enqueue(&mut self, request: Request) {
        if self.in_flight.is_some() {
            debug!("Queued behind the request in flight: {:?}", request);
        }
        self.requests.push_back(request);
        if self.in_flight.is_none() {
            self.start_next_request();
        }
    }

    fn start_next_request(&mut self) {
        let Some(request) = self.requests.pop_front() else {
            return;
        };
        debug!("Starting request: {:?}", request);

        let sessions = self.sessions.clone();
        match request {
            Request::Init => self.spawn_request(async move {
                let listed = sessions.fetch_sessions().await.ok();
                let history = sessions.fetch_history().await;
                Completion::Loaded {
                    sessions: listed,
                    history,
                }
            }),
            Request::Send(message) => {
                self.view
                    .push_message(self.renderer.render(Role::User, message.clone()));
                self.view.begin_pending();
                self.emit_view();

                let use_case = self.send_use_case.clone();
                self.spawn_request(async move {
                    Completion::Replied(use_case.execute(&message).await)
                });
            }
            Request::Refresh => self.spawn_request(async move {
                Completion::Listed(sessions.fetch_sessions().await.ok())
            }),
            Request::Create => self.spawn_request(async move {
                Completion::Created(sessions.open_new().await.ok())
            }),
            Request::Switch(id) => self.spawn_request(async move {
                Completion::Switched(sessions.open(id).await.ok())
            }),
            Request::Delete(id) => {
                // Only requests change the active id, and they run one at a time
                let was_active = self.view.is_active(&id);
                self.spawn_request(async move {
                    Completion::Deleted(sessions.remove(id, was_active).await)
                });
            }
        }
    }

    fn spawn_request<F>(&mut self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let done_tx = self.done_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            // Receiver gone means the controller shut down
            let _ = done_tx.send(work.await);
        }));
    }

    fn finish_request(&mut self, completion: Completion) {
        self.in_flight = None;
        match completion {
            Completion::Loaded { sessions, history } => {
                if let Some(sessions) = sessions {
                    self.view.set_sessions(sessions);
                }
                for message in history {
                    self.view.push_message(message);
                }
                self.emit_view();
            }
            Completion::Replied(Ok(reply)) => {
                if !reply.documents.is_empty() {
                    debug!("Reply cited documents: {:?}", reply.documents);
                }
                self.view
                    .resolve_pending(self.renderer.render(Role::Assistant, reply.response));
                self.emit_view();

                self.follow_up_timer
                    .arm(self.timing.follow_up_delay, &self.timer_tx, |generation| {
                        TimerEvent::ShowFollowUps { generation }
                    });
                self.arm_focus();
                // The server may have retitled the session
                self.requests.push_front(Request::Refresh);
            }
            Completion::Replied(Err(e)) => {
                match &e {
                    SendMessageError::Api(api) => error!("Error: {}", api),
                    SendMessageError::Invalid(invalid) => warn!("{}", invalid),
                }
                self.view
                    .resolve_pending(self.renderer.render(Role::Assistant, APOLOGY_MESSAGE));
                self.emit_view();
                self.arm_focus();
            }
            Completion::Listed(Some(sessions)) => {
                self.view.set_sessions(sessions);
                self.emit_view();
            }
            Completion::Created(Some(conversation)) => {
                conversation.apply(&mut self.view);
                self.follow_up_timer.disarm();
                self.emit_view();
            }
            Completion::Switched(Some(opened)) => {
                opened.apply(&mut self.view);
                self.follow_up_timer.disarm();
                self.emit_view();
            }
            // Logged by the session client; the view stays as it was
            Completion::Listed(None) | Completion::Created(None) | Completion::Switched(None) => {}
            Completion::Deleted(Ok(removal)) => {
                if matches!(removal, Removal::Recreated(_)) {
                    self.follow_up_timer.disarm();
                }
                removal.apply(&mut self.view);
                self.emit_view();
            }
            Completion::Deleted(Err(_)) => {
                let _ = self.tx.send(UiEvent::Alert(DELETE_FAILED_ALERT.to_string()));
            }
        }
        self.start_next_request();
    }

    fn arm_focus(&mut self) {
        self.focus_timer
            .arm(self.timing.focus_delay, &self.timer_tx, |generation| {
                TimerEvent::FocusComposer { generation }
            });
    }

    fn copy_message(&mut self, index: usize) {
        let Some(message) = self.view.message(index) else {
            return;
        };

        let toast = match self.clipboard.copy(&message.content) {
            Ok(()) => COPY_TOAST,
            Err(e) => {
                warn!("Failed to copy message: {}", e);
                COPY_FAILED_TOAST
            }
        };
        self.toast_generation = self.view.show_toast(toast);
        self.emit_view();
        self.arm_toast_phase();
    }

    /// Arm the timer that ends the current toast phase
    fn arm_toast_phase(&mut self) {
        let delay = match self.view.toast().map(|t| t.phase) {
            Some(ToastPhase::FadingIn) => self.timing.toast_fade_in,
            Some(ToastPhase::Visible) => self.timing.toast_hold,
            Some(ToastPhase::FadingOut) => self.timing.toast_fade_out,
            None => {
                self.toast_timer.disarm();
                return;
            }
        };
        self.toast_timer.arm(delay, &self.timer_tx, |generation| {
            TimerEvent::AdvanceToast { generation }
        });
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::ApplyFilter { generation, query } => {
                if !self.filter_timer.is_current(generation) {
                    return;
                }
                self.filter_timer.complete(generation);
                self.view.set_filter(query);
                self.emit_view();
            }
            TimerEvent::ShowFollowUps { generation } => {
                if !self.follow_up_timer.is_current(generation) {
                    return;
                }
                self.follow_up_timer.complete(generation);
                self.view.set_follow_ups(pick_follow_ups(&mut self.rng));
                self.emit_view();
            }
            TimerEvent::FocusComposer { generation } => {
                if !self.focus_timer.is_current(generation) {
                    return;
                }
                self.focus_timer.complete(generation);
                let _ = self.tx.send(UiEvent::FocusComposer);
            }
            TimerEvent::AdvanceToast { generation } => {
                if !self.toast_timer.is_current(generation) {
                    return;
                }
                self.toast_timer.complete(generation);
                if self.view.advance_toast(self.toast_generation) {
                    self.emit_view();
                    self.arm_toast_phase();
                }
            }
        }
    }

    fn emit_view(&self) {
        let _ = self.tx.send(UiEvent::View(Box::new(self.view.clone())));
    }

    #[cfg(test)]
    async fn next_timer(&mut self) -> Option<TimerEvent> {
        self.timer_rx.as_mut()?.recv().await
    }

    /// Apply request results until nothing is in flight
    #[cfg(test)]
    async fn settle(&mut self) {
        while self.in_flight.is_some() {
            let Some(done) = self.done_rx.as_mut() else {
                return;
            };
            let Some(completion) = done.recv().await else {
                return;
            };
            self.finish_request(completion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_api::ApiError;
    use crate::ports::confirmation::AutoConfirm;
    use crate::use_cases::testing::{MockApi, MockClipboard, session, sid};
    use docchat_domain::text::WELCOME_MESSAGE;
    use docchat_domain::{FOLLOW_UP_COUNT, FOLLOW_UP_POOL, Message};
    use std::time::Duration;

    struct Harness {
        controller: ChatController,
        rx: mpsc::UnboundedReceiver<UiEvent>,
        api: Arc<MockApi>,
        clipboard: Arc<MockClipboard>,
    }

    fn harness_with(api: MockApi, clipboard: MockClipboard, confirm: bool) -> Harness {
        let (tx, rx) = mpsc::unbounded_channel();
        let api = Arc::new(api);
        let clipboard = Arc::new(clipboard);
        let controller = ChatController::new(
            api.clone(),
            clipboard.clone(),
            Arc::new(AutoConfirm(confirm)),
            UiTiming::default(),
            tx,
        )
        .with_renderer(MessageRenderer::with_fixed_time("08:15"))
        .with_seed(7);
        Harness {
            controller,
            rx,
            api,
            clipboard,
        }
    }

    impl Harness {
        /// Handle `command` and apply every server round trip it starts
        async fn send(&mut self, command: ChatCommand) {
            self.controller.handle_command(command);
            self.controller.settle().await;
        }
    }

    fn harness(api: MockApi) -> Harness {
        harness_with(api, MockClipboard::default(), true)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn contents(view: &ChatViewModel) -> Vec<&str> {
        view.messages().iter().map(|m| m.content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_init_lists_then_loads_history() {
        let mut h = harness(
            MockApi::new()
                .sessions(Ok(vec![session("s1", "First")]))
                .history(Ok(vec![Message::user("hi"), Message::assistant("hello")])),
        );

        h.send(ChatCommand::Init).await;

        assert_eq!(h.api.calls(), vec!["sessions", "history"]);
        assert_eq!(contents(h.controller.view()), vec!["hi", "hello"]);
        assert!(matches!(drain(&mut h.rx).as_slice(), [UiEvent::View(_)]));
    }

    #[tokio::test]
    async fn test_blank_submit_is_noop() {
        let mut h = harness(MockApi::new());

        h.send(ChatCommand::Submit("   \n".into())).await;

        assert!(h.api.calls().is_empty());
        assert!(h.controller.view().messages().is_empty());
        assert!(drain(&mut h.rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_success_adds_two_bubbles() {
        let mut h = harness(MockApi::new().reply(Ok("The answer")));

        h.send(ChatCommand::Submit("  What is it?  ".into())).await;

        let view = h.controller.view();
        assert_eq!(contents(view), vec!["What is it?", "The answer"]);
        assert_eq!(view.messages()[0].role, Role::User);
        assert_eq!(view.messages()[1].role, Role::Assistant);
        assert!(!view.is_pending());
        assert_eq!(h.api.calls(), vec!["chat:What is it?", "sessions"]);

        // First snapshot carries the optimistic bubble and the placeholder
        let events = drain(&mut h.rx);
        match &events[0] {
            UiEvent::View(first) => {
                assert_eq!(first.messages().len(), 1);
                assert!(first.is_pending());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_failure_shows_apology() {
        let mut h = harness(MockApi::new().reply(Err(ApiError::Status { status: 500 })));

        h.send(ChatCommand::Submit("hello".into())).await;

        let view = h.controller.view();
        assert_eq!(contents(view), vec!["hello", APOLOGY_MESSAGE]);
        assert!(!view.is_pending());
        // No session refresh after a failed send
        assert_eq!(h.api.calls(), vec!["chat:hello"]);

        // Focus still returns to the composer
        let event = h.controller.next_timer().await.unwrap();
        assert!(matches!(event, TimerEvent::FocusComposer { .. }));
        h.controller.handle_timer(event);
        assert!(matches!(drain(&mut h.rx).last(), Some(UiEvent::FocusComposer)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_ups_appear_after_delay() {
        let mut h = harness(MockApi::new());
        h.send(ChatCommand::Submit("q".into())).await;

        let start = tokio::time::Instant::now();
        let mut follow_ups_seen = false;
        for _ in 0..2 {
            let event = h.controller.next_timer().await.unwrap();
            if matches!(event, TimerEvent::ShowFollowUps { .. }) {
                assert!(start.elapsed() >= Duration::from_millis(1000));
                follow_ups_seen = true;
            }
            h.controller.handle_timer(event);
        }
        assert!(follow_ups_seen);

        let chips = h.controller.view().follow_ups();
        assert_eq!(chips.len(), FOLLOW_UP_COUNT);
        assert!(chips.iter().all(|c| FOLLOW_UP_POOL.contains(&c.as_str())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_submit_hides_follow_ups() {
        let mut h = harness(MockApi::new());
        h.controller.view.set_follow_ups(vec!["Can you give me an example?".into()]);

        h.send(ChatCommand::ChooseFollowUp(0)).await;

        assert!(h.controller.view().follow_ups().is_empty());
        assert_eq!(h.api.calls()[0], "chat:Can you give me an example?");
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_before_delay_cancels_pending_follow_ups() {
        let mut h = harness(MockApi::new());
        h.send(ChatCommand::Submit("one".into())).await;
        let stale = h.controller.follow_up_timer.generation();
        h.send(ChatCommand::Submit("two".into())).await;

        h.controller
            .handle_timer(TimerEvent::ShowFollowUps { generation: stale });
        assert!(h.controller.view().follow_ups().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_is_debounced() {
        let mut h = harness(MockApi::new());
        h.controller.view.set_sessions(vec![
            session("a", "Budget review"),
            session("b", "Travel plans"),
        ]);

        h.send(ChatCommand::FilterChanged("bu".into())).await;
        h.send(ChatCommand::FilterChanged("budg".into())).await;
        assert_eq!(h.controller.view().filter(), "");

        let start = tokio::time::Instant::now();
        let event = h.controller.next_timer().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(
            event,
            TimerEvent::ApplyFilter {
                generation: 2,
                query: "budg".into()
            }
        );
        h.controller.handle_timer(event);

        let view = h.controller.view();
        assert_eq!(view.filter(), "budg");
        assert_eq!(view.visible_sessions().len(), 1);

        // The superseded keystroke never fires
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(h.controller.timer_rx.as_mut().unwrap().try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_no_results_placeholder() {
        let mut h = harness(MockApi::new());
        h.controller.view.set_sessions(vec![session("a", "Budget")]);

        h.send(ChatCommand::FilterChanged("zzz".into())).await;
        let event = h.controller.next_timer().await.unwrap();
        h.controller.handle_timer(event);
        assert_eq!(
            h.controller.view().no_results_placeholder(),
            Some("No conversations found")
        );

        h.send(ChatCommand::FilterChanged(String::new())).await;
        let event = h.controller.next_timer().await.unwrap();
        h.controller.handle_timer(event);
        assert_eq!(h.controller.view().no_results_placeholder(), None);
    }

    #[tokio::test]
    async fn test_toggle_sidebar_twice() {
        let mut h = harness(MockApi::new());
        let original = h.controller.view().sidebar_open();
        h.send(ChatCommand::ToggleSidebar).await;
        h.send(ChatCommand::ToggleSidebar).await;
        assert_eq!(h.controller.view().sidebar_open(), original);
        assert_eq!(drain(&mut h.rx).len(), 2);
    }

    #[tokio::test]
    async fn test_close_sidebar_only_emits_when_open() {
        let mut h = harness(MockApi::new());
        h.send(ChatCommand::CloseSidebar).await;
        assert!(drain(&mut h.rx).is_empty());

        h.send(ChatCommand::ToggleSidebar).await;
        h.send(ChatCommand::CloseSidebar).await;
        assert!(!h.controller.view().sidebar_open());
        assert_eq!(drain(&mut h.rx).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_shows_toast_through_all_phases() {
        let mut h = harness(MockApi::new());
        h.controller
            .view
            .push_message(MessageRenderer::with_fixed_time("x").render(Role::User, "copy me"));

        h.send(ChatCommand::CopyMessage(Some(0))).await;
        assert_eq!(*h.clipboard.copied.lock().unwrap(), vec!["copy me".to_string()]);
        let toast = h.controller.view().toast().cloned().unwrap();
        assert_eq!(toast.message, COPY_TOAST);
        assert_eq!(toast.phase, ToastPhase::FadingIn);

        let start = tokio::time::Instant::now();
        for expected in [Some(ToastPhase::Visible), Some(ToastPhase::FadingOut), None] {
            let event = h.controller.next_timer().await.unwrap();
            h.controller.handle_timer(event);
            assert_eq!(h.controller.view().toast().map(|t| t.phase), expected);
        }
        assert!(start.elapsed() >= Duration::from_millis(100 + 3000 + 300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_replaces_toast() {
        let mut h = harness(MockApi::new());
        let renderer = MessageRenderer::with_fixed_time("x");
        h.controller.view.push_message(renderer.render(Role::User, "one"));
        h.controller.view.push_message(renderer.render(Role::Assistant, "two"));

        h.send(ChatCommand::CopyMessage(Some(0))).await;
        let event = h.controller.next_timer().await.unwrap();
        h.controller.handle_timer(event);
        assert_eq!(h.controller.view().toast().map(|t| t.phase), Some(ToastPhase::Visible));

        h.send(ChatCommand::CopyMessage(Some(1))).await;
        let toast = h.controller.view().toast().unwrap();
        assert_eq!(toast.phase, ToastPhase::FadingIn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_failure_toast() {
        let mut h = harness_with(
            MockApi::new(),
            MockClipboard {
                fail: true,
                ..Default::default()
            },
            true,
        );
        h.controller
            .view
            .push_message(MessageRenderer::with_fixed_time("x").render(Role::Assistant, "a"));

        h.send(ChatCommand::CopyMessage(Some(0))).await;
        assert_eq!(
            h.controller.view().toast().map(|t| t.message.as_str()),
            Some(COPY_FAILED_TOAST)
        );
    }

    #[tokio::test]
    async fn test_edit_only_for_user_messages() {
        let mut h = harness(MockApi::new());
        let renderer = MessageRenderer::with_fixed_time("x");
        h.controller.view.push_message(renderer.render(Role::User, "draft"));
        h.controller.view.push_message(renderer.render(Role::Assistant, "reply"));

        h.send(ChatCommand::EditMessage(Some(1))).await;
        assert!(drain(&mut h.rx).is_empty());

        h.send(ChatCommand::EditMessage(Some(0))).await;
        assert!(matches!(
            drain(&mut h.rx).as_slice(),
            [UiEvent::FillComposer(text)] if text == "draft"
        ));
        // Original message stays
        assert_eq!(h.controller.view().messages().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_expanded_long_reply() {
        let mut h = harness(MockApi::new());
        let renderer = MessageRenderer::with_fixed_time("x");
        h.controller
            .view
            .push_message(renderer.render(Role::Assistant, "y".repeat(501)));

        assert!(h.controller.view().messages()[0].is_collapsed());
        h.send(ChatCommand::ToggleExpanded(Some(0))).await;
        assert!(!h.controller.view().messages()[0].is_collapsed());
        h.send(ChatCommand::ToggleExpanded(Some(0))).await;
        assert!(h.controller.view().messages()[0].is_collapsed());
    }

    #[tokio::test]
    async fn test_delete_active_session_triggers_create() {
        let mut h = harness(MockApi::new().new_session_result(Ok(Some(sid("s9")))));
        h.controller.view.set_sessions(vec![session("s1", "Only")]);
        h.controller.view.set_active(sid("s1"));

        h.send(ChatCommand::DeleteSession(sid("s1"))).await;

        assert_eq!(h.api.calls(), vec!["delete:s1", "new_session", "sessions"]);
        assert_eq!(contents(h.controller.view()), vec![WELCOME_MESSAGE]);
        assert_eq!(h.controller.view().active_session_id(), Some(&sid("s9")));
    }

    #[tokio::test]
    async fn test_delete_failure_raises_alert() {
        let mut h = harness(MockApi::new().delete_result(Err(ApiError::Network("down".into()))));

        h.send(ChatCommand::DeleteSession(sid("s1"))).await;

        assert!(matches!(
            drain(&mut h.rx).as_slice(),
            [UiEvent::Alert(text)] if text == DELETE_FAILED_ALERT
        ));
    }

    #[tokio::test]
    async fn test_delete_declined_makes_no_request() {
        let mut h = harness_with(MockApi::new(), MockClipboard::default(), false);
        h.send(ChatCommand::DeleteSession(sid("s1"))).await;
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_switch_session_failure_emits_nothing() {
        let mut h = harness(MockApi::new().switch_result(Err(ApiError::Status { status: 500 })));
        h.send(ChatCommand::SwitchSession(sid("s2"))).await;
        assert!(drain(&mut h.rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_exits_on_quit() {
        let h = harness(MockApi::new().sessions(Ok(vec![session("s1", "First")])));
        let mut rx = h.rx;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(h.controller.run(cmd_rx));

        cmd_tx.send(ChatCommand::Init).unwrap();
        match rx.recv().await {
            Some(UiEvent::View(view)) => {
                assert_eq!(view.sessions().len(), 1);
                assert_eq!(contents(&view), vec![WELCOME_MESSAGE]);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        cmd_tx.send(ChatCommand::Quit).unwrap();
        handle.await.unwrap();
        assert!(matches!(drain(&mut rx).as_slice(), [UiEvent::Exit]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ui_stays_live_while_reply_pending() {
        let mut h = harness(MockApi::new().slow_replies(Duration::from_secs(10)));
        h.controller
            .view
            .push_message(MessageRenderer::with_fixed_time("x").render(Role::Assistant, "earlier"));
        let sidebar_before = h.controller.view().sidebar_open();
        let mut rx = h.rx;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(h.controller.run(cmd_rx));

        cmd_tx.send(ChatCommand::Submit("hi".into())).unwrap();
        cmd_tx.send(ChatCommand::ToggleSidebar).unwrap();
        cmd_tx.send(ChatCommand::CopyMessage(Some(0))).unwrap();

        // Optimistic bubble, sidebar, toast fading in, toast visible
        let start = tokio::time::Instant::now();
        let mut views = Vec::new();
        while views.len() < 4 {
            if let Some(UiEvent::View(view)) = rx.recv().await {
                views.push(view);
            }
        }
        assert!(start.elapsed() < Duration::from_secs(1));
        assert!(views[0].is_pending());
        assert_eq!(views[1].sidebar_open(), !sidebar_before);
        assert!(views[1].is_pending());
        assert_eq!(views[2].toast().map(|t| t.phase), Some(ToastPhase::FadingIn));
        assert_eq!(views[3].toast().map(|t| t.phase), Some(ToastPhase::Visible));
        assert!(views[3].is_pending());
        assert_eq!(*h.clipboard.copied.lock().unwrap(), vec!["earlier".to_string()]);

        cmd_tx.send(ChatCommand::Quit).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_run_in_order() {
        let mut h = harness(MockApi::new().history(Ok(vec![Message::assistant("from s2")])));

        h.controller.handle_command(ChatCommand::SwitchSession(sid("s2")));
        h.controller.handle_command(ChatCommand::Submit("hi".into()));
        h.controller.handle_command(ChatCommand::SwitchSession(sid("s3")));
        h.controller.settle().await;

        assert_eq!(
            h.api.calls(),
            vec!["switch:s2", "history", "chat:hi", "sessions", "switch:s3", "history"]
        );
        assert_eq!(h.controller.view().active_session_id(), Some(&sid("s3")));
        assert_eq!(contents(h.controller.view()), vec![WELCOME_MESSAGE]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_send_lands_in_switched_conversation() {
        let mut h = harness(MockApi::new().history(Ok(vec![Message::assistant("from s2")])));

        h.controller.handle_command(ChatCommand::SwitchSession(sid("s2")));
        h.controller.handle_command(ChatCommand::Submit("hi".into()));
        h.controller.settle().await;

        assert_eq!(contents(h.controller.view()), vec!["from s2", "hi", "echo: hi"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_active_session_cancels_pending_follow_ups() {
        let mut h = harness(
            MockApi::new()
                .sessions(Ok(vec![session("s1", "Only")]))
                .new_session_result(Ok(Some(sid("s9")))),
        );
        h.controller.view.set_sessions(vec![session("s1", "Only")]);
        h.controller.view.set_active(sid("s1"));

        h.send(ChatCommand::Submit("q".into())).await;
        h.send(ChatCommand::DeleteSession(sid("s1"))).await;

        tokio::time::sleep(Duration::from_secs(2)).await;
        while let Ok(event) = h.controller.timer_rx.as_mut().unwrap().try_recv() {
            h.controller.handle_timer(event);
        }
        assert_eq!(contents(h.controller.view()), vec![WELCOME_MESSAGE]);
        assert!(h.controller.view().follow_ups().is_empty());
    }

    #[tokio::test]
    async fn test_newest_message_targeted_when_none_selected() {
        let mut h = harness(MockApi::new());
        let renderer = MessageRenderer::with_fixed_time("x");
        h.controller.view.push_message(renderer.render(Role::User, "first"));
        h.controller.view.push_message(renderer.render(Role::User, "second"));

        h.send(ChatCommand::EditMessage(None)).await;
        assert!(matches!(
            drain(&mut h.rx).as_slice(),
            [UiEvent::FillComposer(text)] if text == "second"
        ));
    }

    #[tokio::test]
    async fn test_message_commands_on_empty_conversation_are_ignored() {
        let mut h = harness(MockApi::new());
        h.send(ChatCommand::CopyMessage(None)).await;
        h.send(ChatCommand::ToggleExpanded(None)).await;
        assert!(h.clipboard.copied.lock().unwrap().is_empty());
        assert!(drain(&mut h.rx).is_empty());
    }

    #[tokio::test]
    async fn test_run_exits_when_senders_dropped() {
        let h = harness(MockApi::new());
        let mut rx = h.rx;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ChatCommand>();
        drop(cmd_tx);

        h.controller.run(cmd_rx).await;
        assert!(matches!(drain(&mut rx).as_slice(), [UiEvent::Exit]));
    }
}
