use super::*;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SurfaceCall {
    ShowView,
    ShowEdit,
    HideEditTrigger,
    Notify(SaveFailureKind),
}

#[derive(Clone, Default)]
struct RecordingSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().expect("surface calls").clone()
    }

    fn push(&self, call: SurfaceCall) {
        self.calls.lock().expect("surface calls").push(call);
    }
}

impl EditSurface for RecordingSurface {
    fn show_view(&mut self) {
        self.push(SurfaceCall::ShowView);
    }

    fn show_edit(&mut self) {
        self.push(SurfaceCall::ShowEdit);
    }

    fn hide_edit_trigger(&mut self) {
        self.push(SurfaceCall::HideEditTrigger);
    }

    fn notify(&mut self, notice: SaveFailureKind) {
        self.push(SurfaceCall::Notify(notice));
    }
}

#[derive(Clone, Default)]
struct RecordingNavigator {
    targets: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    fn targets(&self) -> Vec<String> {
        self.targets.lock().expect("navigator targets").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, target: &str) {
        self.targets
            .lock()
            .expect("navigator targets")
            .push(target.to_owned());
    }
}

#[derive(Default)]
struct ProbeWidgetState {
    text: String,
    focus_count: u32,
    profile: Option<EditorProfile>,
}

#[derive(Clone, Default)]
struct ProbeWidget {
    state: Arc<Mutex<ProbeWidgetState>>,
}

impl ProbeWidget {
    fn focus_count(&self) -> u32 {
        self.state.lock().expect("widget state").focus_count
    }

    fn profile(&self) -> Option<EditorProfile> {
        self.state.lock().expect("widget state").profile.clone()
    }

    fn type_text(&self, text: &str) {
        self.state.lock().expect("widget state").text = text.to_owned();
    }
}

impl EditorWidget for ProbeWidget {
    fn configure(&mut self, profile: &EditorProfile) {
        self.state.lock().expect("widget state").profile = Some(profile.clone());
    }

    fn set_text(&mut self, text: &str) {
        self.state.lock().expect("widget state").text = text.to_owned();
    }

    fn text(&self) -> String {
        self.state.lock().expect("widget state").text.clone()
    }

    fn focus(&mut self) {
        self.state.lock().expect("widget state").focus_count += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordedSave {
    Create { text: String },
    Replace { path: PagePath, text: String },
}

struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<SaveReceipt, SaveError>>>,
    saves: Arc<Mutex<Vec<RecordedSave>>>,
}

impl ScriptedTransport {
    fn replying(replies: Vec<Result<SaveReceipt, SaveError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            saves: Arc::new(Mutex::new(Vec::new())),
        })
    }

    fn saves(&self) -> Vec<RecordedSave> {
        self.saves.lock().expect("recorded saves").clone()
    }

    fn next_reply(&self) -> Result<SaveReceipt, SaveError> {
        self.replies
            .lock()
            .expect("scripted replies")
            .pop_front()
            .expect("transport called more times than scripted")
    }
}

#[async_trait]
impl SaveTransport for ScriptedTransport {
    async fn create(&self, text: &str) -> Result<SaveReceipt, SaveError> {
        self.saves
            .lock()
            .expect("recorded saves")
            .push(RecordedSave::Create {
                text: text.to_owned(),
            });
        self.next_reply()
    }

    async fn replace(&self, path: &PagePath, text: &str) -> Result<SaveReceipt, SaveError> {
        self.saves
            .lock()
            .expect("recorded saves")
            .push(RecordedSave::Replace {
                path: path.clone(),
                text: text.to_owned(),
            });
        self.next_reply()
    }
}

struct Harness {
    widget: ProbeWidget,
    surface: RecordingSurface,
    navigator: RecordingNavigator,
    transport: Arc<ScriptedTransport>,
}

impl Harness {
    fn new(replies: Vec<Result<SaveReceipt, SaveError>>) -> Self {
        Self {
            widget: ProbeWidget::default(),
            surface: RecordingSurface::default(),
            navigator: RecordingNavigator::default(),
            transport: ScriptedTransport::replying(replies),
        }
    }

    fn new_page(&self) -> EditSession {
        EditSession::new_page(
            Box::new(self.widget.clone()),
            Box::new(self.surface.clone()),
            Box::new(self.navigator.clone()),
            self.transport.clone(),
        )
    }

    fn view_page(&self, path: &str) -> EditSession {
        EditSession::view_page(
            PagePath::new(path),
            Box::new(self.widget.clone()),
            Box::new(self.surface.clone()),
            Box::new(self.navigator.clone()),
            self.transport.clone(),
        )
    }

    fn edit_page(&self, path: &str) -> EditSession {
        EditSession::edit_page(
            PagePath::new(path),
            Box::new(self.widget.clone()),
            Box::new(self.surface.clone()),
            Box::new(self.navigator.clone()),
            self.transport.clone(),
        )
    }
}

fn saved_in_place() -> Result<SaveReceipt, SaveError> {
    Ok(SaveReceipt::default())
}

fn redirected_to(target: &str) -> Result<SaveReceipt, SaveError> {
    Ok(SaveReceipt {
        redirect: Some(target.to_owned()),
    })
}

#[test]
fn new_page_starts_editing_with_focused_configured_widget() {
    let harness = Harness::new(Vec::new());
    let session = harness.new_page();

    assert_eq!(session.mode(), EditMode::Editing);
    assert_eq!(harness.widget.focus_count(), 1);
    assert_eq!(
        harness.widget.profile(),
        Some(EditorProfile {
            theme: "textmate",
            syntax: "markdown",
            keybindings: "vim",
        })
    );
    assert_eq!(harness.surface.calls(), vec![SurfaceCall::ShowEdit]);
}

#[test]
fn view_page_starts_viewing_without_focus() {
    let harness = Harness::new(Vec::new());
    let session = harness.view_page("/cooking/pancakes");

    assert_eq!(session.mode(), EditMode::Viewing);
    assert_eq!(harness.widget.focus_count(), 0);
    assert_eq!(harness.surface.calls(), vec![SurfaceCall::ShowView]);
}

#[test]
fn edit_page_starts_editing_with_focus() {
    let harness = Harness::new(Vec::new());
    let session = harness.edit_page("/cooking/pancakes");

    assert_eq!(session.mode(), EditMode::Editing);
    assert_eq!(harness.widget.focus_count(), 1);
}

#[test]
fn begin_editing_is_idempotent() {
    let harness = Harness::new(Vec::new());
    let mut session = harness.view_page("/cooking/pancakes");

    session.begin_editing();
    session.begin_editing();
    session.begin_editing();

    assert_eq!(session.mode(), EditMode::Editing);
    let calls = harness.surface.calls();
    assert!(!calls[1..].contains(&SurfaceCall::ShowView));
    assert_eq!(calls.last(), Some(&SurfaceCall::HideEditTrigger));
}

#[tokio::test]
async fn save_sends_exact_buffer_snapshot_for_new_page() {
    let harness = Harness::new(vec![redirected_to("/abc123")]);
    let mut session = harness.new_page();
    harness.widget.type_text("Hello");

    session.save().await.expect("save");

    assert_eq!(
        harness.transport.saves(),
        vec![RecordedSave::Create {
            text: "Hello".to_owned()
        }]
    );
}

#[tokio::test]
async fn redirect_navigates_without_local_transition() {
    let harness = Harness::new(vec![redirected_to("/abc123")]);
    let mut session = harness.new_page();
    let calls_before = harness.surface.calls();

    let outcome = session.save().await.expect("save");

    assert_eq!(outcome, SaveOutcome::Redirected);
    assert_eq!(harness.navigator.targets(), vec!["/abc123".to_owned()]);
    assert_eq!(session.mode(), EditMode::Editing);
    assert_eq!(harness.surface.calls(), calls_before);
}

#[tokio::test]
async fn in_place_save_returns_to_viewing() {
    let harness = Harness::new(vec![saved_in_place()]);
    let mut session = harness.view_page("/cooking/pancakes");
    session.begin_editing();
    harness.widget.type_text("Updated");
    let focus_before = harness.widget.focus_count();

    let outcome = session.save().await.expect("save");

    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(session.mode(), EditMode::Viewing);
    assert_eq!(
        harness.transport.saves(),
        vec![RecordedSave::Replace {
            path: PagePath::new("/cooking/pancakes"),
            text: "Updated".to_owned()
        }]
    );
    assert_eq!(harness.surface.calls().last(), Some(&SurfaceCall::ShowView));
    assert_eq!(harness.widget.focus_count(), focus_before + 1);
    assert_eq!(session.document_text(), "Updated");
}

#[tokio::test]
async fn conflict_notifies_and_stays_editing() {
    let harness = Harness::new(vec![Err(SaveError::Conflict)]);
    let mut session = harness.edit_page("/cooking/pancakes");
    let focus_before = harness.widget.focus_count();

    let err = session.save().await.expect_err("must fail");

    assert_eq!(err.kind(), SaveFailureKind::Conflict);
    assert_eq!(session.mode(), EditMode::Editing);
    assert_eq!(
        harness.surface.calls().last(),
        Some(&SurfaceCall::Notify(SaveFailureKind::Conflict))
    );
    assert_eq!(harness.widget.focus_count(), focus_before + 1);
}

#[tokio::test]
async fn not_found_notifies_and_stays_editing() {
    let harness = Harness::new(vec![Err(SaveError::NotFound)]);
    let mut session = harness.edit_page("/cooking/pancakes");

    let err = session.save().await.expect_err("must fail");

    assert_eq!(err.kind(), SaveFailureKind::NotFound);
    assert_eq!(session.mode(), EditMode::Editing);
    assert_eq!(
        harness.surface.calls().last(),
        Some(&SurfaceCall::Notify(SaveFailureKind::NotFound))
    );
}

#[tokio::test]
async fn unexpected_status_notice_carries_raw_code() {
    let harness = Harness::new(vec![Err(SaveError::Unexpected { status: 500 })]);
    let mut session = harness.edit_page("/cooking/pancakes");

    let err = session.save().await.expect_err("must fail");

    let notice = err.kind();
    assert_eq!(notice, SaveFailureKind::Unknown { status: 500 });
    assert!(notice.to_string().contains("500"));
    assert_eq!(session.mode(), EditMode::Editing);
}

#[tokio::test]
async fn retry_after_failure_dispatches_again() {
    let harness = Harness::new(vec![Err(SaveError::Conflict), saved_in_place()]);
    let mut session = harness.edit_page("/cooking/pancakes");

    session.save().await.expect_err("first save fails");
    let outcome = session.save().await.expect("retry succeeds");

    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(harness.transport.saves().len(), 2);
    assert_eq!(session.mode(), EditMode::Viewing);
}
