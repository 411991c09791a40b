use std::cell::RefCell;
use std::rc::Rc;

use fluent_overlay::OverlayError;
use fluent_overlay::ui::host::{element, text};
use fluent_overlay::ui::{Binding, RsxComponent, RsxNode, render};
use futures::channel::oneshot;
use futures::lock::Mutex;

use crate::dialog::{ContentDialog, ContentDialogButton, ContentDialogProps};

/// Data of the dialog a [`ContentDialogHostState::show`] call is displaying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentDialogData {
    pub title: String,
    pub text: String,
    pub primary_button_text: Option<String>,
    pub secondary_button_text: Option<String>,
    pub close_button_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct DialogSlot {
    data: Option<ContentDialogData>,
    visible: bool,
    generation: u64,
}

/// Queue of content dialogs shown one at a time.
///
/// Each `show` call waits for every earlier call to be dismissed before its
/// own dialog appears. Dismissal hides the dialog but keeps its data until the
/// next `show` replaces it, so the exit animation still has something to draw.
#[derive(Clone)]
pub struct ContentDialogHostState {
    turn: Rc<Mutex<()>>,
    slot: Binding<DialogSlot>,
    pending: Rc<RefCell<Option<oneshot::Sender<ContentDialogButton>>>>,
}

impl Default for ContentDialogHostState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentDialogHostState {
    pub fn new() -> Self {
        Self {
            turn: Rc::new(Mutex::new(())),
            slot: Binding::new(DialogSlot::default()),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Data of the dialog currently held by the host, visible or exiting.
    pub fn current(&self) -> Option<ContentDialogData> {
        self.slot.get().data
    }

    pub fn is_visible(&self) -> bool {
        self.slot.get().visible
    }

    /// Shows a dialog and resolves with the button that closed it.
    ///
    /// Dropping the returned future before that discards the dialog.
    pub async fn show(
        &self,
        title: impl Into<String>,
        text: impl Into<String>,
        primary_button_text: Option<&str>,
        secondary_button_text: Option<&str>,
        close_button_text: Option<&str>,
    ) -> ContentDialogButton {
        let data = ContentDialogData {
            title: title.into(),
            text: text.into(),
            primary_button_text: primary_button_text.map(str::to_string),
            secondary_button_text: secondary_button_text.map(str::to_string),
            close_button_text: close_button_text.map(str::to_string),
        };

        let _turn = self.turn.lock().await;
        let (sender, receiver) = oneshot::channel();
        *self.pending.borrow_mut() = Some(sender);
        let mut generation = 0;
        self.slot.update(|slot| {
            slot.generation += 1;
            slot.data = Some(data);
            slot.visible = true;
            generation = slot.generation;
        });
        log::debug!("content dialog #{generation} shown");

        let mut guard = ShowGuard {
            host: self,
            generation,
            resolved: false,
        };
        // A dropped sender means the host was torn down; report it as a close.
        let button = receiver.await.unwrap_or(ContentDialogButton::Close);
        guard.resolved = true;
        log::debug!("content dialog #{generation} closed with {button:?}");
        button
    }

    /// Hides the current dialog and resumes its `show` call with `button`.
    pub fn dismiss(&self, button: ContentDialogButton) {
        let Some(sender) = self.pending.borrow_mut().take() else {
            return;
        };
        self.slot.update(|slot| slot.visible = false);
        let _ = sender.send(button);
    }

    fn discard(&self, generation: u64) {
        let _ = self.pending.borrow_mut().take();
        let current = self.slot.get();
        if current.generation != generation || current.data.is_none() {
            return;
        }
        log::debug!("content dialog #{generation} cancelled before dismissal");
        self.slot.update(|slot| {
            slot.data = None;
            slot.visible = false;
        });
    }
}

struct ShowGuard<'a> {
    host: &'a ContentDialogHostState,
    generation: u64,
    resolved: bool,
}

impl Drop for ShowGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.host.discard(self.generation);
        }
    }
}

thread_local! {
    static HOST_STACK: RefCell<Vec<ContentDialogHostState>> = const { RefCell::new(Vec::new()) };
}

/// Makes `state` the dialog host seen by [`use_dialog_host`] while `build`
/// runs. Scopes nest.
pub fn provide_dialog_host<R>(state: &ContentDialogHostState, build: impl FnOnce() -> R) -> R {
    struct PopGuard;
    impl Drop for PopGuard {
        fn drop(&mut self) {
            HOST_STACK.with(|stack| {
                let _ = stack.borrow_mut().pop();
            });
        }
    }

    HOST_STACK.with(|stack| stack.borrow_mut().push(state.clone()));
    let _guard = PopGuard;
    build()
}

pub fn try_use_dialog_host() -> Result<ContentDialogHostState, OverlayError> {
    HOST_STACK
        .with(|stack| stack.borrow().last().cloned())
        .ok_or(OverlayError::MissingDialogHost)
}

/// # Panics
///
/// Outside [`provide_dialog_host`].
pub fn use_dialog_host() -> ContentDialogHostState {
    match try_use_dialog_host() {
        Ok(state) => state,
        Err(err) => panic!("{err}"),
    }
}

pub type DialogHostContentBuilder = Box<dyn FnOnce() -> Vec<RsxNode>>;

/// Builds its content with `state` as the dialog host in scope, then renders
/// whatever dialog the state currently holds on top of it.
pub struct ContentDialogHost;

pub struct ContentDialogHostProps {
    pub state: ContentDialogHostState,
    pub content: DialogHostContentBuilder,
}

impl ContentDialogHostProps {
    pub fn new(state: ContentDialogHostState) -> Self {
        Self {
            state,
            content: Box::new(Vec::new),
        }
    }

    pub fn content(mut self, content: impl FnOnce() -> Vec<RsxNode> + 'static) -> Self {
        self.content = Box::new(content);
        self
    }
}

impl RsxComponent for ContentDialogHost {
    type Props = ContentDialogHostProps;

    fn render(props: ContentDialogHostProps) -> RsxNode {
        let ContentDialogHostProps { state, content } = props;
        let content = provide_dialog_host(&state, content);
        element()
            .with_children(content)
            .with_child(current_dialog(&state))
    }
}

fn current_dialog(state: &ContentDialogHostState) -> RsxNode {
    let slot = state.slot.get();
    let Some(data) = slot.data else {
        return RsxNode::empty();
    };

    let state = state.clone();
    let mut dialog = ContentDialogProps::new(data.title, slot.visible, move |button| {
        state.dismiss(button)
    })
    .content([text(data.text)]);
    dialog.primary_button_text = data.primary_button_text;
    dialog.secondary_button_text = data.secondary_button_text;
    dialog.close_button_text = data.close_button_text;
    render::<ContentDialog>(dialog)
}
