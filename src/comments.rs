/// What a comments view wants from the card after a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentsSignal {
    Idle,
    /// The view's close control was used; the card should hide it.
    Close,
}

/// External collaborator that owns comment display and persistence.
///
/// `sync` hands over `(item id, open)`. A view renders nothing while `open`
/// is false. Returning [`CommentsSignal::Close`] is the view's close callback.
pub trait CommentsView {
    fn sync(&mut self, item_id: &str, open: bool) -> CommentsSignal;
}

/// Visibility flag for one card's comments view. The card owns nothing else.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommentsPanel {
    open: bool,
}

impl CommentsPanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns false when the panel was already open.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    /// Returns false when there was nothing to close.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Passes the current visibility to `view` and applies its close request.
    pub fn sync(&mut self, item_id: &str, view: &mut dyn CommentsView) -> bool {
        match view.sync(item_id, self.open) {
            CommentsSignal::Close if self.open => {
                self.open = false;
                true
            }
            _ => false,
        }
    }
}
