// DOM wiring for the lakeside page. The scene renderer (JS) reads the data-*
// attributes written on these elements.

pub const CANVAS_ID: &str = "app-canvas";
pub const MARKER_ID: &str = "fishing-marker";
pub const LINE_ID: &str = "fishing-line";
pub const BITE_INDICATOR_ID: &str = "bite-indicator";
pub const LEDGER_ID: &str = "collection-ledger";
pub const LEDGER_COUNT_PREFIX: &str = "ledger-"; // + CatchKind::id()
pub const CONTACT_MODAL_ID: &str = "contact-modal";
pub const CONTACT_MODAL_CLOSE_ID: &str = "contact-modal-close";

// How long a ledger entry keeps its celebrate flag
pub const CELEBRATE_MS: i32 = 1_200;
