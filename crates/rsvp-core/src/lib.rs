pub mod editor;
pub mod layout;
pub mod nav;
pub mod pacing;
pub mod search;
pub mod stats;
pub mod text;
pub mod timer;

pub use editor::{EditorStatus, EditorView, Key, LineEditor};
pub use layout::{build_line, focus_point, FocusPoint, Line, ShowMode};
pub use nav::{DocumentError, WordNavigator};
pub use pacing::PacingClock;
pub use search::{SearchEngine, SearchError};
pub use text::{TextError, TextIndex};
pub use timer::ReadTimer;
