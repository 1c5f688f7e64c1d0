pub mod format;
pub mod header;
pub mod help;
pub mod list;
pub mod status_bar;

pub use header::{render_header, HeaderState};
pub use help::render_help_panel;
pub use list::{render_file_list, FileListState};
pub use status_bar::{render_status_bar, StatusBarState};
