// Template context structures for Askama templates, organized by page area.

mod poll;

pub use poll::*;

pub const APP_NAME: &str = "Polls";

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.page_title`.
pub struct PageContext {
    pub app_name: String,
    pub page_title: String,
}

impl PageContext {
    pub fn new(page_title: impl Into<String>) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            page_title: page_title.into(),
        }
    }
}
