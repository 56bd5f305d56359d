use askama::Template;

use super::PageContext;
use crate::models::notice::Notice;

#[derive(Template)]
#[template(path = "notices/list.html")]
pub struct NoticeListTemplate {
    pub ctx: PageContext,
    pub notices: Vec<Notice>,
}

#[derive(Template)]
#[template(path = "notices/form.html")]
pub struct NoticeFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub notice: Option<Notice>,
    pub errors: Vec<String>,
}
