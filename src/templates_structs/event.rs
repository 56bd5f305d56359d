use askama::Template;

use super::PageContext;
use crate::models::event::Event;

#[derive(Template)]
#[template(path = "events/list.html")]
pub struct EventListTemplate {
    pub ctx: PageContext,
    pub events: Vec<Event>,
}

#[derive(Template)]
#[template(path = "events/form.html")]
pub struct EventFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub event: Option<Event>,
    pub errors: Vec<String>,
}
