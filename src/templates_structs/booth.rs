use askama::Template;

use super::PageContext;
use crate::models::booth::{Booth, BoothStatus};

#[derive(Template)]
#[template(path = "booths/list.html")]
pub struct BoothListTemplate {
    pub ctx: PageContext,
    pub booths: Vec<Booth>,
}

#[derive(Template)]
#[template(path = "booths/form.html")]
pub struct BoothFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub booth: Option<Booth>,
    /// Accounts without a booth, offered in the create form's selector.
    pub accounts: Vec<(i64, String)>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "console.html")]
pub struct ConsoleTemplate {
    pub ctx: PageContext,
    pub booth: Option<Booth>,
    pub statuses: Vec<BoothStatus>,
    pub errors: Vec<String>,
}
