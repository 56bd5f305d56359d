use askama::Template;

use super::PageContext;
use crate::models::account::AccountDisplay;

#[derive(Template)]
#[template(path = "accounts/list.html")]
pub struct AccountListTemplate {
    pub ctx: PageContext,
    pub accounts: Vec<AccountDisplay>,
    /// Role toggle and delete are hidden for the signed-in admin's own row.
    pub current_account_id: i64,
}

#[derive(Template)]
#[template(path = "accounts/form.html")]
pub struct AccountFormTemplate {
    pub ctx: PageContext,
    pub errors: Vec<String>,
}
