use askama::Template;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub festival_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub csrf_token: String,
}
