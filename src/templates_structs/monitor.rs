use askama::Template;

#[derive(Template)]
#[template(path = "monitor.html")]
pub struct MonitorTemplate {
    pub festival_name: String,
}
