use super::prelude::*;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) has_stamps: bool,
    pub(crate) stamps: Vec<Stamp>,
    pub(crate) suggestions: &'static [&'static str],
}

#[derive(Template, WebTemplate)]
#[template(path = "print.html")]
pub(crate) struct PrintTemplate {
    pub(crate) theme: String,
    pub(crate) image_url: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "view.html")]
pub(crate) struct ViewTemplate {
    pub(crate) theme: String,
    pub(crate) has_stamp: bool,
    pub(crate) image_url: String,
}
