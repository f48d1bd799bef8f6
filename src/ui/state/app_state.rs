use dioxus::prelude::{use_signal, Signal};

use crate::usecase::services::session::Session;
use crate::usecase::services::view_model::SessionView;

pub struct AppState {
    pub session: Signal<Option<Session>>,
    pub view: Signal<Option<SessionView>>,
    pub dataset_label: Signal<String>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: use_signal(|| None::<Session>),
            view: use_signal(|| None::<SessionView>),
            dataset_label: use_signal(String::new),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
        }
    }
}
