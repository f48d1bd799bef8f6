use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::infra::import::file_source::{FileSource, SUPPORTED_EXTENSIONS};
use crate::ui::state::app_state::AppState;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::session::Session;
use crate::usecase::services::view_model::{
    ActionCard, MaintenanceView, SelectView, SessionView,
};

const PANEL_STYLE: &str = "border: 1px solid #ddd; border-radius: 8px; padding: 12px; display: flex; flex-direction: column; gap: 10px;";
const BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";

fn stamped(message: impl std::fmt::Display) -> String {
    format!("[{}] {message}", Local::now().format("%H:%M:%S"))
}

/// Replaces the session with a freshly loaded dataset. A failed load keeps
/// whatever session was open before.
fn load_dataset(
    path: &Path,
    mut session: Signal<Option<Session>>,
    mut view: Signal<Option<SessionView>>,
    mut dataset_label: Signal<String>,
    mut status: Signal<String>,
) {
    let service = ImportService::new(Arc::new(FileSource::new(path)));
    match service.open_session() {
        Ok(loaded) => {
            let row_count = loaded.index().len();
            view.set(Some(loaded.view()));
            session.set(Some(loaded));
            dataset_label.set(path.display().to_string());
            status.set(stamped(format!("Loaded {row_count} rows")));
        }
        Err(err) => {
            error!(path = %path.display(), %err, "failed to load dataset");
            status.set(stamped(format!("Failed to load dataset: {err}")));
        }
    }
}

fn apply(
    mut session: Signal<Option<Session>>,
    mut view: Signal<Option<SessionView>>,
    transition: impl FnOnce(&mut Session) -> SessionView,
) {
    let next = match &mut *session.write() {
        Some(active) => Some(transition(active)),
        None => None,
    };
    if next.is_some() {
        view.set(next);
    }
}

fn confirm(
    mut session: Signal<Option<Session>>,
    mut view: Signal<Option<SessionView>>,
    mut status: Signal<String>,
    support: &str,
) {
    let result = match &mut *session.write() {
        Some(active) => Some(active.confirm_group(support)),
        None => None,
    };
    match result {
        Some(Ok(next)) => view.set(Some(next)),
        Some(Err(err)) => status.set(stamped(err)),
        None => {}
    }
}

#[component]
fn SelectField(label: &'static str, view: SelectView, on_change: EventHandler<String>) -> Element {
    let placeholder = view.placeholder;
    let nothing_selected = view.selected.is_none();

    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 240px;",
            span { "{label}" }
            select {
                style: "padding: 4px 6px; border-radius: 6px; border: 1px solid #bbb;",
                onchange: move |event| on_change.call(event.value()),
                option { value: "", selected: nothing_selected, "{placeholder}" }
                {view.options.iter().map(|opt| {
                    let value = opt.value.clone();
                    let text = opt.label.clone();
                    let is_selected = view.selected.as_deref() == Some(value.as_str());
                    rsx!(
                        option { key: "{value}", value: "{value}", selected: is_selected, "{text}" }
                    )
                })}
            }
        }
    }
}

#[component]
fn ActionList(cards: Vec<ActionCard>, on_confirm: EventHandler<String>) -> Element {
    rsx! {
        section {
            style: PANEL_STYLE,
            h3 { "Support actions" }
            if cards.is_empty() {
                p { "No support action is listed for this symptom." }
            }
            {cards.iter().map(|card| {
                let support = card.support.clone();
                let text = card.support.clone();
                let how_to = card.how_to.clone();
                rsx!(
                    div {
                        key: "{text}",
                        style: "display: flex; justify-content: space-between; align-items: center; gap: 12px; padding: 6px 0; border-bottom: 1px solid #eee;",
                        div { "{text}" }
                        div {
                            style: "display: flex; gap: 8px;",
                            button {
                                style: BUTTON_STYLE,
                                onclick: move |_| on_confirm.call(support.clone()),
                                "Issue confirmed"
                            }
                            {how_to.map(|link| rsx!(
                                a {
                                    style: BUTTON_STYLE,
                                    href: "{link}",
                                    target: "_blank",
                                    "How to"
                                }
                            ))}
                        }
                    }
                )
            })}
        }
    }
}

#[component]
fn MaintenancePanel(maintenance: MaintenanceView) -> Element {
    let MaintenanceView {
        sub_issue,
        symptom_label,
        steps,
        spare_part,
    } = maintenance;

    rsx! {
        section {
            style: PANEL_STYLE,
            h3 { "Maintenance" }
            div { strong { "Sub issue: " } "{sub_issue}" }
            div { strong { "Symptom to confirm on site: " } "{symptom_label}" }
            div {
                strong { "Actions to do:" }
                {steps.iter().enumerate().map(|(idx, step)| {
                    let step = step.clone();
                    rsx!(
                        label {
                            key: "{idx}",
                            style: "display: flex; gap: 8px; align-items: center; padding: 2px 0;",
                            input { r#type: "checkbox" }
                            span { "{step}" }
                        }
                    )
                })}
            }
            {spare_part.map(|spare| rsx!(
                div {
                    strong { "Spare parts needed:" }
                    label {
                        style: "display: flex; gap: 8px; align-items: center; padding: 2px 0;",
                        input { r#type: "checkbox" }
                        span { "{spare}" }
                    }
                }
            ))}
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let AppState {
        session,
        view,
        dataset_label,
        mut busy,
        mut status,
    } = AppState::new();

    let initial_path = config.dataset_path.clone();
    use_effect(move || {
        *busy.write() = true;
        info!(path = %initial_path.display(), "loading dataset");
        load_dataset(&initial_path, session, view, dataset_label, status);
        *busy.write() = false;
    });

    let tree = match view() {
        None => rsx! {
            p { "No dataset loaded. Use \"Open dataset\" to pick a .json, .csv or .xlsx file." }
        },
        Some(SessionView {
            categories,
            sub_issues,
            symptoms,
            search_text,
            actions,
            maintenance,
        }) => {
            let action_list = actions.map(|cards| {
                rsx! {
                    ActionList {
                        cards,
                        on_confirm: move |support: String| confirm(session, view, status, &support),
                    }
                }
            });
            let maintenance_panel =
                maintenance.map(|maintenance| rsx! { MaintenancePanel { maintenance } });

            rsx! {
                section {
                    style: PANEL_STYLE,
                    SelectField {
                        label: "Category",
                        view: categories,
                        on_change: move |value: String| {
                            apply(session, view, move |active| active.choose_category(&value))
                        },
                    }
                    div {
                        style: "display: flex; gap: 8px; align-items: flex-end;",
                        SelectField {
                            label: "Sub-issue",
                            view: sub_issues,
                            on_change: move |value: String| {
                                apply(session, view, move |active| active.choose_sub_issue(&value))
                            },
                        }
                        button {
                            style: BUTTON_STYLE,
                            onclick: move |_| apply(session, view, |active| active.skip_sub_issue()),
                            "I don't know"
                        }
                    }
                    label {
                        style: "display: flex; flex-direction: column; gap: 4px;",
                        span { "Search symptom" }
                        input {
                            r#type: "search",
                            value: "{search_text}",
                            placeholder: "Type an id or a few words",
                            oninput: move |event| {
                                let text = event.value();
                                apply(session, view, move |active| active.search_symptoms(&text))
                            },
                        }
                    }
                    SelectField {
                        label: "Symptom",
                        view: symptoms,
                        on_change: move |value: String| {
                            apply(session, view, move |active| active.choose_symptom(&value))
                        },
                    }
                }
                {action_list}
                {maintenance_panel}
            }
        }
    };

    let status_text = status();
    let label_text = dataset_label();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px; display: flex; flex-direction: column; gap: 16px;",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                button {
                    style: BUTTON_STYLE,
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }

                        let Some(file_path) = FileDialog::new()
                            .add_filter("Dataset", &SUPPORTED_EXTENSIONS)
                            .pick_file() else {
                            status.set(stamped("Open cancelled"));
                            return;
                        };

                        busy.set(true);
                        load_dataset(&file_path, session, view, dataset_label, status);
                        busy.set(false);
                    },
                    "Open dataset"
                }
                span { style: "color: #666;", "{label_text}" }
            }
            {tree}
            p { style: "color: #444; font-size: 0.9em;", "{status_text}" }
        }
    }
}
