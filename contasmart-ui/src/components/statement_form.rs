//! Statement Form Component
//!
//! Input form of one statement kind plus its result panel. Validation,
//! submission, sample data and reset all go through a
//! [`CalculationController`]; this component mirrors its panel and
//! notifications into signals.

use leptos::*;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use contasmart::form::ValidationError;
use contasmart::render::ResultPanel;
use contasmart::statement::Field;
use contasmart::{CalculationController, StatementKind, SubmitError};

use crate::api::BrowserApi;
use crate::components::{LoadingOverlay, ResultPanelView};
use crate::state::global::GlobalState;
use crate::state::storage::LocalStorage;
use crate::state::local_history;

type FormValues = BTreeMap<String, String>;
type FormController = CalculationController<BrowserApi, LocalStorage>;
type SharedController = Rc<RefCell<FormController>>;

fn form_controller(kind: StatementKind) -> FormController {
    CalculationController::new(kind, BrowserApi, local_history())
}

/// Copy the controller's panel and pending notification into the signals
fn sync(controller: &mut FormController, panel: RwSignal<ResultPanel>, state: GlobalState) {
    let current = controller.panel();
    if panel.with_untracked(|p| p != current) {
        panel.set(current.clone());
    }
    if let Some(notification) = controller.notifications_mut().take() {
        state.notify(notification);
    }
}

/// Run one submission. The controller stays borrowed until the answer
/// arrives; the submit button is disabled for that time.
#[allow(clippy::await_holding_refcell_ref)]
async fn submit(
    controller: SharedController,
    form: FormValues,
    panel: RwSignal<ResultPanel>,
    field_error: RwSignal<Option<ValidationError>>,
    state: GlobalState,
) {
    let Ok(mut controller) = controller.try_borrow_mut() else {
        logging::warn!("Submission ignored, form busy");
        return;
    };
    let kind = controller.kind();

    let outcome = {
        let _loading = state.start_loading();
        controller.submit(&form).await
    };

    match outcome {
        Ok(outcome) => {
            logging::log!("{} #{} rendered", kind.slug(), outcome.sequence);
            field_error.set(None);
            if outcome.history_len.is_some() {
                state.history_changed();
            }
        }
        Err(SubmitError::Validation(e)) => field_error.set(Some(e)),
        Err(SubmitError::Request(e)) => {
            field_error.set(None);
            logging::warn!("{} failed: {}", kind.slug(), e);
        }
    }

    sync(&mut controller, panel, state);
}

/// Fill the form with the server's sample payload
#[allow(clippy::await_holding_refcell_ref)]
async fn load_example(
    controller: SharedController,
    values: RwSignal<FormValues>,
    panel: RwSignal<ResultPanel>,
    field_error: RwSignal<Option<ValidationError>>,
    state: GlobalState,
) {
    let Ok(mut controller) = controller.try_borrow_mut() else {
        logging::warn!("Example ignored, form busy");
        return;
    };

    if let Some(example) = controller.load_example().await {
        values.set(example.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect());
        field_error.set(None);
    }

    sync(&mut controller, panel, state);
}

/// Form and result panel of a statement
#[component]
pub fn StatementForm(kind: StatementKind) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let values = create_rw_signal(FormValues::new());
    let field_error = create_rw_signal(None::<ValidationError>);
    let panel = create_rw_signal(ResultPanel::new(kind));
    let controller: SharedController = Rc::new(RefCell::new(form_controller(kind)));

    let on_submit = {
        let controller = Rc::clone(&controller);
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let form = values.get_untracked();
            spawn_local(submit(Rc::clone(&controller), form, panel, field_error, state));
        }
    };

    let on_example = {
        let controller = Rc::clone(&controller);
        move |_| {
            spawn_local(load_example(
                Rc::clone(&controller),
                values,
                panel,
                field_error,
                state,
            ));
        }
    };

    let on_clear = move |_| {
        values.set(FormValues::new());
        field_error.set(None);
        match controller.try_borrow_mut() {
            Ok(mut controller) => {
                controller.clear();
                sync(&mut controller, panel, state);
            }
            Err(_) => logging::warn!("Reset ignored, form busy"),
        }
    };

    view! {
        <div class="row g-4">
            <div class="col-lg-5">
                <div class="card shadow-sm">
                    <div class="card-header bg-white">
                        <h1 class="h5 mb-0">{kind.title()}</h1>
                    </div>
                    <div class="card-body">
                        <form id=format!("form-{}", kind.slug()) on:submit=on_submit novalidate=true>
                            {kind
                                .fields()
                                .iter()
                                .map(|field| {
                                    let required = field.id == kind.primary_field().id;
                                    view! {
                                        <FieldInput
                                            field=*field
                                            required=required
                                            values=values
                                            error=field_error
                                        />
                                    }
                                })
                                .collect_view()}

                            <div class="d-flex gap-2 mt-4">
                                <button
                                    type="submit"
                                    class="btn btn-primary flex-grow-1"
                                    disabled=move || state.loading.get()
                                >
                                    "Calcular"
                                </button>
                                <button type="button" class="btn btn-outline-secondary" on:click=on_example>
                                    "Exemplo"
                                </button>
                                <button type="button" class="btn btn-outline-danger" on:click=on_clear>
                                    "Limpar"
                                </button>
                            </div>
                        </form>
                    </div>
                </div>
            </div>

            <div class="col-lg-7">
                <LoadingOverlay loading=state.loading>
                    <ResultPanelView panel=panel />
                </LoadingOverlay>
            </div>
        </div>
    }
}

/// One numeric input; shows the validation message when it belongs to it
#[component]
fn FieldInput(
    field: Field,
    required: bool,
    values: RwSignal<FormValues>,
    error: RwSignal<Option<ValidationError>>,
) -> impl IntoView {
    let id = field.id;
    let message = move || {
        error.with(|e| {
            e.as_ref()
                .filter(|e| e.field_id() == id)
                .map(ToString::to_string)
        })
    };

    view! {
        <div class="mb-3">
            <label for=id class="form-label">
                {field.label}
                {required.then(|| view! { <span class="text-danger">" *"</span> })}
            </label>
            <div class="input-group">
                <span class="input-group-text">"R$"</span>
                <input
                    type="text"
                    inputmode="decimal"
                    id=id
                    name=id
                    placeholder="0,00"
                    class=move || if message().is_some() { "form-control is-invalid" } else { "form-control" }
                    prop:value=move || values.with(|v| v.get(id).cloned().unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        values.update(|v| {
                            v.insert(id.to_string(), value);
                        });
                        if error.with_untracked(|e| e.as_ref().is_some_and(|e| e.field_id() == id)) {
                            error.set(None);
                        }
                    }
                />
                {move || message().map(|m| view! { <div class="invalid-feedback">{m}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contasmart::controller::FORM_CLEARED;
    use contasmart::history::HistoryCache;
    use contasmart::notify::Level;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_state() -> GlobalState {
        GlobalState {
            api_online: create_rw_signal(None),
            loading: create_rw_signal(false),
            notification: create_rw_signal(None),
            history_version: create_rw_signal(0),
        }
    }

    fn test_controller(kind: StatementKind) -> FormController {
        CalculationController::new(
            kind,
            BrowserApi,
            HistoryCache::new(LocalStorage::new()).with_key("historico_dre_form_test"),
        )
    }

    #[wasm_bindgen_test]
    async fn test_empty_submit_marks_field_and_notifies() {
        let runtime = create_runtime();
        let state = test_state();
        let panel = create_rw_signal(ResultPanel::new(StatementKind::Dre));
        let field_error = create_rw_signal(None::<ValidationError>);
        let controller = Rc::new(RefCell::new(test_controller(StatementKind::Dre)));

        submit(Rc::clone(&controller), FormValues::new(), panel, field_error, state).await;

        let error = field_error.get_untracked().unwrap();
        assert_eq!(error.field_id(), "receita_bruta");
        let notification = state.notification.get_untracked().unwrap();
        assert_eq!(notification.level, Level::Danger);
        assert_eq!(notification.message, error.to_string());
        assert!(!state.loading.get_untracked());
        assert_eq!(state.history_version.get_untracked(), 0);
        assert!(controller.borrow().history().entries().is_empty());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_clear_is_published_once() {
        let runtime = create_runtime();
        let state = test_state();
        let panel = create_rw_signal(ResultPanel::new(StatementKind::Balanco));
        let mut controller = test_controller(StatementKind::Balanco);

        controller.clear();
        sync(&mut controller, panel, state);
        let shown = state.notification.get_untracked().unwrap();
        assert_eq!(shown.message, FORM_CLEARED);
        assert_eq!(shown.level, Level::Info);
        assert!(controller.notifications().latest().is_none());

        state.dismiss();
        sync(&mut controller, panel, state);
        assert!(state.notification.get_untracked().is_none());
        assert_eq!(panel.get_untracked(), ResultPanel::new(StatementKind::Balanco));

        runtime.dispose();
    }
}
