//! Toast Notification Component
//!
//! Floating alert with the latest notification.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div
            class="position-fixed top-0 end-0 p-3"
            style="z-index: 1080; min-width: 300px; max-width: 420px;"
        >
            {move || {
                state.notification.get().map(|note| view! {
                    <div
                        class=format!("alert {} alert-dismissible shadow fade show", note.level.class())
                        role="alert"
                    >
                        {note.text()}
                        <button
                            type="button"
                            class="btn-close"
                            aria-label="Fechar"
                            on:click=move |_| state.dismiss()
                        />
                    </div>
                })
            }}
        </div>
    }
}
