//! Loading Component
//!
//! Spinner overlay shown while a calculation is in flight.

use leptos::*;

/// Loading overlay for forms and result panels
#[component]
pub fn LoadingOverlay(
    #[prop(into)]
    loading: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="position-relative">
            {children()}

            <Show when=move || loading.get()>
                <div
                    class="position-absolute top-0 start-0 w-100 h-100 d-flex align-items-center justify-content-center bg-white bg-opacity-75 rounded"
                >
                    <div class="spinner-border text-primary" role="status">
                        <span class="visually-hidden">"Calculando..."</span>
                    </div>
                </div>
            </Show>
        </div>
    }
}
