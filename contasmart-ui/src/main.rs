//! ContaSmart Pro Web
//!
//! Browser front end for the ContaSmart calculation server, built with
//! Leptos (WASM).
//!
//! # Features
//!
//! - DRE and Balanço forms with inline validation
//! - Result panel with summary metrics, detail table and analysis
//! - Local history of DRE results with a net-profit trend chart
//! - Configurable calculation server URL
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Formatting, validation, the result view model and the
//! history cache come from the `contasmart` crate; this crate adds the HTTP
//! transport, `localStorage` and the components.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
