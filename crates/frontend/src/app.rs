use crate::domain::c003_hardware_charge::ui::matrix::HardwareChargesMatrix;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <header class="app__header">
                <h1>"Hardware accessory charges"</h1>
                <p class="app__hint">
                    "Standard accessory charge per cabinet type and hardware brand. Edit a cell to save."
                </p>
            </header>
            <HardwareChargesMatrix />
        </main>
    }
}
