pub mod view_model;

use contracts::domain::c001_cabinet_type::CabinetTypeDto;
use leptos::prelude::*;

use crate::shared::number_format::format_money;
use self::view_model::MatrixViewModel;

/// Editable (cabinet type x hardware brand) charges grid.
#[component]
#[allow(non_snake_case)]
pub fn HardwareChargesMatrix() -> impl IntoView {
    let vm = MatrixViewModel::new();
    vm.load();

    view! {
        <section class="charges-matrix">
            {move || {
                vm.error
                    .get()
                    .map(|e| view! { <div class="charges-matrix__error">{e}</div> })
            }}
            <Show
                when=move || !vm.loading.get()
                fallback=|| view! { <div class="charges-matrix__loading">"Loading..."</div> }
            >
                <table class="charges-matrix__table">
                    <thead>
                        <tr>
                            <th>"Cabinet type"</th>
                            {move || {
                                vm.brands
                                    .get()
                                    .into_iter()
                                    .map(|b| view! { <th>{b.name.clone()}</th> })
                                    .collect_view()
                            }}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            vm.cabinet_types
                                .get()
                                .into_iter()
                                .map(|ct| view! { <MatrixRow vm=vm cabinet_type=ct /> })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

#[component]
#[allow(non_snake_case)]
fn MatrixRow(vm: MatrixViewModel, cabinet_type: CabinetTypeDto) -> impl IntoView {
    let cabinet_type_key = cabinet_type.id.to_string();
    let label = cabinet_type.name.clone();

    view! {
        <tr>
            <th class="charges-matrix__row-label">{label}</th>
            {move || {
                let key = cabinet_type_key.clone();
                vm.brands
                    .get()
                    .into_iter()
                    .map(|b| {
                        view! {
                            <MatrixCell
                                vm=vm
                                cabinet_type_key=key.clone()
                                brand_name=b.name.clone()
                            />
                        }
                    })
                    .collect_view()
            }}
        </tr>
    }
}

/// One editable cell. While its request is in flight the cell is marked as
/// saving; edits are not blocked, only both shown as saving.
#[component]
#[allow(non_snake_case)]
fn MatrixCell(vm: MatrixViewModel, cabinet_type_key: String, brand_name: String) -> impl IntoView {
    let display = {
        let ct = cabinet_type_key.clone();
        let brand = brand_name.clone();
        move || {
            vm.grid.with(|g| {
                g.get(&ct, &brand)
                    .map(|r| format_money(r.standard_accessory_charge))
                    .unwrap_or_default()
            })
        }
    };
    let saving = {
        let ct = cabinet_type_key.clone();
        let brand = brand_name.clone();
        move || vm.is_pending(&ct, &brand)
    };
    let cell_class = {
        let saving = saving.clone();
        move || {
            if saving() {
                "charges-matrix__cell charges-matrix__cell--saving"
            } else {
                "charges-matrix__cell"
            }
        }
    };
    let on_commit = {
        let ct = cabinet_type_key.clone();
        let brand = brand_name.clone();
        move |ev: web_sys::Event| {
            vm.save_cell(ct.clone(), brand.clone(), event_target_value(&ev));
        }
    };

    view! {
        <td class=cell_class>
            <input type="text" prop:value=display on:change=on_commit />
            {move || saving().then(|| view! { <span class="charges-matrix__spinner">"saving"</span> })}
        </td>
    }
}
