//! 絞り込み条件の入力欄

use leptos::prelude::*;
use pedimento_console_common::{FilterChange, FilterState, ProcessState, ServiceKind};

const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

#[component]
pub fn FilterBar<F>(filter: Signal<FilterState>, on_change: F) -> impl IntoView
where
    F: Fn(FilterChange) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="filter-pedimento">"Pedimento"</label>
                    <input
                        type="text"
                        id="filter-pedimento"
                        placeholder="Buscar pedimento..."
                        prop:value=move || filter.get().subject
                        on:input={
                            let on_change = on_change.clone();
                            move |ev| on_change(FilterChange::Subject(event_target_value(&ev)))
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="filter-estado">"Estado"</label>
                    <select
                        id="filter-estado"
                        on:change={
                            let on_change = on_change.clone();
                            move |ev| {
                                let state = event_target_value(&ev)
                                    .parse::<u8>()
                                    .ok()
                                    .and_then(|code| ProcessState::try_from(code).ok());
                                on_change(FilterChange::State(state));
                            }
                        }
                    >
                        <option value="" selected=move || filter.get().state.is_none()>"Todos"</option>
                        {ProcessState::ALL
                            .into_iter()
                            .map(|state| {
                                view! {
                                    <option
                                        value=state.code().to_string()
                                        selected=move || filter.get().state == Some(state)
                                    >
                                        {state.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="filter-servicio">"Servicio"</label>
                    <select
                        id="filter-servicio"
                        on:change={
                            let on_change = on_change.clone();
                            move |ev| {
                                let service = event_target_value(&ev)
                                    .parse::<u8>()
                                    .ok()
                                    .and_then(|code| ServiceKind::try_from(code).ok());
                                on_change(FilterChange::Service(service));
                            }
                        }
                    >
                        <option value="" selected=move || filter.get().service.is_none()>"Todos"</option>
                        {ServiceKind::ALL
                            .into_iter()
                            .map(|service| {
                                view! {
                                    <option
                                        value=service.code().to_string()
                                        selected=move || filter.get().service == Some(service)
                                    >
                                        {service.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="filter-page-size">"Por página"</label>
                    <select
                        id="filter-page-size"
                        on:change={
                            let on_change = on_change.clone();
                            move |ev| {
                                if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                                    on_change(FilterChange::PageSize(size));
                                }
                            }
                        }
                    >
                        {PAGE_SIZES
                            .into_iter()
                            .map(|size| {
                                view! {
                                    <option
                                        value=size.to_string()
                                        selected=move || filter.get().page_size == size
                                    >
                                        {size}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>
        </div>
    }
}
