//! 処理一覧テーブルと行アクションメニュー

use leptos::prelude::*;
use pedimento_console_common::{MenuState, WorkItem};

#[component]
pub fn ProcesosTable<FT, FD, FP>(
    items: Signal<Vec<WorkItem>>,
    menu: RwSignal<MenuState>,
    on_toggle_menu: FT,
    on_dispatch: FD,
    is_pending: FP,
) -> impl IntoView
where
    FT: Fn(i64) + 'static + Clone + Send + Sync,
    FD: Fn(WorkItem) + 'static + Clone + Send + Sync,
    FP: Fn(i64) -> bool + 'static + Clone + Send + Sync,
{
    view! {
        <table class="procesos-table">
            <thead>
                <tr>
                    <th>"ID"</th>
                    <th>"Organización"</th>
                    <th>"Pedimento"</th>
                    <th>"Servicio"</th>
                    <th>"Estado"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || items.get()
                    key=|item| (item.id, item.state, item.updated_at.clone())
                    children=move |item| {
                        let on_toggle_menu = on_toggle_menu.clone();
                        let on_dispatch = on_dispatch.clone();
                        let is_pending = is_pending.clone();
                        view! {
                            <ProcesoRow
                                item=item
                                menu=menu
                                on_toggle_menu=on_toggle_menu
                                on_dispatch=on_dispatch
                                is_pending=is_pending
                            />
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn ProcesoRow<FT, FD, FP>(
    item: WorkItem,
    menu: RwSignal<MenuState>,
    on_toggle_menu: FT,
    on_dispatch: FD,
    is_pending: FP,
) -> impl IntoView
where
    FT: Fn(i64) + 'static + Clone + Send + Sync,
    FD: Fn(WorkItem) + 'static + Clone + Send + Sync,
    FP: Fn(i64) -> bool + 'static + Clone + Send + Sync,
{
    let id = item.id;
    let dispatchable = item.is_dispatchable();
    let service_label = item.service.label();
    let state_key = item.state.as_str();
    let state_label = item.state.label();
    let organization = item.organization_display();
    let subject_code = item.subject.display_code();

    view! {
        <tr class=format!("row state-{}", state_key)>
            <td>{id}</td>
            <td>{organization}</td>
            <td>{subject_code}</td>
            <td>{service_label}</td>
            <td>
                <span class=format!("badge badge-{}", state_key)>{state_label}</span>
            </td>
            <td class="actions">
                // 外側クリック判定はこの要素の範囲で行う
                <div class="row-menu" data-row-menu=id.to_string()>
                    <button
                        class="btn btn-tertiary btn-small"
                        on:click=move |_| on_toggle_menu(id)
                    >
                        "⋮"
                    </button>
                    <Show when=move || menu.get().is_open(id)>
                        <div class="row-menu-dropdown">
                            <button
                                class="btn btn-primary btn-small"
                                disabled={
                                    let is_pending = is_pending.clone();
                                    move || !dispatchable || is_pending(id)
                                }
                                on:click={
                                    let item = item.clone();
                                    let on_dispatch = on_dispatch.clone();
                                    move |_| on_dispatch(item.clone())
                                }
                            >
                                {
                                    let is_pending = is_pending.clone();
                                    move || {
                                        if !dispatchable {
                                            "Sin ejecución manual".to_string()
                                        } else if is_pending(id) {
                                            "Ejecutando...".to_string()
                                        } else {
                                            format!("Ejecutar {}", service_label)
                                        }
                                    }
                                }
                            </button>
                        </div>
                    </Show>
                </div>
            </td>
        </tr>
    }
}
