//! Procesos ビュー
//!
//! 一覧の状態は ListingController、メニューは MenuState、手動実行は
//! DispatchGateway に任せ、ここでは取得・実行の起動と表示だけを行う。

use crate::api::{FetchDispatch, FetchListing, API_BASE_URL, RESOURCE, SERVICE_BASE_URL};
use crate::components::{
    filter_bar::FilterBar, loading_bar::LoadingBar, pagination::Pagination,
    procesos_table::ProcesosTable,
};
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use pedimento_console_common::{
    fetch, DispatchGateway, FetchTicket, FilterChange, ListingController, MenuEvent, MenuState,
    PageNav, Resolved, WorkItem,
};
use std::sync::Arc;
use wasm_bindgen::JsCast;

/// 実行結果の通知
#[derive(Clone, PartialEq)]
struct Notice {
    ok: bool,
    message: String,
}

/// 状態を更新し、発行されたチケットを返す
fn issue(
    listing: RwSignal<ListingController>,
    f: impl FnOnce(&mut ListingController) -> Option<FetchTicket>,
) -> Option<FetchTicket> {
    let mut ticket = None;
    listing.update(|l| ticket = f(l));
    ticket
}

/// チケットの取得を実行して結果を反映（古い応答は resolve 側で捨てる）
fn run_fetch(listing: RwSignal<ListingController>, ticket: FetchTicket) {
    spawn_local(async move {
        let source = FetchListing::new(API_BASE_URL, RESOURCE);
        let (ticket, result) = fetch(&source, ticket).await;
        let mut follow = None;
        listing.update(|l| {
            if let Resolved::Refetch(next) = l.resolve(&ticket, result) {
                follow = Some(next);
            }
        });
        // 件数が減ってページが範囲外になったら丸めたページを取り直す
        if let Some(next) = follow {
            run_fetch(listing, next);
        }
    });
}

#[component]
pub fn Procesos() -> impl IntoView {
    let listing = RwSignal::new(ListingController::default());
    let menu = RwSignal::new(MenuState::default());
    let notice = RwSignal::new(None::<Notice>);
    // 実行中表示の再評価用
    let dispatch_revision = RwSignal::new(0u64);
    let gateway = StoredValue::new(Arc::new(DispatchGateway::new(FetchDispatch::new(
        SERVICE_BASE_URL,
    ))));

    if let Some(ticket) = issue(listing, |l| Some(l.refresh())) {
        run_fetch(listing, ticket);
    }

    // 開いているメニューの外側がクリックされたら閉じる
    let outside_click = window_event_listener(leptos::ev::click, move |ev| {
        let Some(open) = menu.get_untracked().open_id() else {
            return;
        };
        let selector = format!("[data-row-menu=\"{}\"]", open);
        let inside = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten())
            .is_some();
        if !inside {
            menu.update(|m| m.handle(MenuEvent::OutsideInteraction));
        }
    });
    on_cleanup(move || outside_click.remove());

    let on_filter_change = move |change: FilterChange| {
        let mut rejected = None;
        let ticket = issue(listing, |l| match l.apply(change) {
            Ok(ticket) => ticket,
            Err(e) => {
                rejected = Some(e.to_string());
                None
            }
        });
        if let Some(message) = rejected {
            notice.set(Some(Notice { ok: false, message }));
        }
        if let Some(ticket) = ticket {
            run_fetch(listing, ticket);
        }
    };

    let on_nav = move |nav: PageNav| {
        if let Some(ticket) = issue(listing, |l| l.navigate(nav)) {
            run_fetch(listing, ticket);
        }
    };

    let on_toggle_menu = move |id: i64| {
        menu.update(|m| m.handle(MenuEvent::OpenRequested(id)));
    };

    let is_pending = move |id: i64| {
        dispatch_revision.track();
        gateway.with_value(|g| g.is_in_flight(id))
    };

    let on_dispatch = move |item: WorkItem| {
        let gateway = gateway.get_value();
        spawn_local(async move {
            let mut call = Box::pin(gateway.dispatch(&item));
            // 最初のpollで実行中の印が付くので、そこで行を再描画する
            let result = match (&mut call).now_or_never() {
                Some(result) => result,
                None => {
                    dispatch_revision.update(|r| *r += 1);
                    call.await
                }
            };
            dispatch_revision.update(|r| *r += 1);

            match result {
                Ok(outcome) => {
                    if outcome.close_menu {
                        menu.update(|m| m.handle(MenuEvent::DispatchSucceeded(outcome.item_id)));
                    }
                    notice.set(Some(Notice {
                        ok: true,
                        message: format!(
                            "{} enviado para el pedimento {}",
                            outcome.service.label(),
                            item.subject.display_code()
                        ),
                    }));
                    if outcome.refresh_recommended {
                        if let Some(ticket) = issue(listing, |l| Some(l.refresh())) {
                            run_fetch(listing, ticket);
                        }
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&e.to_string().into());
                    notice.set(Some(Notice {
                        ok: false,
                        message: e.to_string(),
                    }));
                }
            }
        });
    };

    let filter = Signal::derive(move || listing.with(|l| l.filter().clone()));
    let items = Signal::derive(move || listing.with(|l| l.items().to_vec()));
    let page = Signal::derive(move || listing.with(|l| l.filter().page));
    let total_pages = Signal::derive(move || listing.with(|l| l.total_pages()));
    let total_count = Signal::derive(move || listing.with(|l| l.total_count()));

    view! {
        <section class="procesos">
            <FilterBar filter=filter on_change=on_filter_change />

            <Show when=move || listing.with(|l| l.loading())>
                <LoadingBar />
            </Show>

            {move || {
                listing.with(|l| {
                    l.error().map(|message| {
                        let message = message.to_string();
                        view! { <p class="error-message">{message}</p> }
                    })
                })
            }}

            {move || {
                notice.get().map(|n| {
                    let class = if n.ok { "notice notice-ok" } else { "notice notice-error" };
                    view! {
                        <div class=class>
                            <span>{n.message}</span>
                            <button class="btn btn-tertiary btn-small" on:click=move |_| notice.set(None)>
                                "×"
                            </button>
                        </div>
                    }
                })
            }}

            <ProcesosTable
                items=items
                menu=menu
                on_toggle_menu=on_toggle_menu
                on_dispatch=on_dispatch
                is_pending=is_pending
            />

            {move || {
                listing.with(|l| {
                    (l.items().is_empty() && !l.loading())
                        .then(|| view! { <p class="text-muted">"Sin registros"</p> })
                })
            }}

            <Pagination
                page=page
                total_pages=total_pages
                total_count=total_count
                on_nav=on_nav
            />
        </section>
    }
}
