//! ページ移動ボタン

use leptos::prelude::*;
use pedimento_console_common::PageNav;

#[component]
pub fn Pagination<F>(
    page: Signal<u32>,
    total_pages: Signal<u32>,
    total_count: Signal<u64>,
    on_nav: F,
) -> impl IntoView
where
    F: Fn(PageNav) + 'static + Clone + Send + Sync,
{
    let at_first = move || page.get() <= 1;
    let at_last = move || page.get() >= total_pages.get();

    view! {
        <div class="export-buttons pagination">
            <button
                class="btn btn-secondary btn-small"
                disabled=at_first
                on:click={
                    let on_nav = on_nav.clone();
                    move |_| on_nav(PageNav::First)
                }
            >
                "«"
            </button>
            <button
                class="btn btn-secondary btn-small"
                disabled=at_first
                on:click={
                    let on_nav = on_nav.clone();
                    move |_| on_nav(PageNav::Previous)
                }
            >
                "‹"
            </button>

            <span class="page-info">
                {move || format!(
                    "Página {} de {} ({} registros)",
                    page.get(),
                    total_pages.get(),
                    total_count.get()
                )}
            </span>

            <button
                class="btn btn-secondary btn-small"
                disabled=at_last
                on:click={
                    let on_nav = on_nav.clone();
                    move |_| on_nav(PageNav::Next)
                }
            >
                "›"
            </button>
            <button
                class="btn btn-secondary btn-small"
                disabled=at_last
                on:click={
                    let on_nav = on_nav.clone();
                    move |_| on_nav(PageNav::Last)
                }
            >
                "»"
            </button>
        </div>
    }
}
