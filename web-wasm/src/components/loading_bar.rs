//! 一覧取得中の表示

use leptos::prelude::*;

#[component]
pub fn LoadingBar() -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div class="progress-fill progress-indeterminate" />
            </div>
            <p class="progress-text">"Cargando..."</p>
        </div>
    }
}
