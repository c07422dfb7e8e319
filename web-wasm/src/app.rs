//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{header::Header, procesos::Procesos};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="container">
            <Header />
            <Procesos />
        </div>
    }
}
