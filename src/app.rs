use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::config::AppConfig;
use crate::features::kanban::provide_board;
use crate::pages::ManageTasks;

pub const TASKS_PATH: &str = "/manage-tasks";

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // The board store lives for the whole session and is shared by context
    provide_board(&config);

    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <Redirect path=TASKS_PATH /> }>
                    <Route path=path!("/manage-tasks") view=ManageTasks />
                </Routes>
            </main>
        </Router>
    }
}
