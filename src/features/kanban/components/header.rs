use leptos::prelude::*;

use crate::features::kanban::hooks::use_board;

#[component]
pub fn KanbanHeader() -> impl IntoView {
    let board = use_board();

    view! {
        <header class="kanban-header">
            <h1>"Manage Tasks"</h1>
            <span class="task-total">
                {move || match board.task_count() {
                    1 => "1 task".to_string(),
                    n => format!("{} tasks", n),
                }}
            </span>
        </header>
    }
}
