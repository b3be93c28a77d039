use leptos::prelude::*;

use crate::features::kanban::{provide_board_ui, KanbanColumn, KanbanHeader};
use crate::models::ColumnId;

#[component]
pub fn ManageTasks() -> impl IntoView {
    provide_board_ui();

    view! {
        <div class="kanban-page">
            <KanbanHeader />
            <div class="kanban-board">
                {ColumnId::all()
                    .into_iter()
                    .map(|column| view! { <KanbanColumn column=column /> })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}
