use leptos::ev::DragEvent;
use leptos::prelude::*;

use super::task_card::TaskCard;
use super::task_form::TaskForm;
use crate::features::kanban::hooks::{use_board, use_board_ui};
use crate::models::{ColumnId, Priority};

#[component]
pub fn KanbanColumn(column: ColumnId) -> impl IntoView {
    let board = use_board();
    let ui = use_board_ui();

    // Cards re-render only when this lane's tasks change
    let tasks = Memo::new(move |_| board.tasks(column));
    let heading = board.column_title(column);

    let on_add = Callback::new(move |(title, description, priority): (String, String, Priority)| {
        let added = board.add_task(column, title, description, priority);
        if added {
            ui.adding_to.set(None);
        }
        added
    });
    let on_cancel_add = Callback::new(move |_: ()| ui.adding_to.set(None));

    view! {
        <div
            class="kanban-column"
            class:drag-source=move || board.is_drag_source(column)
            on:dragover=move |ev: DragEvent| ev.prevent_default()
            on:drop=move |ev: DragEvent| {
                ev.prevent_default();
                board.commit_drop(column);
            }
        >
            <div class="column-header">
                <h3>{heading}</h3>
                <span class="task-count">{move || tasks.with(|tasks| tasks.len())}</span>
            </div>
            <div class="column-content">
                {move || {
                    tasks.get()
                        .into_iter()
                        .map(|task| view! { <TaskCard task=task column=column /> })
                        .collect::<Vec<_>>()
                }}
                {move || {
                    if ui.is_adding_to(column) {
                        view! {
                            <TaskForm submit_label="Add" on_submit=on_add on_cancel=on_cancel_add />
                        }.into_any()
                    } else {
                        view! {
                            <button
                                class="add-task-btn"
                                on:click=move |_| ui.adding_to.set(Some(column))
                            >"+ Add Task"</button>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
