use leptos::ev::DragEvent;
use leptos::prelude::*;

use super::task_form::TaskForm;
use crate::features::kanban::hooks::{use_board, use_board_ui};
use crate::models::{ColumnId, Priority, Task};

#[component]
pub fn TaskCard(task: Task, column: ColumnId) -> impl IntoView {
    let board = use_board();
    let ui = use_board_ui();
    let task = StoredValue::new(task);

    let is_editing = move || task.with_value(|t| ui.is_editing(&t.id));

    let on_dragstart = move |ev: DragEvent| {
        // Firefox will not start a drag without some payload
        if let Some(data) = ev.data_transfer() {
            let _ = task.with_value(|t| data.set_data("text/plain", &t.id));
        }
        board.begin_drag(task.get_value(), column);
    };

    let on_save = Callback::new(move |(title, description, priority): (String, String, Priority)| {
        let saved = board.edit_task(task.with_value(|t| t.id.clone()), column, title, description, priority);
        if saved {
            ui.editing.set(None);
        }
        saved
    });
    let on_cancel = Callback::new(move |_: ()| ui.editing.set(None));

    view! {
        <div
            class="task-card"
            class:dragging=move || task.with_value(|t| board.is_dragged(&t.id))
            class:editing=is_editing
            draggable=move || if is_editing() { "false" } else { "true" }
            on:dragstart=on_dragstart
            on:dragend=move |_| board.cancel_drag()
        >
            {move || {
                let t = task.get_value();
                if is_editing() {
                    view! {
                        <TaskForm
                            title=t.title
                            description=t.description
                            priority=t.priority
                            submit_label="Save"
                            on_submit=on_save
                            on_cancel=on_cancel
                        />
                    }.into_any()
                } else {
                    let created = t.created_at.map(|at| at.format("%b %d, %Y").to_string());
                    let description = (!t.description.is_empty()).then(|| {
                        view! { <p class="task-description">{t.description.clone()}</p> }
                    });
                    let edit_id = t.id.clone();
                    let delete_id = t.id.clone();

                    view! {
                        <div class="task-content">
                            <div class="task-header">
                                <span class="task-grip">"⋮⋮"</span>
                                <h4 class="task-title">{t.title.clone()}</h4>
                                <span class=format!("priority-badge priority-{}", t.priority.as_str())>
                                    {t.priority.as_str()}
                                </span>
                                <button
                                    class="task-action-btn edit-btn"
                                    title="Edit"
                                    on:click=move |_| ui.editing.set(Some(edit_id.clone()))
                                >"✎"</button>
                                <button
                                    class="task-action-btn delete-btn"
                                    title="Delete"
                                    on:click=move |_| board.delete_task(delete_id.clone(), column)
                                >"✕"</button>
                            </div>
                            {description}
                            {created.map(|date| view! { <span class="task-date">{date}</span> })}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
