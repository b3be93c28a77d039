use leptos::ev;
use leptos::prelude::*;

use crate::models::Priority;

/// Title, description and priority fields with submit/cancel buttons. Used
/// both for adding a task to a column and for editing a card in place.
///
/// `on_submit` reports whether the values were accepted. A rejected submit
/// (blank title) keeps the typed values so they can be corrected.
#[component]
pub fn TaskForm(
    #[prop(optional, into)] title: String,
    #[prop(optional, into)] description: String,
    #[prop(optional)] priority: Priority,
    #[prop(into)] submit_label: String,
    on_submit: Callback<(String, String, Priority), bool>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let (title, set_title) = signal(title);
    let (description, set_description) = signal(description);
    let (priority, set_priority) = signal(priority);

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let accepted = on_submit.run((
            title.get_untracked(),
            description.get_untracked(),
            priority.get_untracked(),
        ));
        if accepted {
            set_title.set(String::new());
            set_description.set(String::new());
            set_priority.set(Priority::default());
        }
    };

    view! {
        <form class="task-form" on:submit=handle_submit>
            <input
                type="text"
                placeholder="Task title"
                on:input=move |ev| set_title.set(event_target_value(&ev))
                prop:value=move || title.get()
            />
            <textarea
                placeholder="Description"
                rows="2"
                on:input=move |ev| set_description.set(event_target_value(&ev))
                prop:value=move || description.get()
            ></textarea>
            <select on:change=move |ev| {
                if let Ok(p) = event_target_value(&ev).parse::<Priority>() {
                    set_priority.set(p);
                }
            }>
                {Priority::all().into_iter().map(|p| {
                    view! {
                        <option value=p.as_str() selected=move || priority.get() == p>
                            {p.label()}
                        </option>
                    }
                }).collect::<Vec<_>>()}
            </select>
            <div class="form-actions">
                <button type="submit" class="btn-primary">{submit_label}</button>
                <button type="button" class="btn-secondary" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
