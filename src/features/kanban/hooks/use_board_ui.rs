use leptos::prelude::*;

use crate::models::ColumnId;

/// Form state shared by every column on the page: at most one card is being
/// edited and at most one column shows its add form.
#[derive(Clone, Copy)]
pub struct BoardUi {
    pub editing: RwSignal<Option<String>>,
    pub adding_to: RwSignal<Option<ColumnId>>,
}

impl BoardUi {
    pub fn is_editing(&self, task_id: &str) -> bool {
        self.editing.with(|e| e.as_deref() == Some(task_id))
    }

    pub fn is_adding_to(&self, column: ColumnId) -> bool {
        self.adding_to.get() == Some(column)
    }
}

pub fn provide_board_ui() -> BoardUi {
    let ui = BoardUi {
        editing: RwSignal::new(None),
        adding_to: RwSignal::new(None),
    };
    provide_context(ui);
    ui
}

pub fn use_board_ui() -> BoardUi {
    expect_context::<BoardUi>()
}
