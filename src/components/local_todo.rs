//! Local To-Do Component
//!
//! The offline variant: no login, nothing persisted.

use leptos::prelude::*;
use workout_core::local::LocalTaskList;

#[component]
pub fn LocalTodoApp() -> impl IntoView {
    let tasks = RwSignal::new(LocalTaskList::new());
    let (new_task, set_new_task) = signal(String::new());

    let add_task = move || {
        let text = new_task.get_untracked();
        let added = tasks.try_update(|list| list.add(&text)).and_then(Result::ok);
        if added.is_some() {
            set_new_task.set(String::new());
        }
    };

    view! {
        <div class="app">
            <h1>"📝 To-Do List"</h1>

            <div class="input-area">
                <input
                    type="text"
                    placeholder="Digite uma tarefa..."
                    prop:value=move || new_task.get()
                    on:input=move |ev| set_new_task.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            add_task();
                        }
                    }
                />
                <button on:click=move |_| add_task()>"Adicionar"</button>
            </div>

            <ul class="task-list">
                <For
                    each=move || tasks.with(|list| list.tasks().to_vec())
                    key=|task| (task.id, task.done)
                    let:task
                >
                    {
                        let id = task.id;
                        view! {
                            <li class={if task.done { "done" } else { "" }}>
                                <span on:click=move |_| {
                                    tasks.update(|list| {
                                        list.toggle(id);
                                    });
                                }>{task.text}</span>
                                <button on:click=move |_| {
                                    tasks.update(|list| {
                                        list.remove(id);
                                    });
                                }>"❌"</button>
                            </li>
                        }
                    }
                </For>
            </ul>
        </div>
    }
}
