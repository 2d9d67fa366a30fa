use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Textarea, Tooltip, TooltipContent,
};
use crate::models::{Note, NoteDraft, NotePatch};
use crate::state::AppContext;
use crate::theme::{apply_theme, load_theme, toggle_theme};
use crate::util::{greeting, now_ms, relative_time, today_line};
use icons::X;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// What the confirm dialog is about to remove.
#[derive(Clone)]
enum DeleteTarget {
    Notebook {
        id: String,
        name: String,
    },
    Note {
        notebook_id: String,
        id: String,
        title: String,
    },
}

impl DeleteTarget {
    fn label(&self) -> &str {
        match self {
            Self::Notebook { name, .. } => name,
            Self::Note { title, .. } => title,
        }
    }
}

#[component]
fn EditIcon() -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="16"
            height="16"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            <path d="M12 20h9" />
            <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
        </svg>
    }
}

#[component]
fn TrashIcon() -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="16"
            height="16"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
        >
            <path d="M3 6h18" />
            <path d="M8 6V4h8v2" />
            <path d="M19 6l-1 14H6L5 6" />
            <path d="M10 11v6" />
            <path d="M14 11v6" />
        </svg>
    }
}

/// Fixed placeholder for a notebook with zero notes. Rendered instead of an
/// empty container so "no cards" is never mistaken for "not loaded".
#[component]
fn EmptyNotes() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-2 py-16 text-muted-foreground">
            <svg
                xmlns="http://www.w3.org/2000/svg"
                width="32"
                height="32"
                viewBox="0 0 24 24"
                fill="none"
                stroke="currentColor"
                stroke-width="1.5"
                stroke-linecap="round"
                stroke-linejoin="round"
                aria-hidden="true"
            >
                <path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z" />
                <path d="M14 2v6h6" />
            </svg>
            <div class="text-sm">"No notes"</div>
        </div>
    }
}

#[component]
pub fn NoteKeeperPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let notebooks = app_state.0.notebooks;
    let notes = app_state.0.notes;
    let active_id = app_state.0.active_notebook_id;
    let ui_error = app_state.0.ui_error;

    // Theme: stored preference, else the OS color scheme.
    let theme = RwSignal::new(load_theme(&app_state.0.backend));
    apply_theme(theme.get_untracked());

    // Small-screen sidebar overlay.
    let sidebar_open: RwSignal<bool> = RwSignal::new(false);

    // Create notebook dialog
    let create_open: RwSignal<bool> = RwSignal::new(false);
    let create_name: RwSignal<String> = RwSignal::new(String::new());
    let create_error: RwSignal<Option<String>> = RwSignal::new(None);
    let create_name_ref: NodeRef<html::Input> = NodeRef::new();

    // Rename notebook dialog
    let rename_open: RwSignal<bool> = RwSignal::new(false);
    let rename_id: RwSignal<Option<String>> = RwSignal::new(None);
    let rename_value: RwSignal<String> = RwSignal::new(String::new());
    let rename_error: RwSignal<Option<String>> = RwSignal::new(None);

    // Delete confirmation dialog (notebooks and notes share it)
    let delete_target: RwSignal<Option<DeleteTarget>> = RwSignal::new(None);

    // Note create/edit modal
    let note_modal_open: RwSignal<bool> = RwSignal::new(false);
    let note_editing: RwSignal<Option<Note>> = RwSignal::new(None);
    let note_title: RwSignal<String> = RwSignal::new(String::new());
    let note_text: RwSignal<String> = RwSignal::new(String::new());

    let on_toggle_theme = {
        let backend = app_state.0.backend.clone();
        move |_| {
            theme.set(toggle_theme(&backend, theme.get_untracked()));
        }
    };

    let open_create_dialog = move || {
        create_name.set(String::new());
        create_error.set(None);
        create_open.set(true);
    };

    // Focus the name input once the dialog is mounted.
    Effect::new(move |_| {
        if !create_open.get() {
            return;
        }

        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                if let Some(el) = create_name_ref.get_untracked() {
                    let _ = el.focus();
                }
            })
            .as_ref()
            .unchecked_ref(),
            0,
        );
    });

    let submit_create_notebook = {
        let state = app_state.0.clone();
        move || {
            let name = create_name.get_untracked();
            if name.trim().is_empty() {
                create_error.set(Some("Notebook name is required".to_string()));
                return;
            }

            state.create_notebook(name.trim());
            create_open.set(false);
        }
    };

    let open_rename_dialog = move |id: String, name: String| {
        rename_id.set(Some(id));
        rename_value.set(name);
        rename_error.set(None);
        rename_open.set(true);
    };

    let submit_rename_notebook = {
        let state = app_state.0.clone();
        move || {
            let id = rename_id.get_untracked().unwrap_or_default();
            let name = rename_value.get_untracked();
            if id.trim().is_empty() {
                return;
            }
            if name.trim().is_empty() {
                rename_error.set(Some("Name cannot be empty".to_string()));
                return;
            }

            state.rename_notebook(&id, name.trim());
            rename_open.set(false);
        }
    };

    let submit_delete = {
        let state = app_state.0.clone();
        move || {
            match delete_target.get_untracked() {
                Some(DeleteTarget::Notebook { id, .. }) => state.delete_notebook(&id),
                Some(DeleteTarget::Note {
                    notebook_id, id, ..
                }) => state.delete_note(&notebook_id, &id),
                None => {}
            }
            delete_target.set(None);
        }
    };

    let open_note_modal = move |note: Option<Note>| {
        match &note {
            Some(n) => {
                note_title.set(n.title.clone());
                note_text.set(n.text.clone());
            }
            None => {
                note_title.set(String::new());
                note_text.set(String::new());
            }
        }
        note_editing.set(note);
        note_modal_open.set(true);
    };

    let submit_note_modal = {
        let state = app_state.0.clone();
        move || {
            let title = note_title.get_untracked();
            let text = note_text.get_untracked();
            if title.trim().is_empty() && text.trim().is_empty() {
                return;
            }

            match note_editing.get_untracked() {
                Some(note) => state.update_note(
                    &note.id,
                    NotePatch {
                        title: Some(title),
                        text: Some(text),
                    },
                ),
                None => {
                    let _ = state.create_note(NoteDraft { title, text });
                }
            }

            note_modal_open.set(false);
        }
    };

    let panel_title = {
        let state = app_state.0.clone();
        move || state.active_notebook_name().unwrap_or_default()
    };

    let state_for_rows = app_state.0.clone();

    let has_notebooks = move || !notebooks.get().is_empty();

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="mx-auto flex w-full max-w-[1200px] gap-6 px-4 py-6">
                // Overlay behind the sidebar on small screens.
                <Show when=move || sidebar_open.get() fallback=|| ().into_view()>
                    <div
                        class="fixed inset-0 z-30 bg-black/30 lg:hidden"
                        on:click=move |_| sidebar_open.set(false)
                    />
                </Show>

                <aside class=move || {
                    let base = "z-40 w-64 shrink-0 lg:static lg:block";
                    if sidebar_open.get() {
                        format!("{base} fixed inset-y-0 left-0 bg-background p-4 lg:p-0")
                    } else {
                        format!("{base} hidden")
                    }
                }>
                    <div class="flex items-center justify-between pb-4">
                        <div class="text-sm font-semibold">"NoteKeeper"</div>
                        <Tooltip>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                class="h-7 w-7"
                                attr:aria-label="New notebook"
                                on:click=move |_| open_create_dialog()
                            >
                                <span class="text-base text-muted-foreground">"+"</span>
                            </Button>
                            <TooltipContent>"New notebook"</TooltipContent>
                        </Tooltip>
                    </div>

                    <div class="space-y-1">
                        <Show
                            when=has_notebooks
                            fallback=|| view! {
                                <div class="text-xs text-muted-foreground">"No notebooks yet."</div>
                            }
                        >
                            {
                                let state = state_for_rows.clone();
                                move || {
                                    let active = active_id.get();
                                    let state = state.clone();

                                    notebooks
                                        .get()
                                        .into_iter()
                                        .map(|nb| {
                                        let is_active = active.as_deref() == Some(nb.id.as_str());
                                        let variant = if is_active {
                                            ButtonVariant::Accent
                                        } else {
                                            ButtonVariant::Ghost
                                        };

                                        let id_for_click = nb.id.clone();
                                        let id_for_rename = nb.id.clone();
                                        let name_for_rename = nb.name.clone();
                                        let id_for_delete = nb.id.clone();
                                        let name_for_delete = nb.name.clone();
                                        let state_for_click = state.clone();

                                        view! {
                                            <div class="group flex min-w-0 items-center gap-1" data-notebook=nb.id.clone()>
                                                <Button
                                                    variant=variant
                                                    size=ButtonSize::Sm
                                                    class="min-w-0 flex-1 justify-start"
                                                    attr:aria-current=move || {
                                                        if is_active { Some("page") } else { None }
                                                    }
                                                    on:click=move |_| {
                                                        state_for_click.activate(&id_for_click);
                                                        sidebar_open.set(false);
                                                    }
                                                >
                                                    <span class="min-w-0 flex-1 truncate">{nb.name.clone()}</span>
                                                </Button>

                                                <div class="hidden shrink-0 items-center gap-1 group-hover:flex">
                                                    <Tooltip>
                                                        <Button
                                                            variant=ButtonVariant::Ghost
                                                            size=ButtonSize::Icon
                                                            class="h-7 w-7 text-muted-foreground"
                                                            attr:aria-label="Edit notebook"
                                                            on:click=move |ev: web_sys::MouseEvent| {
                                                                ev.stop_propagation();
                                                                open_rename_dialog(
                                                                    id_for_rename.clone(),
                                                                    name_for_rename.clone(),
                                                                );
                                                            }
                                                        >
                                                            <EditIcon />
                                                        </Button>
                                                        <TooltipContent>"Edit notebook"</TooltipContent>
                                                    </Tooltip>

                                                    <Tooltip>
                                                        <Button
                                                            variant=ButtonVariant::Ghost
                                                            size=ButtonSize::Icon
                                                            class="h-7 w-7 text-destructive"
                                                            attr:aria-label="Delete notebook"
                                                            on:click=move |ev: web_sys::MouseEvent| {
                                                                ev.stop_propagation();
                                                                delete_target.set(Some(DeleteTarget::Notebook {
                                                                    id: id_for_delete.clone(),
                                                                    name: name_for_delete.clone(),
                                                                }));
                                                            }
                                                        >
                                                            <TrashIcon />
                                                        </Button>
                                                        <TooltipContent>"Delete notebook"</TooltipContent>
                                                    </Tooltip>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                                }
                            }
                        </Show>
                    </div>
                </aside>

                <main class="min-w-0 flex-1">
                    <div class="mb-6 flex items-start justify-between gap-3">
                        <div class="min-w-0 space-y-1">
                            <h1 class="truncate text-xl font-semibold">{greeting()}</h1>
                            <p class="text-xs text-muted-foreground">{today_line()}</p>
                        </div>

                        <div class="flex shrink-0 items-center gap-2">
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                class="lg:hidden"
                                attr:aria-label="Toggle sidebar"
                                on:click=move |_| sidebar_open.update(|v| *v = !*v)
                            >
                                <span class="text-base">"☰"</span>
                            </Button>

                            <Tooltip>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    attr:aria-label="Toggle theme"
                                    on:click=on_toggle_theme
                                >
                                    {move || {
                                        if theme.get() == crate::theme::Theme::Dark { "☾" } else { "☀" }
                                    }}
                                </Button>
                                <TooltipContent>"Toggle theme"</TooltipContent>
                            </Tooltip>

                            <Button
                                size=ButtonSize::Sm
                                attr:disabled=move || !has_notebooks()
                                on:click=move |_| open_note_modal(None)
                            >
                                "+ New note"
                            </Button>
                        </div>
                    </div>

                    <Show when=move || ui_error.get().is_some() fallback=|| ().into_view()>
                        {move || {
                            ui_error.get().map(|e| view! {
                                <Alert class="mb-4 flex items-center justify-between border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Icon
                                        class="h-6 w-6"
                                        attr:aria-label="Dismiss"
                                        on:click=move |_| ui_error.set(None)
                                    >
                                        <X />
                                    </Button>
                                </Alert>
                            })
                        }}
                    </Show>

                    <div class="mb-4 text-sm font-medium text-muted-foreground">
                        {panel_title}
                    </div>

                    <Show
                        when=has_notebooks
                        fallback=|| view! {
                            <div class="flex flex-col items-center justify-center gap-2 py-16 text-muted-foreground">
                                <div class="text-sm">"Create a notebook to get started."</div>
                            </div>
                        }
                    >
                        <Show when=move || !notes.get().is_empty() fallback=|| view! { <EmptyNotes /> }>
                            <div class="grid gap-3 sm:grid-cols-2 xl:grid-cols-3">
                                {move || {
                                    notes
                                        .get()
                                        .into_iter()
                                        .map(|note| {
                                            let note_for_edit = note.clone();
                                            let target = DeleteTarget::Note {
                                                notebook_id: note.notebook_id.clone(),
                                                id: note.id.clone(),
                                                title: note.title.clone(),
                                            };

                                            view! {
                                                <Card
                                                    class="group relative cursor-pointer gap-2 py-4 transition-colors hover:bg-accent/30"
                                                    attr:data-note=note.id.clone()
                                                    on:click=move |_| open_note_modal(Some(note_for_edit.clone()))
                                                >
                                                    <CardHeader class="px-4">
                                                        <CardTitle class="truncate text-sm">{note.title.clone()}</CardTitle>
                                                    </CardHeader>
                                                    <CardContent class="px-4">
                                                        <CardDescription class="line-clamp-4 text-xs">
                                                            {note.text.clone()}
                                                        </CardDescription>

                                                        <div class="mt-2 flex items-center justify-between">
                                                            <div class="text-[11px] text-muted-foreground">
                                                                {relative_time(note.posted_on, now_ms())}
                                                            </div>

                                                            <Tooltip class="hidden group-hover:inline-block">
                                                                <Button
                                                                    variant=ButtonVariant::Ghost
                                                                    size=ButtonSize::Icon
                                                                    class="h-7 w-7 text-destructive"
                                                                    attr:aria-label="Delete note"
                                                                    on:click=move |ev: web_sys::MouseEvent| {
                                                                        ev.stop_propagation();
                                                                        delete_target.set(Some(target.clone()));
                                                                    }
                                                                >
                                                                    <TrashIcon />
                                                                </Button>
                                                                <TooltipContent>"Delete note"</TooltipContent>
                                                            </Tooltip>
                                                        </div>
                                                    </CardContent>
                                                </Card>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </Show>
                    </Show>
                </main>
            </div>

            // New notebook
            <Show when=move || create_open.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 text-sm font-medium">"New notebook"</div>

                        <div class="space-y-2">
                            <div class="space-y-1">
                                <Label class="text-xs">"Name"</Label>
                                <Input
                                    node_ref=create_name_ref
                                    bind_value=create_name
                                    placeholder="Untitled"
                                    class="h-8 text-sm"
                                    on:keydown={
                                        let submit = submit_create_notebook.clone();
                                        move |ev: web_sys::KeyboardEvent| {
                                            if ev.key() == "Enter" {
                                                submit();
                                            }
                                        }
                                    }
                                />
                            </div>

                            <Show when=move || create_error.get().is_some() fallback=|| ().into_view()>
                                {move || create_error.get().map(|e| view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                })}
                            </Show>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |_| create_open.set(false)
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    size=ButtonSize::Sm
                                    on:click={
                                        let submit = submit_create_notebook.clone();
                                        move |_| submit()
                                    }
                                >
                                    "Create"
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>

            // Rename notebook
            <Show when=move || rename_open.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 text-sm font-medium">"Edit notebook"</div>

                        <div class="space-y-2">
                            <div class="space-y-1">
                                <Label class="text-xs">"Name"</Label>
                                <Input
                                    bind_value=rename_value
                                    class="h-8 text-sm"
                                    on:keydown={
                                        let submit = submit_rename_notebook.clone();
                                        move |ev: web_sys::KeyboardEvent| {
                                            if ev.key() == "Enter" {
                                                submit();
                                            }
                                        }
                                    }
                                />
                            </div>

                            <Show when=move || rename_error.get().is_some() fallback=|| ().into_view()>
                                {move || rename_error.get().map(|e| view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                })}
                            </Show>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |_| rename_open.set(false)
                                >
                                    "Cancel"
                                </Button>
                                <Button
                                    size=ButtonSize::Sm
                                    on:click={
                                        let submit = submit_rename_notebook.clone();
                                        move |_| submit()
                                    }
                                >
                                    "Save"
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>

            // Delete confirmation (notebooks and notes)
            <Show when=move || delete_target.get().is_some() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 text-sm font-medium">
                            {move || {
                                delete_target
                                    .get()
                                    .map(|t| format!("Are you sure you want to delete \"{}\"?", t.label()))
                                    .unwrap_or_default()
                            }}
                        </div>

                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                on:click=move |_| delete_target.set(None)
                            >
                                "Cancel"
                            </Button>
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                on:click={
                                    let submit = submit_delete.clone();
                                    move |_| submit()
                                }
                            >
                                "Delete"
                            </Button>
                        </div>
                    </div>
                </div>
            </Show>

            // Note create/edit modal
            <Show when=move || note_modal_open.get() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-md rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 flex items-center justify-between">
                            <div class="text-sm font-medium">
                                {move || {
                                    if note_editing.get().is_some() { "Edit note" } else { "New note" }
                                }}
                            </div>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                class="h-7 w-7"
                                attr:aria-label="Close modal"
                                on:click=move |_| note_modal_open.set(false)
                            >
                                <X />
                            </Button>
                        </div>

                        <div class="space-y-2">
                            <Input bind_value=note_title placeholder="Untitled" class="h-8 text-sm" />
                            <Textarea bind_value=note_text placeholder="Take a note..." rows=8 class="text-sm" />

                            <div class="flex items-center justify-between pt-2">
                                <span class="text-[11px] text-muted-foreground">
                                    {move || {
                                        note_editing
                                            .get()
                                            .map(|n| relative_time(n.posted_on, now_ms()))
                                            .unwrap_or_default()
                                    }}
                                </span>

                                <Button
                                    size=ButtonSize::Sm
                                    attr:disabled=move || {
                                        note_title.get().trim().is_empty()
                                            && note_text.get().trim().is_empty()
                                    }
                                    on:click={
                                        let submit = submit_note_modal.clone();
                                        move |_| submit()
                                    }
                                >
                                    "Save"
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
