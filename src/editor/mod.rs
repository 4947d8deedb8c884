mod caret;
pub(crate) mod mention;

use crate::components::hooks::use_random::use_random_id_for;
use crate::components::ui::{Command, CommandItem, CommandList};
use crate::models::Entity;
pub(crate) use caret::probe_caret;

use caret::CaretCoordinate;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use mention::{
    byte_idx_to_utf16, commit_mention, detect_mention, filter_roster, utf16_to_byte_idx,
};

pub(crate) use mention::word_count;

/// Plain-text journal surface with `@name` autocomplete.
///
/// The component owns a two-state machine: idle (no menu) and suggesting
/// (menu open, tracking the active token, its candidates and the caret
/// pixel position). Every keystroke, click and scroll re-derives that state
/// synchronously from the textarea's text + selection; there is no async
/// work in this path.
#[component]
pub fn MentionEditor(
    /// The document. Replaced wholesale on each edit.
    value: RwSignal<String>,
    /// Mention roster, usually the preferences companions. When empty, a
    /// built-in fallback pair is offered instead.
    #[prop(into)]
    roster: Signal<Vec<Entity>>,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] disabled: Signal<bool>,
    /// Fired on Ctrl/Cmd+Enter.
    #[prop(optional)]
    on_submit: Option<Callback<()>>,
) -> impl IntoView {
    let textarea_ref: NodeRef<html::Textarea> = NodeRef::new();
    let mirror_ref: NodeRef<html::Div> = NodeRef::new();

    let mention_open: RwSignal<bool> = RwSignal::new(false);
    let mention_items: RwSignal<Vec<Entity>> = RwSignal::new(vec![]);
    let mention_index: RwSignal<usize> = RwSignal::new(0);
    let mention_pos: RwSignal<CaretCoordinate> = RwSignal::new(CaretCoordinate::default());

    // Keys the open menu consumed on keydown must not re-trigger detection
    // on their keyup (Escape would immediately reopen the menu otherwise).
    let key_consumed: StoredValue<bool> = StoredValue::new(false);

    let menu_id = StoredValue::new(use_random_id_for("mention_menu"));

    let effective_roster = move || {
        let r = roster.get_untracked();
        if r.is_empty() {
            mention::fallback_roster()
        } else {
            r
        }
    };

    let caret_utf16_of = |textarea: &web_sys::HtmlTextAreaElement| {
        let len = textarea.value().encode_utf16().count() as u32;
        textarea
            .selection_start()
            .ok()
            .flatten()
            .unwrap_or(len)
            .min(len)
    };

    // Re-derive the menu state from the current text + selection snapshot.
    let refresh_suggestions = move || {
        let Some(textarea) = textarea_ref.get_untracked() else {
            return;
        };

        let text = textarea.value();
        let caret_utf16 = caret_utf16_of(&textarea);
        let caret = utf16_to_byte_idx(&text, caret_utf16);

        let Some(token) = detect_mention(&text, caret) else {
            mention_open.set(false);
            mention_index.set(0);
            return;
        };

        let items = filter_roster(&token.query, &effective_roster());
        if items.is_empty() {
            mention_open.set(false);
            mention_index.set(0);
            return;
        }

        mention_items.set(items);
        mention_index.set(0);

        // Position the menu under the caret's line. A missing mirror (first
        // render) keeps the previous coordinate rather than failing.
        if let Some(mirror) = mirror_ref.get_untracked() {
            if let Some(pos) = probe_caret(&textarea, &mirror, caret_utf16) {
                mention_pos.set(pos);
            }
        }

        mention_open.set(true);
    };

    let commit_choice = move |entity: Entity| {
        let Some(textarea) = textarea_ref.get_untracked() else {
            return;
        };

        let text = textarea.value();
        let caret_utf16 = caret_utf16_of(&textarea);
        let caret = utf16_to_byte_idx(&text, caret_utf16);

        let (next, new_cursor) = commit_mention(&text, caret, &entity);
        let caret_after = byte_idx_to_utf16(&next, new_cursor);

        // Programmatic replacement resets the selection; restore it and hand
        // focus back to the surface.
        textarea.set_value(&next);
        value.set(next);
        let _ = textarea.set_selection_range(caret_after, caret_after);
        let _ = textarea.focus();

        mention_open.set(false);
        mention_index.set(0);
    };

    let on_input = move |ev: web_sys::Event| {
        value.set(event_target_value(&ev));
        refresh_suggestions();
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();

        if mention_open.get_untracked() {
            match key.as_str() {
                "ArrowDown" => {
                    ev.prevent_default();
                    key_consumed.set_value(true);
                    let len = mention_items.get_untracked().len();
                    if len > 0 {
                        mention_index.update(|i| *i = (*i + 1).min(len - 1));
                    }
                    return;
                }
                "ArrowUp" => {
                    ev.prevent_default();
                    key_consumed.set_value(true);
                    mention_index.update(|i| *i = i.saturating_sub(1));
                    return;
                }
                "Escape" => {
                    ev.prevent_default();
                    key_consumed.set_value(true);
                    mention_open.set(false);
                    return;
                }
                "Enter" | "Tab" => {
                    ev.prevent_default();
                    key_consumed.set_value(true);
                    let items = mention_items.get_untracked();
                    let idx = mention_index.get_untracked();
                    if let Some(entity) = items.get(idx) {
                        commit_choice(entity.clone());
                    }
                    return;
                }
                _ => {}
            }
        }

        // Quick save, as on the classic journal page.
        if key == "Enter" && (ev.ctrl_key() || ev.meta_key()) {
            ev.prevent_default();
            if let Some(cb) = on_submit {
                cb.run(());
            }
        }
    };

    // Caret moves that change no text (arrows, Home/End) still move or close
    // the menu; keyup is where the new selection is observable.
    let on_keyup = move |_ev: web_sys::KeyboardEvent| {
        if key_consumed.get_value() {
            key_consumed.set_value(false);
            return;
        }
        refresh_suggestions();
    };

    let on_click = move |_ev: web_sys::MouseEvent| {
        refresh_suggestions();
    };

    // Scroll and resize only shift where the caret renders; the token is
    // unchanged, so re-probe without re-detecting.
    let reposition_menu = move || {
        if !mention_open.get_untracked() {
            return;
        }
        let (Some(textarea), Some(mirror)) =
            (textarea_ref.get_untracked(), mirror_ref.get_untracked())
        else {
            return;
        };
        let caret_utf16 = caret_utf16_of(&textarea);
        if let Some(pos) = probe_caret(&textarea, &mirror, caret_utf16) {
            mention_pos.set(pos);
        }
    };

    let on_scroll = move |_ev: web_sys::Event| reposition_menu();

    // Resize can change the textarea's width or font, moving every wrap point.
    let _resize_handle = window_event_listener(ev::resize, move |_ev| {
        reposition_menu();
    });

    let on_blur = move |_ev: web_sys::FocusEvent| {
        // Menu rows commit on mousedown with preventDefault, so a click on a
        // suggestion never reaches this path.
        mention_open.set(false);
    };

    view! {
        <div class="relative">
            <textarea
                node_ref=textarea_ref
                class="min-h-64 w-full resize-y rounded-md border border-input bg-transparent px-3 py-2 text-sm shadow-xs outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 disabled:cursor-not-allowed disabled:opacity-50"
                placeholder=placeholder
                role="combobox"
                aria-autocomplete="list"
                aria-expanded=move || mention_open.get().to_string()
                aria-controls=menu_id.get_value()
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=on_input
                on:keydown=on_keydown
                on:keyup=on_keyup
                on:click=on_click
                on:scroll=on_scroll
                on:blur=on_blur
            ></textarea>

            // Off-screen mirror the caret prober measures against. Its style
            // is rewritten from the textarea's computed style on every probe.
            <div node_ref=mirror_ref aria-hidden="true" data-name="MentionMirror"></div>

            <Show when=move || mention_open.get() fallback=|| ().into_view()>
                <div
                    id=menu_id.get_value()
                    class="absolute z-50 w-64 max-w-[90vw] rounded-md border border-border-strong bg-background text-foreground p-1 text-sm shadow-lg"
                    style=move || {
                        let pos = mention_pos.get();
                        format!("top: {}px; left: {}px", pos.top, pos.left)
                    }
                >
                    <Command class="w-full" should_filter=false disable_scripts=true>
                        <CommandList class="max-h-64 min-h-0">
                            {move || {
                                let items = mention_items.get();
                                let idx = mention_index.get();

                                items
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, entity)| {
                                        let name = entity.name.clone();
                                        let relation = entity.relation.clone();
                                        let selected = Signal::derive(move || i == idx);

                                        view! {
                                            <CommandItem
                                                value=name.clone()
                                                selected=selected
                                                class="flex items-center justify-between rounded px-2 py-1"
                                                on_mousedown=Some(Callback::new(move |ev: web_sys::MouseEvent| {
                                                    // Prevent the textarea blur.
                                                    ev.prevent_default();
                                                    commit_choice(entity.clone());
                                                }))
                                                on:mousemove=move |_ev| {
                                                    mention_index.set(i);
                                                }
                                                attr:data-mention-idx=i.to_string()
                                            >
                                                <div class="truncate">{name.clone()}</div>
                                                <div class="ml-2 shrink-0 text-xs text-muted-foreground">
                                                    {relation.clone()}
                                                </div>
                                            </CommandItem>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </CommandList>
                    </Command>
                </div>
            </Show>
        </div>
    }
}
